use wisp::prelude::*;

fn main() {
    let result = TrailEffect::new()
        .with_capacity(MAX_PARTICLE_COUNT)
        .with_spawn_interval_ms(PARTICLE_SPAWN_INTERVAL_MS)
        .with_design(DesignConfig::default())
        .run();

    if let Err(e) = result {
        eprintln!("wisp failed: {}", e);
        std::process::exit(1);
    }
}
