//! # Wisp - Cursor-Driven Particle Trails
//!
//! A GPU particle trail that follows pointer activity: while the pointer is
//! active, particles spawn at a fixed rate along an animated path, live in a
//! fixed-capacity ring, and fade out on the GPU as they age.
//!
//! Wisp handles the GPU plumbing (buffers, generated WGSL, uniform layout)
//! so the interesting knobs stay on one config struct.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wisp::prelude::*;
//!
//! fn main() {
//!     TrailEffect::new()
//!         .with_capacity(190)
//!         .with_design(DesignConfig {
//!             shape: Shape::Clouds,
//!             effect_beat: 0.3,
//!             ..Default::default()
//!         })
//!         .run()
//!         .unwrap();
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Spawn accounting
//!
//! [`SpawnAccountant`] converts frame deltas into whole particles at a fixed
//! rate, carrying fractional remainders so the long-run count is exact
//! regardless of frame rate.
//!
//! ### The particle ring
//!
//! [`ParticleRing`] holds every particle that will ever exist, allocated
//! once. A cursor cycles through the slots; writing a slot revives it with a
//! new position and spawn time. Slots never written carry a negative spawn
//! time, which the shader treats as "draw nothing".
//!
//! ### Trail interpolation
//!
//! [`TrailEngine`] glues the two together: each tick it asks the accountant
//! how many particles are owed, then backfills them along the segment
//! between the previous and current path positions so fast movement leaves
//! a solid trail instead of beads.
//!
//! ### Design configuration
//!
//! [`DesignConfig`] is the single store for every visual knob: sprite
//! shape, base size, per-particle randomization and age-driven effects.
//! Changes are applied through [`DesignChange`] and reach the GPU on the
//! next uniform write.

pub mod design;
pub mod error;
pub mod gpu;
pub mod ring;
pub mod shader;
pub mod spawn;
pub mod textures;
pub mod time;
pub mod trail;
pub mod uniforms;

mod effect;

pub use bytemuck;
pub use design::{DesignChange, DesignConfig, Shape, EFFECT_MAX};
pub use effect::{TrailEffect, MAX_PARTICLE_COUNT, PARTICLE_SPAWN_INTERVAL_MS};
pub use error::{GpuError, TextureError, TrailError};
pub use glam::{Vec2, Vec3};
pub use ring::{ParticleRing, UNUSED_SPAWN_TIME};
pub use spawn::SpawnAccountant;
pub use textures::{FilterMode, TextureConfig};
pub use time::Clock;
pub use trail::{path_position, TrailEngine};
pub use uniforms::TrailUniforms;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use wisp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::design::{DesignChange, DesignConfig, Shape};
    pub use crate::effect::{TrailEffect, MAX_PARTICLE_COUNT, PARTICLE_SPAWN_INTERVAL_MS};
    pub use crate::error::TrailError;
    pub use crate::ring::ParticleRing;
    pub use crate::spawn::SpawnAccountant;
    pub use crate::textures::{FilterMode, TextureConfig};
    pub use crate::trail::TrailEngine;
    pub use crate::{Vec2, Vec3};
}
