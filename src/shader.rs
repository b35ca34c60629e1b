//! WGSL render-shader generation.
//!
//! The shader is produced as a string and handed to wgpu at startup, the
//! same way the rest of the crate treats it: a data asset with a documented
//! uniform contract, not something the CPU side ever introspects.
//!
//! # Contract
//!
//! Uniforms (group 0, binding 0) must match
//! [`TrailUniforms`](crate::uniforms::TrailUniforms) byte for byte. The
//! sprite texture and sampler sit in group 1, bindings 0 and 1. Instance
//! attributes come from three vertex buffers:
//!
//! | Location | Attribute | Source |
//! |----------|-------------|----------------------------|
//! | 0 | position | ring position array |
//! | 1 | size | ring size array (static) |
//! | 2 | spawn_time | ring spawn-time array |
//!
//! Each particle's age is `time - spawn_time`; a negative spawn time is the
//! "never used" sentinel and collapses the quad to zero size and alpha.
//! All per-particle randomization is seeded by the instance index alone so
//! a particle's look never flickers across frames.

/// WGSL uniform block. Field order and padding mirror `TrailUniforms`.
pub const UNIFORM_STRUCT_WGSL: &str = r#"struct Uniforms {
    view_proj: mat4x4<f32>,
    color: vec3<f32>,
    base_size: f32,
    time: f32,
    shape_rand_size: f32,
    shape_rand_proportions: f32,
    color_rand_h: f32,
    color_rand_s: f32,
    color_rand_l: f32,
    effect_scale_out: f32,
    effect_beat: f32,
    effect_spread: f32,
    effect_spiral: f32,
    resolution: vec2<f32>,
};"#;

/// Beat pulse frequency in radians per second of particle age.
const BEAT_FREQUENCY: f32 = 8.0;

/// Hash and HSL helper functions shared by the vertex stage.
const HELPERS_WGSL: &str = r#"fn hash11(seed: u32) -> f32 {
    var n = seed * 747796405u + 2891336453u;
    n = ((n >> ((n >> 28u) + 4u)) ^ n) * 277803737u;
    n = (n >> 22u) ^ n;
    return f32(n & 0xFFFFFFu) / 16777215.0;
}

fn rgb_to_hsl(c: vec3<f32>) -> vec3<f32> {
    let maxc = max(c.r, max(c.g, c.b));
    let minc = min(c.r, min(c.g, c.b));
    let l = (maxc + minc) * 0.5;
    let d = maxc - minc;
    if d < 1e-5 {
        return vec3<f32>(0.0, 0.0, l);
    }
    var s = d / (maxc + minc);
    if l > 0.5 {
        s = d / (2.0 - maxc - minc);
    }
    var h = 0.0;
    if maxc == c.r {
        h = (c.g - c.b) / d + select(0.0, 6.0, c.g < c.b);
    } else if maxc == c.g {
        h = (c.b - c.r) / d + 2.0;
    } else {
        h = (c.r - c.g) / d + 4.0;
    }
    return vec3<f32>(h / 6.0, s, l);
}

fn hue_to_channel(p: f32, q: f32, t_in: f32) -> f32 {
    let t = fract(t_in);
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    return p;
}

fn hsl_to_rgb(hsl: vec3<f32>) -> vec3<f32> {
    if hsl.y < 1e-5 {
        return vec3<f32>(hsl.z, hsl.z, hsl.z);
    }
    var q = hsl.z + hsl.y - hsl.z * hsl.y;
    if hsl.z < 0.5 {
        q = hsl.z * (1.0 + hsl.y);
    }
    let p = 2.0 * hsl.z - q;
    return vec3<f32>(
        hue_to_channel(p, q, hsl.x + 1.0 / 3.0),
        hue_to_channel(p, q, hsl.x),
        hue_to_channel(p, q, hsl.x - 1.0 / 3.0),
    );
}"#;

/// Generate the complete render shader (vertex + fragment).
pub fn render_shader() -> String {
    format!(
        r#"{uniform_struct}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var sprite_tex: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

{helpers}

struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) alpha: f32,
}};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
    @location(0) position: vec3<f32>,
    @location(1) size: f32,
    @location(2) spawn_time: f32,
) -> VertexOutput {{
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let quad_pos = quad_vertices[vertex_index];

    // Negative spawn time marks a slot that has never been written.
    // (`active` is reserved in WGSL, hence `alive`.)
    let alive = select(0.0, 1.0, spawn_time >= 0.0);
    let age = max(uniforms.time - spawn_time, 0.0);

    // Stable per-particle randoms, seeded by slot index only.
    let r_size = hash11(instance_index * 8u + 0u);
    let r_prop = hash11(instance_index * 8u + 1u);
    let r_angle = hash11(instance_index * 8u + 2u);
    let r_hue = hash11(instance_index * 8u + 3u);
    let r_sat = hash11(instance_index * 8u + 4u);
    let r_light = hash11(instance_index * 8u + 5u);

    // Scale: random size jitter, shrink over age, periodic beat.
    var size_mult = 1.0 + (r_size * 2.0 - 1.0) * uniforms.shape_rand_size;
    size_mult *= max(1.0 - age * uniforms.effect_scale_out, 0.0);
    size_mult *= 1.0 + sin(age * {beat_frequency:?}) * uniforms.effect_beat;
    size_mult = max(size_mult, 0.0);

    // Spread: drift outward over age along a stable per-particle direction.
    let spread_angle = r_angle * 6.2831853;
    let spread_dir = vec3<f32>(cos(spread_angle), sin(spread_angle), 0.0);
    let world_pos = position + spread_dir * age * uniforms.effect_spread;

    // Reserved spiral hook: part of the uniform contract, no visible output.
    let spiral_unused = uniforms.effect_spiral;

    // Proportions: stretch the quad, keeping the uv mapping square.
    let prop = (r_prop * 2.0 - 1.0) * uniforms.shape_rand_proportions;
    var quad = vec2<f32>(quad_pos.x * (1.0 + prop * 0.5), quad_pos.y * (1.0 - prop * 0.5));

    var clip_pos = uniforms.view_proj * vec4<f32>(world_pos, 1.0);

    // A constant clip-space offset shrinks with distance after the
    // perspective divide, giving pixel sizes attenuated by depth.
    let size_px = size * uniforms.base_size * size_mult * alive;
    clip_pos.x += quad.x * size_px * 2.0 / uniforms.resolution.x;
    clip_pos.y += quad.y * size_px * 2.0 / uniforms.resolution.y;

    // Per-particle color jitter in HSL space.
    var hsl = rgb_to_hsl(uniforms.color);
    hsl.x = fract(hsl.x + (r_hue * 2.0 - 1.0) * uniforms.color_rand_h * 0.5);
    hsl.y = clamp(hsl.y + (r_sat * 2.0 - 1.0) * uniforms.color_rand_s, 0.0, 1.0);
    hsl.z = clamp(hsl.z + (r_light * 2.0 - 1.0) * uniforms.color_rand_l, 0.0, 1.0);

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = hsl_to_rgb(hsl);
    out.uv = quad_pos;
    out.alpha = alive;
    return out;
}}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {{
    let tex = textureSample(sprite_tex, sprite_sampler, in.uv * 0.5 + 0.5);
    let alpha = tex.a * in.alpha;
    if alpha < 0.01 {{
        discard;
    }}
    return vec4<f32>(in.color * tex.rgb, alpha);
}}
"#,
        uniform_struct = UNIFORM_STRUCT_WGSL,
        helpers = HELPERS_WGSL,
        beat_frequency = BEAT_FREQUENCY,
    )
}
