//! The uniform block shared between CPU and shader.
//!
//! [`TrailUniforms`] mirrors the WGSL `Uniforms` struct byte for byte (see
//! [`crate::shader`] for the GPU side of the contract). It is rebuilt every
//! frame from the current [`DesignConfig`](crate::design::DesignConfig),
//! camera and clock, then written to the uniform buffer in one upload - so a
//! configuration change propagates to the GPU on the very next write with no
//! separate dirty tracking.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::design::DesignConfig;

/// Per-frame uniform data. Matches the generated WGSL layout exactly
/// (128 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TrailUniforms {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Base particle color, linear RGB.
    pub color: [f32; 3],
    /// Base particle footprint in pixels.
    pub base_size: f32,
    /// Global clock, seconds since start. Compared against per-particle
    /// spawn times to derive age.
    pub time: f32,
    /// Per-particle random size magnitude.
    pub shape_rand_size: f32,
    /// Per-particle random aspect distortion.
    pub shape_rand_proportions: f32,
    /// Hue jitter magnitude.
    pub color_rand_h: f32,
    /// Saturation jitter magnitude.
    pub color_rand_s: f32,
    /// Lightness jitter magnitude.
    pub color_rand_l: f32,
    /// Shrink-over-age strength.
    pub effect_scale_out: f32,
    /// Periodic pulse strength.
    pub effect_beat: f32,
    /// Outward drift-over-age strength.
    pub effect_spread: f32,
    /// Reserved; read by the shader but never affects output.
    pub effect_spiral: f32,
    /// Viewport size in pixels, for pixel-to-clip conversion.
    pub resolution: [f32; 2],
}

impl TrailUniforms {
    /// Assemble the block from the design config and frame state.
    pub fn new(config: &DesignConfig, view_proj: Mat4, time: f32, resolution: [f32; 2]) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            color: config.color.to_array(),
            base_size: config.base_size,
            time,
            shape_rand_size: config.shape_rand_size,
            shape_rand_proportions: config.shape_rand_proportions,
            color_rand_h: config.color_rand_h,
            color_rand_s: config.color_rand_s,
            color_rand_l: config.color_rand_l,
            effect_scale_out: config.effect_scale_out,
            effect_beat: config.effect_beat,
            effect_spread: config.effect_spread,
            effect_spiral: config.effect_spiral,
            resolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::DesignChange;

    #[test]
    fn test_layout_matches_wgsl_block() {
        // mat4x4 (64) + vec3+f32 (16) + 10 scalars (40) + vec2 (8) = 128.
        assert_eq!(std::mem::size_of::<TrailUniforms>(), 128);
        assert_eq!(std::mem::size_of::<TrailUniforms>() % 16, 0);
    }

    #[test]
    fn test_config_propagates() {
        let mut cfg = DesignConfig::default();
        cfg.apply(DesignChange::EffectBeat(2.0));
        cfg.apply(DesignChange::ColorRandS(0.3));

        let u = TrailUniforms::new(&cfg, Mat4::IDENTITY, 12.5, [800.0, 600.0]);
        assert_eq!(u.effect_beat, 2.0);
        assert_eq!(u.color_rand_s, 0.3);
        assert_eq!(u.time, 12.5);
        assert_eq!(u.resolution, [800.0, 600.0]);
        assert_eq!(u.base_size, cfg.base_size);
    }
}
