//! Trail design parameters and the single-field change events that mutate
//! them.
//!
//! One [`DesignConfig`] is shared between whatever produces configuration
//! events (UI, keyboard, scripting) and the renderer. Event producers never
//! reach into shader internals: they build a [`DesignChange`], the app
//! applies it to the config, and the new value propagates to the GPU uniform
//! store synchronously in the same call.
//!
//! All values clamp to safe ranges on application. A malformed or
//! out-of-range value degrades to its nearest valid neighbor; it never
//! aborts rendering.

use glam::Vec3;

use crate::textures::TextureConfig;

/// Sprite shape rendered for every particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Soft radial dot (default).
    #[default]
    Circular,
    /// Hard-edged diamond.
    Angular,
    /// Noise-softened puff.
    Clouds,
    /// Irregular hashed blotch.
    Abstract,
}

impl Shape {
    /// All shapes, in UI order.
    pub const ALL: [Shape; 4] = [
        Shape::Circular,
        Shape::Angular,
        Shape::Clouds,
        Shape::Abstract,
    ];

    /// Build the sprite texture for this shape.
    ///
    /// Sprites are generated procedurally so the crate carries no image
    /// assets; see [`crate::textures`] for the generators.
    pub fn texture(&self) -> TextureConfig {
        match self {
            Shape::Circular => TextureConfig::soft_circle(64),
            Shape::Angular => TextureConfig::diamond(64),
            Shape::Clouds => TextureConfig::cloud(64, 11),
            Shape::Abstract => TextureConfig::blotch(64, 29),
        }
    }
}

/// User-tunable visual parameters, read by the shader every frame.
///
/// Immutable by convention: nothing mutates a field directly except
/// [`DesignConfig::apply`], which handles exactly one [`DesignChange`].
#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    /// Sprite shape; changing it swaps the sprite texture.
    pub shape: Shape,
    /// Base particle footprint in pixels (perspective-attenuated).
    pub base_size: f32,
    /// Per-particle random size magnitude, 0-1.
    pub shape_rand_size: f32,
    /// Per-particle random aspect distortion, 0-1.
    pub shape_rand_proportions: f32,
    /// Base color, linear RGB 0-1.
    pub color: Vec3,
    /// Per-particle hue jitter magnitude, 0-1.
    pub color_rand_h: f32,
    /// Per-particle saturation jitter magnitude, 0-1.
    pub color_rand_s: f32,
    /// Per-particle lightness jitter magnitude, 0-1.
    pub color_rand_l: f32,
    /// Shrink-over-age strength.
    pub effect_scale_out: f32,
    /// Periodic pulse strength.
    pub effect_beat: f32,
    /// Outward drift-over-age strength.
    pub effect_spread: f32,
    /// Reserved rotation-over-age hook; carried in the uniform contract but
    /// not wired to any visible output.
    pub effect_spiral: f32,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Circular,
            base_size: 500.0,
            shape_rand_size: 0.0,
            shape_rand_proportions: 0.0,
            color: Vec3::splat(0.867), // #dddddd
            color_rand_h: 0.0,
            color_rand_s: 0.0,
            color_rand_l: 0.0,
            effect_scale_out: 0.5,
            effect_beat: 0.0,
            effect_spread: 0.0,
            effect_spiral: 0.0,
        }
    }
}

/// A configuration event setting exactly one [`DesignConfig`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignChange {
    Shape(Shape),
    BaseSize(f32),
    ShapeRandSize(f32),
    ShapeRandProportions(f32),
    Color(Vec3),
    ColorRandH(f32),
    ColorRandS(f32),
    ColorRandL(f32),
    EffectScaleOut(f32),
    EffectBeat(f32),
    EffectSpread(f32),
    EffectSpiral(f32),
}

/// Upper clamp bound for the effect strengths.
pub const EFFECT_MAX: f32 = 4.0;

impl DesignConfig {
    /// Apply one change, clamping to the field's valid range.
    ///
    /// Returns `true` when the shape changed, which means the caller must
    /// swap the sprite texture as well as re-upload uniforms.
    pub fn apply(&mut self, change: DesignChange) -> bool {
        match change {
            DesignChange::Shape(shape) => {
                let swapped = shape != self.shape;
                self.shape = shape;
                return swapped;
            }
            DesignChange::BaseSize(v) => self.base_size = v.clamp(1.0, 2000.0),
            DesignChange::ShapeRandSize(v) => self.shape_rand_size = v.clamp(0.0, 1.0),
            DesignChange::ShapeRandProportions(v) => {
                self.shape_rand_proportions = v.clamp(0.0, 1.0)
            }
            DesignChange::Color(c) => self.color = c.clamp(Vec3::ZERO, Vec3::ONE),
            DesignChange::ColorRandH(v) => self.color_rand_h = v.clamp(0.0, 1.0),
            DesignChange::ColorRandS(v) => self.color_rand_s = v.clamp(0.0, 1.0),
            DesignChange::ColorRandL(v) => self.color_rand_l = v.clamp(0.0, 1.0),
            DesignChange::EffectScaleOut(v) => self.effect_scale_out = v.clamp(0.0, EFFECT_MAX),
            DesignChange::EffectBeat(v) => self.effect_beat = v.clamp(0.0, EFFECT_MAX),
            DesignChange::EffectSpread(v) => self.effect_spread = v.clamp(0.0, EFFECT_MAX),
            DesignChange::EffectSpiral(v) => self.effect_spiral = v.clamp(0.0, EFFECT_MAX),
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_demo_design() {
        let cfg = DesignConfig::default();
        assert_eq!(cfg.shape, Shape::Circular);
        assert_eq!(cfg.effect_scale_out, 0.5);
        assert_eq!(cfg.effect_beat, 0.0);
        assert!((cfg.color.x - 0.867).abs() < 1e-6);
    }

    #[test]
    fn test_apply_sets_one_field() {
        let mut cfg = DesignConfig::default();
        let before = cfg.clone();
        assert!(!cfg.apply(DesignChange::EffectBeat(1.5)));
        assert_eq!(cfg.effect_beat, 1.5);
        // Everything else untouched.
        assert_eq!(cfg.effect_scale_out, before.effect_scale_out);
        assert_eq!(cfg.color, before.color);
        assert_eq!(cfg.shape, before.shape);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let mut cfg = DesignConfig::default();
        cfg.apply(DesignChange::ColorRandH(7.0));
        assert_eq!(cfg.color_rand_h, 1.0);
        cfg.apply(DesignChange::EffectSpread(-3.0));
        assert_eq!(cfg.effect_spread, 0.0);
        cfg.apply(DesignChange::BaseSize(0.0));
        assert_eq!(cfg.base_size, 1.0);
        cfg.apply(DesignChange::Color(Vec3::new(2.0, -1.0, 0.5)));
        assert_eq!(cfg.color, Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_shape_change_signals_texture_swap() {
        let mut cfg = DesignConfig::default();
        assert!(cfg.apply(DesignChange::Shape(Shape::Clouds)));
        assert_eq!(cfg.shape, Shape::Clouds);
        // Re-applying the same shape needs no swap.
        assert!(!cfg.apply(DesignChange::Shape(Shape::Clouds)));
    }

    #[test]
    fn test_every_shape_has_a_texture() {
        for shape in Shape::ALL {
            let tex = shape.texture();
            assert_eq!(tex.data.len(), (tex.width * tex.height * 4) as usize);
        }
    }
}
