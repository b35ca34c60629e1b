//! Sprite textures for particle shapes.
//!
//! Every particle is drawn as a textured quad; the texture decides the
//! rendered footprint. The built-in shapes are generated procedurally so no
//! image assets ship with the crate, but custom sprites can be loaded from
//! PNG or JPEG files.
//!
//! Sprites are single-channel in spirit: RGB is white and the shape lives in
//! the alpha channel, which the fragment shader multiplies with the
//! per-particle color.

use std::path::Path;

use crate::error::TextureError;

/// Filter mode for sprite sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering, for deliberately pixelated sprites.
    Nearest,
}

/// Configuration for one sprite texture.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sampling filter.
    pub filter: FilterMode,
}

impl TextureConfig {
    /// Wrap raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Load a sprite from a PNG or JPEG file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Set the sampling filter.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Soft radial dot: alpha falls off smoothly from center to edge.
    pub fn soft_circle(size: u32) -> Self {
        Self::generate(size, |x, y| {
            let d = radial_distance(x, y, size);
            smoothstep(1.0, 0.5, d)
        })
    }

    /// Hard-edged diamond: full alpha inside `|x| + |y| < 0.9`, zero outside.
    pub fn diamond(size: u32) -> Self {
        Self::generate(size, |x, y| {
            let (cx, cy) = centered(x, y, size);
            let d = cx.abs() + cy.abs();
            if d < 0.9 {
                1.0
            } else {
                0.0
            }
        })
    }

    /// Noise-softened puff: radial falloff broken up by hash noise.
    pub fn cloud(size: u32, seed: u32) -> Self {
        Self::generate(size, |x, y| {
            let d = radial_distance(x, y, size);
            let n = hash_noise(x / 4, y / 4, seed) as f32 / 255.0;
            (smoothstep(1.0, 0.2, d) * (0.55 + 0.45 * n)).min(1.0)
        })
    }

    /// Irregular blotch: thresholded low-frequency noise masked to a disk.
    pub fn blotch(size: u32, seed: u32) -> Self {
        Self::generate(size, |x, y| {
            let d = radial_distance(x, y, size);
            if d > 1.0 {
                return 0.0;
            }
            let n = hash_noise(x / 8, y / 8, seed) as f32 / 255.0;
            if n > 0.35 {
                smoothstep(1.0, 0.7, d)
            } else {
                0.0
            }
        })
    }

    /// Build a white sprite with per-pixel alpha from `f(x, y) -> 0..1`.
    fn generate<F: Fn(u32, u32) -> f32>(size: u32, f: F) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let a = (f(x, y).clamp(0.0, 1.0) * 255.0) as u8;
                data.extend_from_slice(&[255, 255, 255, a]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
            filter: FilterMode::Linear,
        }
    }
}

/// Pixel coordinates mapped to `[-1, 1]` with the origin at the center.
fn centered(x: u32, y: u32, size: u32) -> (f32, f32) {
    let half = size as f32 / 2.0;
    ((x as f32 + 0.5 - half) / half, (y as f32 + 0.5 - half) / half)
}

/// Distance from the sprite center, 1.0 at the inscribed circle.
fn radial_distance(x: u32, y: u32, size: u32) -> f32 {
    let (cx, cy) = centered(x, y, size);
    (cx * cx + cy * cy).sqrt()
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Integer hash noise, stable per (x, y, seed).
fn hash_noise(x: u32, y: u32, seed: u32) -> u8 {
    let mut n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(seed.wrapping_mul(1013904223));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    n = n ^ (n >> 16);
    (n & 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_fill_rgba() {
        for tex in [
            TextureConfig::soft_circle(32),
            TextureConfig::diamond(32),
            TextureConfig::cloud(32, 1),
            TextureConfig::blotch(32, 1),
        ] {
            assert_eq!(tex.width, 32);
            assert_eq!(tex.height, 32);
            assert_eq!(tex.data.len(), 32 * 32 * 4);
        }
    }

    #[test]
    fn test_soft_circle_center_opaque_corner_clear() {
        let tex = TextureConfig::soft_circle(64);
        let alpha = |x: usize, y: usize| tex.data[(y * 64 + x) * 4 + 3];
        assert!(alpha(32, 32) > 250);
        assert_eq!(alpha(0, 0), 0);
    }

    #[test]
    fn test_diamond_edges() {
        let tex = TextureConfig::diamond(64);
        let alpha = |x: usize, y: usize| tex.data[(y * 64 + x) * 4 + 3];
        assert_eq!(alpha(32, 32), 255);
        // Corners are outside |x|+|y| < 0.9.
        assert_eq!(alpha(0, 0), 0);
        assert_eq!(alpha(63, 63), 0);
    }

    #[test]
    fn test_noise_is_stable() {
        assert_eq!(hash_noise(10, 20, 7), hash_noise(10, 20, 7));
        assert_ne!(hash_noise(10, 20, 7), hash_noise(10, 21, 7));
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_size_check() {
        TextureConfig::from_rgba(vec![0; 5], 2, 2);
    }
}
