//! Render configuration, pixel buffers and the top-level render entry point.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    ray_tracer::{MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K},
    Camera, Color, Scene, WhittedTracer,
};

/// Render configuration.
///
/// Missing fields take their default when deserialized, so a partial JSON
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Anti-aliasing grid side: each pixel is sampled by up to N x N rays
    pub samples_per_pixel: u32,
    /// Subdivide pixels only where corner samples disagree
    pub adaptive: bool,
    /// Worker threads; 0 renders on the calling thread
    pub threads: usize,
    /// Maximum reflection/refraction recursion depth
    pub max_depth: u32,
    /// Paths attenuated below this on every channel are not traced
    pub min_contribution: f64,
    /// Largest per-channel difference at which adaptive corner colors count as equal
    pub color_tolerance: f64,
    /// Rays in a glossy reflection/refraction grid
    pub glossy_rays: u32,
    /// Distance from the surface at which the glossy grid is laid out
    pub glossy_distance: f64,
    /// Divisor turning material glossiness into grid spacing
    pub glossy_grid_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            adaptive: false,
            threads: 0,
            max_depth: MAX_CALC_COLOR_LEVEL,
            min_contribution: MIN_CALC_COLOR_K,
            color_tolerance: 1.0 / 255.0,
            glossy_rays: 36,
            glossy_distance: 25.0,
            glossy_grid_size: 4.0,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the settings that would make a render meaningless.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigurationError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigurationError::ZeroDepth);
        }
        if self.color_tolerance.is_nan() || self.color_tolerance < 0.0 {
            return Err(ConfigurationError::InvalidTolerance(self.color_tolerance));
        }
        Ok(())
    }
}

/// Destination for rendered pixels.
///
/// Render workers write through a shared reference; each coordinate is written by
/// exactly one worker, so implementations need no per-pixel locking.
pub trait PixelSink: Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&self, x: u32, y: u32, color: Color);
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)).round() as u8;
    let g = (255.0 * clamp_01(color.y)).round() as u8;
    let b = (255.0 * clamp_01(color.z)).round() as u8;
    [r, g, b, 255]
}

/// In-memory image buffer for storing render output.
///
/// Channels are stored as `f64` bit patterns in atomics so that render workers can
/// fill disjoint pixels through `&self`.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[AtomicU64; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let pixels = (0..len)
            .map(|_| std::array::from_fn(|_| AtomicU64::new(0.0f64.to_bits())))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        let [r, g, b] = &self.pixels[self.index(x, y)];
        Color::new(
            f64::from_bits(r.load(Ordering::Relaxed)),
            f64::from_bits(g.load(Ordering::Relaxed)),
            f64::from_bits(b.load(Ordering::Relaxed)),
        )
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> Vec<Color> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.get(x, y))
            .collect()
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let rgba: Vec<[u8; 4]> = self.pixels().into_iter().map(color_to_rgba).collect();
        bytemuck::cast_slice::<[u8; 4], u8>(rgba.as_slice()).to_vec()
    }
}

impl PixelSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&self, x: u32, y: u32, color: Color) {
        let [r, g, b] = &self.pixels[self.index(x, y)];
        r.store(color.x.to_bits(), Ordering::Relaxed);
        g.store(color.y.to_bits(), Ordering::Relaxed);
        b.store(color.z.to_bits(), Ordering::Relaxed);
    }
}

/// Render `scene` through `camera` into a new `width` x `height` image.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    width: u32,
    height: u32,
) -> Result<ImageBuffer, ConfigurationError> {
    let image = ImageBuffer::new(width, height);
    let tracer = WhittedTracer::from_config(scene, config);
    camera.render(&tracer, &image, config)?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.min_contribution, 0.001);
    }

    #[test]
    fn test_config_validation() {
        let zero_samples = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_samples.validate(),
            Err(ConfigurationError::ZeroSamples)
        ));

        let zero_depth = RenderConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(zero_depth.validate(), Err(ConfigurationError::ZeroDepth)));

        let negative = RenderConfig {
            color_tolerance: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigurationError::InvalidTolerance(t)) if t == -0.1
        ));

        let nan = RenderConfig {
            color_tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(ConfigurationError::InvalidTolerance(_))));

        let exact = RenderConfig {
            color_tolerance: 0.0,
            ..Default::default()
        };
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_partial_json_config() {
        let config = RenderConfig::from_json(r#"{ "samples_per_pixel": 4, "adaptive": true, "threads": 8 }"#)
            .unwrap();

        assert_eq!(config.samples_per_pixel, 4);
        assert!(config.adaptive);
        assert_eq!(config.threads, 8);
        // Everything else keeps its default
        assert_eq!(config.max_depth, RenderConfig::default().max_depth);
        assert_eq!(config.glossy_rays, 36);

        assert!(RenderConfig::from_json(r#"{ "threads": "many" }"#).is_err());
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        // Out-of-range channels are clamped
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 128, 255]);
    }

    #[test]
    fn test_image_buffer() {
        let image = ImageBuffer::new(3, 2);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.get(2, 1), Color::ZERO);

        image.set_pixel(2, 1, Color::new(1.0, 0.5, 0.25));
        assert_eq!(image.get(2, 1), Color::new(1.0, 0.5, 0.25));
        assert_eq!(image.pixels()[5], Color::new(1.0, 0.5, 0.25));

        let rgba = image.to_rgba();
        assert_eq!(rgba.len(), 3 * 2 * 4);
        assert_eq!(&rgba[20..24], &[255, 128, 64, 255]);
    }
}
