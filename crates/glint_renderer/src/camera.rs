//! Pinhole camera with an explicit view plane.

use crate::{
    error::{ConfigurationError, ConstructionError},
    pixel_manager::render_pixels,
    Color, PixelSink, RayTracer, RenderConfig, Sampler,
};
use glint_math::{is_zero, DVec3, Ray};

/// View plane size and distance, once all of them are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Viewport {
    pub width: f64,
    pub height: f64,
    pub distance: f64,
}

/// Camera for generating rays into the scene.
///
/// The basis is right-handed: `right = to x up`.
#[derive(Debug, Clone)]
pub struct Camera {
    location: DVec3,
    to: DVec3,
    up: DVec3,
    right: DVec3,

    // View plane, set with the builder methods
    viewport_size: Option<(f64, f64)>,
    viewport_distance: Option<f64>,
}

impl Camera {
    /// Create a camera at `location` looking along `to`, with `up` as its up vector.
    ///
    /// Both vectors are normalized; they must be non-zero and orthogonal.
    pub fn new(location: DVec3, to: DVec3, up: DVec3) -> Result<Self, ConstructionError> {
        let to = to
            .try_normalize()
            .ok_or(ConstructionError::ZeroVector("camera forward"))?;
        let up = up
            .try_normalize()
            .ok_or(ConstructionError::ZeroVector("camera up"))?;
        if !is_zero(to.dot(up)) {
            return Err(ConstructionError::NotOrthogonal);
        }

        Ok(Self {
            location,
            to,
            up,
            right: to.cross(up).normalize(),
            viewport_size: None,
            viewport_distance: None,
        })
    }

    /// Set the view plane size in scene units.
    pub fn with_viewport_size(mut self, width: f64, height: f64) -> Self {
        self.viewport_size = Some((width, height));
        self
    }

    /// Set the distance from the camera to the view plane.
    pub fn with_viewport_distance(mut self, distance: f64) -> Self {
        self.viewport_distance = Some(distance);
        self
    }

    pub fn location(&self) -> DVec3 {
        self.location
    }

    pub fn to(&self) -> DVec3 {
        self.to
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }

    /// The view plane, if it has been fully and sensibly configured.
    pub(crate) fn viewport(&self) -> Result<Viewport, ConfigurationError> {
        let (width, height) = self
            .viewport_size
            .filter(|(w, h)| *w > 0.0 && *h > 0.0)
            .ok_or(ConfigurationError::MissingViewportSize)?;
        let distance = self
            .viewport_distance
            .filter(|d| *d > 0.0)
            .ok_or(ConfigurationError::MissingViewportDistance)?;
        Ok(Viewport {
            width,
            height,
            distance,
        })
    }

    /// Center of pixel (col, row) of an `nx` x `ny` image, on the view plane.
    ///
    /// Row 0 is the top of the image, column 0 the left.
    pub(crate) fn pixel_center_on(&self, viewport: &Viewport, nx: u32, ny: u32, col: u32, row: u32) -> DVec3 {
        let pc = self.location + self.to * viewport.distance;
        let rx = viewport.width / nx as f64;
        let ry = viewport.height / ny as f64;
        let x = (col as f64 - (nx as f64 - 1.0) / 2.0) * rx;
        let y = -(row as f64 - (ny as f64 - 1.0) / 2.0) * ry;
        pc + self.right * x + self.up * y
    }

    /// Center of pixel (col, row) of an `nx` x `ny` image, on the view plane.
    pub fn pixel_center(&self, nx: u32, ny: u32, col: u32, row: u32) -> Result<DVec3, ConfigurationError> {
        Ok(self.pixel_center_on(&self.viewport()?, nx, ny, col, row))
    }

    /// The ray from the camera through the center of pixel (col, row).
    pub fn construct_ray(&self, nx: u32, ny: u32, col: u32, row: u32) -> Result<Ray, ConfigurationError> {
        let target = self.pixel_center(nx, ny, col, row)?;
        Ok(Ray::new(self.location, target - self.location))
    }

    /// Render every pixel of `target` with `tracer`.
    ///
    /// All settings are checked before the first ray is cast. Returns the number of
    /// pixels written.
    pub fn render(
        &self,
        tracer: &dyn RayTracer,
        target: &dyn PixelSink,
        config: &RenderConfig,
    ) -> Result<usize, ConfigurationError> {
        let (width, height) = (target.width(), target.height());
        let sampler = Sampler::new(self, tracer, config, width, height)?;
        log::info!(
            "Rendering {}x{} with {:?} sampling on {} thread(s)",
            width,
            height,
            sampler.mode(),
            config.threads.max(1)
        );

        render_pixels(target, config.threads, |col, row| sampler.pixel_color(col, row))
    }

    /// Paint grid lines every `interval` pixels over `target`.
    pub fn draw_grid(&self, target: &dyn PixelSink, interval: u32, color: Color) {
        let interval = interval.max(1);
        for row in 0..target.height() {
            for col in 0..target.width() {
                if row % interval == 0 || col % interval == 0 {
                    target.set_pixel(col, row, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageBuffer;

    fn camera() -> Camera {
        Camera::new(DVec3::ZERO, -DVec3::Z, DVec3::Y)
            .unwrap()
            .with_viewport_size(3.0, 3.0)
            .with_viewport_distance(1.0)
    }

    #[test]
    fn test_camera_basis() {
        let cam = Camera::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -2.0), DVec3::new(0.0, 5.0, 0.0)).unwrap();
        assert_eq!(cam.to(), -DVec3::Z);
        assert_eq!(cam.up(), DVec3::Y);
        assert!(cam.right().abs_diff_eq(DVec3::X, 1e-12));
    }

    #[test]
    fn test_camera_rejects_bad_basis() {
        assert_eq!(
            Camera::new(DVec3::ZERO, DVec3::Z, DVec3::new(0.0, 1.0, 1.0)).unwrap_err(),
            ConstructionError::NotOrthogonal
        );
        assert_eq!(
            Camera::new(DVec3::ZERO, DVec3::ZERO, DVec3::Y).unwrap_err(),
            ConstructionError::ZeroVector("camera forward")
        );
    }

    #[test]
    fn test_pixel_centers() {
        let cam = camera();

        // Middle of a 3x3 image is straight ahead
        let center = cam.pixel_center(3, 3, 1, 1).unwrap();
        assert!(center.abs_diff_eq(DVec3::new(0.0, 0.0, -1.0), 1e-12));

        // Top left
        let corner = cam.pixel_center(3, 3, 0, 0).unwrap();
        assert!(corner.abs_diff_eq(DVec3::new(-1.0, 1.0, -1.0), 1e-12));

        // Bottom right of a 4x4 image sits half a pixel in from the edge
        let corner = cam.pixel_center(4, 4, 3, 3).unwrap();
        assert!(corner.abs_diff_eq(DVec3::new(1.125, -1.125, -1.0), 1e-12));
    }

    #[test]
    fn test_construct_ray() {
        let cam = camera();
        let ray = cam.construct_ray(3, 3, 2, 1).unwrap();

        assert_eq!(ray.origin(), DVec3::ZERO);
        let expected = DVec3::new(1.0, 0.0, -1.0).normalize();
        assert!(ray.direction().abs_diff_eq(expected, 1e-12));
    }

    #[test]
    fn test_missing_viewport() {
        let bare = Camera::new(DVec3::ZERO, -DVec3::Z, DVec3::Y).unwrap();
        assert!(matches!(
            bare.construct_ray(3, 3, 0, 0),
            Err(ConfigurationError::MissingViewportSize)
        ));

        let no_distance = bare.clone().with_viewport_size(1.0, 1.0);
        assert!(matches!(
            no_distance.construct_ray(3, 3, 0, 0),
            Err(ConfigurationError::MissingViewportDistance)
        ));

        let flat = bare.with_viewport_size(0.0, 1.0).with_viewport_distance(1.0);
        assert!(matches!(
            flat.construct_ray(3, 3, 0, 0),
            Err(ConfigurationError::MissingViewportSize)
        ));
    }

    #[test]
    fn test_draw_grid() {
        let cam = camera();
        let image = ImageBuffer::new(5, 5);
        cam.draw_grid(&image, 2, Color::ONE);

        assert_eq!(image.get(0, 0), Color::ONE);
        assert_eq!(image.get(2, 3), Color::ONE);
        assert_eq!(image.get(3, 4), Color::ONE);
        assert_eq!(image.get(1, 1), Color::ZERO);
        assert_eq!(image.get(3, 3), Color::ZERO);
    }
}
