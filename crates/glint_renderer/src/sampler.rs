//! Per-pixel sampling: single ray, fixed grid, or adaptive supersampling.

use crate::{
    camera::Viewport, error::ConfigurationError, Camera, Color, RayTracer, RenderConfig,
};
use glint_math::{DVec3, Ray};

/// Corner points closer than this are treated as the same sample.
const SAME_POINT: f64 = 1e-9;

/// How rays are distributed over a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// One ray through the pixel center
    Single,
    /// One ray through the center of each cell of an N x N grid
    Grid(u32),
    /// Recursive corner sampling, subdividing down to 1/N of the pixel
    Adaptive(u32),
}

impl SamplingMode {
    pub fn from_config(config: &RenderConfig) -> Self {
        match (config.samples_per_pixel, config.adaptive) {
            (0 | 1, false) => SamplingMode::Single,
            (n, false) => SamplingMode::Grid(n),
            (n, true) => SamplingMode::Adaptive(n.max(1)),
        }
    }
}

/// Turns pixel coordinates into colors by tracing one or more camera rays.
pub struct Sampler<'a> {
    camera: &'a Camera,
    tracer: &'a dyn RayTracer,
    viewport: Viewport,
    nx: u32,
    ny: u32,
    mode: SamplingMode,
    tolerance: f64,
}

impl<'a> Sampler<'a> {
    /// Create a sampler for an `nx` x `ny` image, checking the camera setup.
    pub fn new(
        camera: &'a Camera,
        tracer: &'a dyn RayTracer,
        config: &RenderConfig,
        nx: u32,
        ny: u32,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        if nx == 0 || ny == 0 {
            return Err(ConfigurationError::EmptyTarget {
                width: nx,
                height: ny,
            });
        }
        Ok(Self {
            camera,
            tracer,
            viewport: camera.viewport()?,
            nx,
            ny,
            mode: SamplingMode::from_config(config),
            tolerance: config.color_tolerance,
        })
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Pixel size on the view plane.
    fn pixel_size(&self) -> (f64, f64) {
        (
            self.viewport.width / self.nx as f64,
            self.viewport.height / self.ny as f64,
        )
    }

    /// Color of pixel (col, row).
    pub fn pixel_color(&self, col: u32, row: u32) -> Color {
        let center = self
            .camera
            .pixel_center_on(&self.viewport, self.nx, self.ny, col, row);
        let (width, height) = self.pixel_size();

        match self.mode {
            SamplingMode::Single => self.trace_through(center),
            SamplingMode::Grid(n) => self.grid_sample(center, width, height, n),
            SamplingMode::Adaptive(n) => {
                let (min_width, min_height) = (width / n as f64, height / n as f64);
                self.adaptive_sample(center, width, height, min_width, min_height, &[])
            }
        }
    }

    /// Trace the camera ray through a point on the view plane.
    fn trace_through(&self, target: DVec3) -> Color {
        let location = self.camera.location();
        self.tracer.trace_ray(&Ray::new(location, target - location))
    }

    /// Uniform average over the cell centers of an n x n grid.
    fn grid_sample(&self, center: DVec3, width: f64, height: f64, n: u32) -> Color {
        let (right, up) = (self.camera.right(), self.camera.up());
        let cell = |i: u32| (i as f64 + 0.5) / n as f64 - 0.5;

        let mut sum = Color::ZERO;
        for i in 0..n {
            for j in 0..n {
                let target = center + right * (cell(j) * width) - up * (cell(i) * height);
                sum += self.trace_through(target);
            }
        }
        sum / (n * n) as f64
    }

    /// Adaptive supersampling of the region centered at `center`.
    ///
    /// Rays go through the four corners of the region, skipping corners already
    /// traced by the parent (`known`). When the new corner colors agree the region
    /// takes that color; otherwise each new corner's quadrant is sampled recursively
    /// and the results averaged. Regions smaller than twice the minimum size take the
    /// color of a single ray through their center.
    fn adaptive_sample(
        &self,
        center: DVec3,
        width: f64,
        height: f64,
        min_width: f64,
        min_height: f64,
        known: &[DVec3],
    ) -> Color {
        if width < min_width * 2.0 || height < min_height * 2.0 {
            return self.trace_through(center);
        }

        let (right, up) = (self.camera.right(), self.camera.up());
        let mut corners = Vec::with_capacity(4);
        let mut quadrants = Vec::with_capacity(4);
        let mut colors = Vec::with_capacity(4);

        for i in [-1.0, 1.0] {
            for j in [-1.0, 1.0] {
                let corner = center + right * (i * width / 2.0) + up * (j * height / 2.0);
                corners.push(corner);
                if !known.iter().any(|p| p.abs_diff_eq(corner, SAME_POINT)) {
                    quadrants.push(center + right * (i * width / 4.0) + up * (j * height / 4.0));
                    colors.push(self.trace_through(corner));
                }
            }
        }

        let Some(&first) = colors.first() else {
            return self.trace_through(center);
        };
        if colors.len() > 1 && colors.iter().all(|c| almost_equal(first, *c, self.tolerance)) {
            return first;
        }

        let sum: Color = quadrants
            .iter()
            .map(|q| self.adaptive_sample(*q, width / 2.0, height / 2.0, min_width, min_height, &corners))
            .sum();
        sum / quadrants.len() as f64
    }
}

/// True if no channel of `a` and `b` differs by more than `tolerance`.
pub fn almost_equal(a: Color, b: Color, tolerance: f64) -> bool {
    (a - b).abs().cmple(Color::splat(tolerance)).all()
}
