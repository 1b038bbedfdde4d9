//! Glint Renderer - recursive CPU ray tracing
//!
//! A Whitted-style ray tracer: Phong local shading with shadows through transparent
//! occluders, recursive reflection and refraction with optional glossy blur,
//! grid or adaptive anti-aliasing, and a multi-threaded pixel scheduler.

mod camera;
mod cylinder;
mod error;
mod geometries;
mod intersectable;
mod light;
mod material;
mod pixel_manager;
mod plane;
mod polygon;
mod ray_tracer;
mod renderer;
mod sampler;
mod scene;
mod sphere;
mod triangle;
mod tube;

pub use camera::Camera;
pub use cylinder::Cylinder;
pub use error::{ConfigurationError, ConstructionError};
pub use geometries::Geometries;
pub use intersectable::{GeoPoint, Geometry, Intersectable};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Color, Material, Surface};
pub use pixel_manager::{render_pixels, PixelManager};
pub use plane::Plane;
pub use polygon::Polygon;
pub use ray_tracer::{RayTracer, WhittedTracer, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K};
pub use renderer::{color_to_rgba, render, ImageBuffer, PixelSink, RenderConfig};
pub use sampler::{almost_equal, Sampler, SamplingMode};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;

/// Re-export the math types used throughout the public API
pub use glint_math::{DVec3, Interval, Ray};
