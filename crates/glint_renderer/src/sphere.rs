//! Sphere primitive for ray tracing.

use crate::{
    error::ConstructionError,
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable},
    Color, Material, Surface,
};
use glint_math::{align_zero, DVec3, Ray};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: DVec3, radius: f64) -> Result<Self, ConstructionError> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(ConstructionError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
        })
    }

    /// Set the emitted color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distances along `ray` at which it crosses the sphere, ascending.
    fn hit_distances(&self, ray: &Ray) -> Vec<f64> {
        let p0 = ray.origin();

        // The center-to-origin vector is degenerate: the only hit is straight ahead
        if p0 == self.center {
            return vec![self.radius];
        }

        let u = self.center - p0;
        let tm = ray.direction().dot(u);
        let d_squared = (u.length_squared() - tm * tm).max(0.0);
        let d = d_squared.sqrt();

        // Tangent or missing rays do not count
        if align_zero(d - self.radius) >= 0.0 {
            return Vec::new();
        }

        let th = (self.radius * self.radius - d_squared).sqrt();
        let near = align_zero(tm - th);
        let far = align_zero(tm + th);

        [near, far].into_iter().filter(|t| *t > 0.0).collect()
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let points = self
            .hit_distances(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .collect();
        geo_points(self, points)
    }
}

impl Geometry for Sphere {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
