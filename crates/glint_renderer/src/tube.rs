//! Infinite tube (cylinder without caps) around an axis ray.

use crate::{
    error::ConstructionError,
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable},
    Color, Material, Surface,
};
use glint_math::{align_zero, is_zero, DVec3, Ray};

/// An infinite tube of fixed radius around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    pub(crate) axis: Ray,
    pub(crate) radius: f64,
    pub(crate) surface: Surface,
}

impl Tube {
    /// Create a new tube. The axis direction must be non-zero and the radius positive.
    pub fn new(axis: Ray, radius: f64) -> Result<Self, ConstructionError> {
        if !axis.direction().is_finite() || !axis.origin().is_finite() {
            return Err(ConstructionError::ZeroVector("tube axis"));
        }
        if radius <= 0.0 || !radius.is_finite() {
            return Err(ConstructionError::NonPositiveRadius(radius));
        }
        Ok(Self {
            axis,
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

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distances along `ray` at which it crosses the tube wall, ascending.
    ///
    /// Solves the sphere-style quadratic on the components orthogonal to the axis.
    /// Rays parallel to the axis and tangent rays do not hit.
    pub(crate) fn hit_distances(&self, ray: &Ray) -> Vec<f64> {
        let v = self.axis.direction();
        let dp = ray.origin() - self.axis.origin();
        let d = ray.direction();

        let d_perp = d - v * d.dot(v);
        let dp_perp = dp - v * dp.dot(v);

        let a = d_perp.length_squared();
        if is_zero(a) {
            return Vec::new();
        }
        let b = 2.0 * d_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        let near = align_zero((-b - sqrtd) / (2.0 * a));
        let far = align_zero((-b + sqrtd) / (2.0 * a));

        [near, far].into_iter().filter(|t| *t > 0.0).collect()
    }
}

impl Intersectable for Tube {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let points = self
            .hit_distances(ray)
            .into_iter()
            .map(|t| ray.at(t))
            .collect();
        geo_points(self, points)
    }
}

impl Geometry for Tube {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        tube_normal(&self.axis, point)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

/// Normal of a tube wall: from the point's projection on the axis to the point.
pub(crate) fn tube_normal(axis: &Ray, point: DVec3) -> DVec3 {
    let p0 = axis.origin();
    let projection = axis.direction().dot(point - p0);
    if is_zero(projection) {
        return (point - p0).normalize();
    }
    (point - axis.at(projection)).normalize()
}
