//! Infinite plane primitive.

use crate::{
    error::ConstructionError,
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable},
    Color, Material, Surface,
};
use glint_math::{align_zero, is_zero, DVec3, Ray};

/// An infinite plane through a reference point.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: DVec3,
    /// Unit normal
    normal: DVec3,
    surface: Surface,
}

impl Plane {
    /// Create a plane from a point on it and a (not necessarily unit) normal.
    pub fn new(q0: DVec3, normal: DVec3) -> Result<Self, ConstructionError> {
        let normal = normal
            .try_normalize()
            .ok_or(ConstructionError::ZeroVector("plane normal"))?;
        Ok(Self {
            q0,
            normal,
            surface: Surface::default(),
        })
    }

    /// Create the plane through three points.
    ///
    /// The normal follows the right-hand rule on (p2 - p1) x (p3 - p1).
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> Result<Self, ConstructionError> {
        let normal = (p2 - p1)
            .cross(p3 - p1)
            .try_normalize()
            .ok_or(ConstructionError::DegenerateVertices)?;
        Ok(Self {
            q0: p1,
            normal,
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

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn point(&self) -> DVec3 {
        self.q0
    }

    /// Where `ray` crosses the plane, if in front of the origin.
    pub(crate) fn hit_point(&self, ray: &Ray) -> Option<DVec3> {
        let p0 = ray.origin();
        if p0 == self.q0 {
            return None;
        }

        let denominator = self.normal.dot(ray.direction());
        if is_zero(denominator) {
            // Parallel to the plane
            return None;
        }

        let t = align_zero(self.normal.dot(self.q0 - p0) / denominator);
        (t > 0.0).then(|| ray.at(t))
    }
}

impl Intersectable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let point = self.hit_point(ray)?;
        geo_points(self, vec![point])
    }
}

impl Geometry for Plane {
    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
