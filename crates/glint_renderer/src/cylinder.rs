//! Finite cylinder: a tube section closed by two planar caps.

use crate::{
    error::ConstructionError,
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable},
    tube::tube_normal,
    Color, Material, Surface, Tube,
};
use glint_math::{align_zero, is_zero, DVec3, Ray};

/// A capped cylinder starting at the axis origin and extending `height` along it.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a new cylinder. Radius and height must be positive.
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, ConstructionError> {
        if height <= 0.0 || !height.is_finite() {
            return Err(ConstructionError::NonPositiveHeight(height));
        }
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
        })
    }

    /// Set the emitted color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.tube = self.tube.with_emission(emission);
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.tube = self.tube.with_material(material);
        self
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    fn bottom_center(&self) -> DVec3 {
        self.tube.axis.origin()
    }

    fn top_center(&self) -> DVec3 {
        self.tube.axis.at(self.height)
    }

    /// Distance along `ray` to a cap disk centered at `center`, strictly inside the rim.
    fn cap_distance(&self, ray: &Ray, center: DVec3) -> Option<f64> {
        let v = self.tube.axis.direction();
        let denominator = v.dot(ray.direction());
        if is_zero(denominator) {
            return None;
        }
        let t = align_zero(v.dot(center - ray.origin()) / denominator);
        if t <= 0.0 {
            return None;
        }
        let radius_squared = self.tube.radius * self.tube.radius;
        (align_zero(ray.at(t).distance_squared(center) - radius_squared) < 0.0).then_some(t)
    }
}

impl Intersectable for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let axis = &self.tube.axis;

        // Wall hits strictly between the caps
        let mut distances: Vec<f64> = self
            .tube
            .hit_distances(ray)
            .into_iter()
            .filter(|t| {
                let along = align_zero(axis.direction().dot(ray.at(*t) - axis.origin()));
                along > 0.0 && align_zero(along - self.height) < 0.0
            })
            .collect();

        distances.extend(self.cap_distance(ray, self.bottom_center()));
        distances.extend(self.cap_distance(ray, self.top_center()));
        distances.sort_by(f64::total_cmp);

        geo_points(self, distances.into_iter().map(|t| ray.at(t)).collect())
    }
}

impl Geometry for Cylinder {
    /// Caps share the axis direction as normal; the wall uses the tube normal.
    fn normal_at(&self, point: DVec3) -> DVec3 {
        let v = self.tube.axis.direction();
        if is_zero(v.dot(point - self.bottom_center())) || is_zero(v.dot(point - self.top_center())) {
            return v;
        }
        tube_normal(&self.tube.axis, point)
    }

    fn surface(&self) -> &Surface {
        &self.tube.surface
    }
}
