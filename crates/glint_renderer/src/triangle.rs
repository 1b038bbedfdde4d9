//! Triangle primitive for ray tracing.
//!
//! A triangle is the three-vertex [`Polygon`]: hits on an edge or a vertex are
//! excluded.

use crate::{
    error::ConstructionError,
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable},
    Color, Material, Polygon, Surface,
};
use glint_math::{DVec3, Ray};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    /// Create a new triangle from three vertices. Collinear vertices are rejected.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Result<Self, ConstructionError> {
        Ok(Self {
            polygon: Polygon::new(vec![v0, v1, v2])?,
        })
    }

    /// Set the emitted color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.polygon = self.polygon.with_emission(emission);
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.polygon = self.polygon.with_material(material);
        self
    }

    pub fn vertices(&self) -> &[DVec3] {
        self.polygon.vertices()
    }
}

impl Intersectable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let point = self.polygon.hit_point(ray)?;
        geo_points(self, vec![point])
    }
}

impl Geometry for Triangle {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        self.polygon.normal_at(point)
    }

    fn surface(&self) -> &Surface {
        self.polygon.surface()
    }
}
