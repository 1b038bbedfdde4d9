//! Convex planar polygon primitive.
//!
//! Intersections are strict: a ray through an edge or a vertex does not hit.

use crate::{
    error::ConstructionError,
    intersectable::{geo_points, GeoPoint, Geometry, Intersectable},
    Color, Material, Plane, Surface,
};
use glint_math::{align_zero, is_zero, DVec3, Ray};

/// A convex polygon with at least three coplanar vertices, in order.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    /// Supporting plane, from the first three vertices
    plane: Plane,
}

impl Polygon {
    /// Create a polygon, validating that the vertices form a convex planar polygon.
    pub fn new(vertices: Vec<DVec3>) -> Result<Self, ConstructionError> {
        if vertices.len() < 3 {
            return Err(ConstructionError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let normal = plane.normal();

        if vertices[3..]
            .iter()
            .any(|v| !is_zero(normal.dot(*v - vertices[0])))
        {
            return Err(ConstructionError::NonCoplanarVertices);
        }

        // Every turn must bend the same way as the first one
        let n = vertices.len();
        for i in 0..n {
            let prev = vertices[(i + n - 1) % n];
            let curr = vertices[i];
            let next = vertices[(i + 1) % n];
            let turn = align_zero((curr - prev).cross(next - curr).dot(normal));
            if turn == 0.0 {
                return Err(ConstructionError::DegenerateVertices);
            }
            if turn < 0.0 {
                return Err(ConstructionError::NonConvexPolygon);
            }
        }

        Ok(Self { vertices, plane })
    }

    /// Set the emitted color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.plane = self.plane.with_emission(emission);
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.plane = self.plane.with_material(material);
        self
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn normal(&self) -> DVec3 {
        self.plane.normal()
    }

    /// Where `ray` enters the polygon's interior.
    ///
    /// The supporting plane hit is accepted only if the ray direction lies strictly on
    /// the same side of every face of the pyramid spanned by the ray origin and the
    /// edges.
    pub(crate) fn hit_point(&self, ray: &Ray) -> Option<DVec3> {
        let point = self.plane.hit_point(ray)?;

        let p0 = ray.origin();
        let dir = ray.direction();
        let n = self.vertices.len();
        let mut sign = 0.0;

        for i in 0..n {
            let vi = self.vertices[i] - p0;
            let vj = self.vertices[(i + 1) % n] - p0;
            let side = vi.cross(vj).try_normalize()?;
            let s = align_zero(dir.dot(side));
            if s == 0.0 || s * sign < 0.0 {
                return None;
            }
            sign = s;
        }

        Some(point)
    }
}

impl Intersectable for Polygon {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let point = self.hit_point(ray)?;
        geo_points(self, vec![point])
    }
}

impl Geometry for Polygon {
    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.plane.normal()
    }

    fn surface(&self) -> &Surface {
        self.plane.surface()
    }
}
