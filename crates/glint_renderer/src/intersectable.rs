//! Intersectable and Geometry traits, and the GeoPoint hit type.

use std::fmt;

use crate::{Color, Material, Surface};
use glint_math::{DVec3, Ray};

/// A surface hit: the geometry that was hit and where.
///
/// Shading needs the owning geometry (for its normal and material), not just the
/// coordinates, so hits always carry a reference back to it.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a dyn Geometry,
    pub point: DVec3,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: DVec3) -> Self {
        Self { geometry, point }
    }

    /// Surface normal of the owning geometry at this point.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.geometry.normal_at(self.point)
    }
}

/// Equal when both the geometry identity and the point are equal.
impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.geometry, other.geometry) && self.point == other.point
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &(self.geometry as *const dyn Geometry as *const ()))
            .field("point", &self.point)
            .finish()
    }
}

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// All intersections of `ray` with this object at positive distance.
    ///
    /// `None` means no intersection; a returned vector is never empty.
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>>;

    /// Intersection coordinates only.
    fn intersect_points(&self, ray: &Ray) -> Option<Vec<DVec3>> {
        self.intersect(ray)
            .map(|hits| hits.into_iter().map(|gp| gp.point).collect())
    }

    /// The hit closest to the ray origin, if any.
    fn closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'_>> {
        let origin = ray.origin();
        self.intersect(ray)?.into_iter().min_by(|a, b| {
            origin
                .distance_squared(a.point)
                .total_cmp(&origin.distance_squared(b.point))
        })
    }
}

/// A single shaded surface: intersectable, with a normal field and a [`Surface`].
pub trait Geometry: Intersectable {
    /// Unit normal at a point on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;

    /// Emission and material of this geometry.
    fn surface(&self) -> &Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }
}

/// Attach `geometry` to raw hit points.
pub(crate) fn geo_points(geometry: &dyn Geometry, points: Vec<DVec3>) -> Option<Vec<GeoPoint<'_>>> {
    if points.is_empty() {
        return None;
    }
    Some(points.into_iter().map(|p| GeoPoint::new(geometry, p)).collect())
}
