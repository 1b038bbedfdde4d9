use crate::{align_zero, DVec3};

/// Distance the origin of a secondary ray is pushed off the surface it leaves.
pub const RAY_OFFSET: f64 = 1e-3;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so `at(t)` returns the point
/// at distance `t` from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// The direction must be non-zero; a zero direction leaves a non-finite one, which
    /// geometry constructors reject. Use [`Ray::try_new`] for unchecked input.
    #[inline]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a new ray, or `None` if `direction` is zero-length or not finite.
    pub fn try_new(origin: DVec3, direction: DVec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Create a ray leaving a surface at `point`.
    ///
    /// The origin is moved by [`RAY_OFFSET`] along `normal`, towards the side of the
    /// surface the ray travels into, so the ray cannot re-hit the surface it starts on.
    pub fn offset(point: DVec3, direction: DVec3, normal: DVec3) -> Self {
        let nd = align_zero(normal.dot(direction));
        let origin = if nd == 0.0 {
            point
        } else {
            point + normal * RAY_OFFSET.copysign(nd)
        };
        Self::new(origin, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// The point closest to the ray origin, or `None` for an empty slice.
    pub fn closest_point(&self, points: &[DVec3]) -> Option<DVec3> {
        points.iter().copied().min_by(|a, b| {
            self.origin
                .distance_squared(*a)
                .total_cmp(&self.origin.distance_squared(*b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 3.0, 4.0));
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
        assert!(ray.direction().abs_diff_eq(DVec3::new(0.0, 0.6, 0.8), 1e-12));
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0));

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.5), DVec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_try_new_rejects_zero_direction() {
        assert!(Ray::try_new(DVec3::ONE, DVec3::ZERO).is_none());
        assert!(Ray::try_new(DVec3::ONE, DVec3::new(f64::NAN, 0.0, 0.0)).is_none());
        assert!(Ray::try_new(DVec3::ONE, DVec3::Y).is_some());

        // The unchecked constructor leaves a direction that is easy to detect
        assert!(!Ray::new(DVec3::ONE, DVec3::ZERO).direction().is_finite());
    }

    #[test]
    fn test_offset_follows_departure_side() {
        let p = DVec3::new(1.0, 1.0, 0.0);

        // Leaving along the normal moves the origin up
        let out = Ray::offset(p, DVec3::new(1.0, 0.0, 1.0), DVec3::Z);
        assert_eq!(out.origin(), p + DVec3::Z * RAY_OFFSET);

        // Leaving through the back moves it down
        let back = Ray::offset(p, DVec3::new(1.0, 0.0, -1.0), DVec3::Z);
        assert_eq!(back.origin(), p - DVec3::Z * RAY_OFFSET);

        // Grazing rays keep their origin
        let graze = Ray::offset(p, DVec3::X, DVec3::Z);
        assert_eq!(graze.origin(), p);
    }

    #[test]
    fn test_closest_point() {
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let points = [
            DVec3::new(0.0, 0.0, 5.0),
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(0.0, 0.0, 3.0),
        ];

        assert_eq!(ray.closest_point(&points), Some(DVec3::new(0.0, 0.0, 2.0)));
        assert_eq!(ray.closest_point(&[]), None);
    }
}
