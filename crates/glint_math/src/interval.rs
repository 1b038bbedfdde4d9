//! Ranges of distances along a ray.

/// Bounds on ray distances. Either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distances in front of a ray origin and short of `max`, such as the stretch
    /// between a shaded point and a light `max` away.
    pub const fn before(max: f64) -> Self {
        Self::new(0.0, max)
    }

    /// True if `x` lies strictly inside `(min, max)`.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }
}
