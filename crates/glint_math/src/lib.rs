// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
mod util;

pub use interval::Interval;
pub use ray::{Ray, RAY_OFFSET};
pub use util::{align_zero, is_zero, EPSILON};
