//! Phong material coefficients and per-surface shading data.

use glint_math::DVec3;

/// Color type alias (linear RGB, typically 0-1 per channel)
pub type Color = DVec3;

/// Phong material of a surface.
///
/// Every coefficient is per channel and expected in [0, 1]; this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse reflection coefficient
    pub kd: DVec3,
    /// Specular reflection coefficient
    pub ks: DVec3,
    /// Specular exponent
    pub shininess: i32,
    /// Transmittance: how much light passes through the surface
    pub kt: DVec3,
    /// Reflectance: how much light the surface mirrors
    pub kr: DVec3,
    /// Radius of the disk secondary rays are spread over. 0 = perfect mirror/glass.
    pub glossiness: f64,
}

impl Material {
    /// A black, opaque, non-reflective material.
    pub const NONE: Material = Material {
        kd: DVec3::ZERO,
        ks: DVec3::ZERO,
        shininess: 0,
        kt: DVec3::ZERO,
        kr: DVec3::ZERO,
        glossiness: 0.0,
    };

    /// Create a new material with no contribution on any channel.
    pub fn new() -> Self {
        Self::NONE
    }

    /// Set the diffuse coefficient.
    pub fn with_kd(mut self, kd: DVec3) -> Self {
        self.kd = kd;
        self
    }

    /// Set the specular coefficient.
    pub fn with_ks(mut self, ks: DVec3) -> Self {
        self.ks = ks;
        self
    }

    /// Set the specular exponent.
    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Set the transmittance.
    pub fn with_kt(mut self, kt: DVec3) -> Self {
        self.kt = kt;
        self
    }

    /// Set the reflectance.
    pub fn with_kr(mut self, kr: DVec3) -> Self {
        self.kr = kr;
        self
    }

    /// Set the glossiness disk radius.
    pub fn with_glossiness(mut self, glossiness: f64) -> Self {
        self.glossiness = glossiness.max(0.0);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::NONE
    }
}

/// What a geometry looks like: its own emitted light plus its material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}
