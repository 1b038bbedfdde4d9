//! Light sources.
//!
//! The ambient term is a flat scene-wide color. Every other light implements
//! [`LightSource`] and is evaluated per shaded point.

use crate::{error::ConstructionError, Color};
use glint_math::DVec3;

/// Flat, position-independent ambient light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Ambient light of color `ia` scaled per channel by `ka`.
    pub fn new(ia: Color, ka: DVec3) -> Self {
        Self { intensity: ia * ka }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light that illuminates individual points.
pub trait LightSource: Send + Sync {
    /// Light intensity arriving at `point`.
    fn intensity_at(&self, point: DVec3) -> Color;

    /// Unit direction the light travels in when it reaches `point`.
    fn direction_at(&self, point: DVec3) -> DVec3;

    /// Distance from the light to `point`.
    fn distance_to(&self, point: DVec3) -> f64;
}

/// Light from infinitely far away along a fixed direction, with no falloff.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: DVec3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: DVec3) -> Result<Self, ConstructionError> {
        let direction = direction
            .try_normalize()
            .ok_or(ConstructionError::ZeroVector("light direction"))?;
        Ok(Self {
            intensity,
            direction,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: DVec3) -> Color {
        self.intensity
    }

    fn direction_at(&self, _point: DVec3) -> DVec3 {
        self.direction
    }

    fn distance_to(&self, _point: DVec3) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light at a position, attenuated by 1 / (kc + kl*d + kq*d^2).
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance falloff (kc = 1, kl = kq = 0).
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the constant, linear and quadratic attenuation factors. Each must be
    /// finite and non-negative, and at least one must be positive.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Result<Self, ConstructionError> {
        let factors = [kc, kl, kq];
        if factors.iter().any(|k| !k.is_finite() || *k < 0.0) || factors.iter().all(|k| *k == 0.0) {
            return Err(ConstructionError::InvalidAttenuation);
        }
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        Ok(self)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let d = self.position.distance(point);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn direction_at(&self, point: DVec3) -> DVec3 {
        (point - self.position).normalize_or_zero()
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }
}

/// A point light that shines mostly along one direction.
///
/// The point-light intensity is further scaled by the cosine between the spot
/// direction and the direction to the lit point, clamped at zero.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    point: PointLight,
    direction: DVec3,
}

impl SpotLight {
    pub fn new(intensity: Color, position: DVec3, direction: DVec3) -> Result<Self, ConstructionError> {
        let direction = direction
            .try_normalize()
            .ok_or(ConstructionError::ZeroVector("spot direction"))?;
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction,
        })
    }

    /// Set the constant, linear and quadratic attenuation factors.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Result<Self, ConstructionError> {
        self.point = self.point.with_attenuation(kc, kl, kq)?;
        Ok(self)
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let cos = self.direction.dot(self.point.direction_at(point)).max(0.0);
        self.point.intensity_at(point) * cos
    }

    fn direction_at(&self, point: DVec3) -> DVec3 {
        self.point.direction_at(point)
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.point.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_intensity() {
        let ambient = AmbientLight::new(Color::new(1.0, 0.5, 0.2), DVec3::splat(0.5));
        assert_eq!(ambient.intensity(), Color::new(0.5, 0.25, 0.1));
        assert_eq!(AmbientLight::default().intensity(), Color::ZERO);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::ONE, DVec3::new(0.0, -2.0, 0.0)).unwrap();
        let p = DVec3::new(100.0, 3.0, -7.0);

        assert_eq!(light.direction_at(p), -DVec3::Y);
        assert_eq!(light.intensity_at(p), Color::ONE);
        assert_eq!(light.distance_to(p), f64::INFINITY);

        assert!(DirectionalLight::new(Color::ONE, DVec3::ZERO).is_err());
    }

    #[test]
    fn test_point_light_falloff() {
        let light = PointLight::new(Color::splat(10.0), DVec3::ZERO)
            .with_attenuation(1.0, 1.0, 1.0)
            .unwrap();
        let p = DVec3::new(0.0, 2.0, 0.0);

        // 10 / (1 + 2 + 4)
        assert!(light.intensity_at(p).abs_diff_eq(Color::splat(10.0 / 7.0), 1e-12));
        assert_eq!(light.direction_at(p), DVec3::Y);
        assert_eq!(light.distance_to(p), 2.0);
    }

    #[test]
    fn test_attenuation_validation() {
        let light = PointLight::new(Color::ONE, DVec3::ZERO);
        for (kc, kl, kq) in [(0.0, 0.0, 0.0), (-1.0, 0.0, 0.0), (1.0, f64::NAN, 0.0), (1.0, 0.0, f64::INFINITY)] {
            assert_eq!(
                light.with_attenuation(kc, kl, kq).unwrap_err(),
                ConstructionError::InvalidAttenuation
            );
        }

        // Pure quadratic falloff is fine away from the light
        let quadratic = light.with_attenuation(0.0, 0.0, 1.0).unwrap();
        assert!(quadratic.intensity_at(DVec3::new(0.0, 0.0, 2.0)).abs_diff_eq(Color::splat(0.25), 1e-12));

        let spot = SpotLight::new(Color::ONE, DVec3::ZERO, DVec3::X).unwrap();
        assert!(spot.with_attenuation(0.0, 0.0, 0.0).is_err());
        assert!(spot.with_attenuation(1.0, 0.1, 0.0).is_ok());
    }

    #[test]
    fn test_spot_light_cone() {
        let light = SpotLight::new(Color::ONE, DVec3::ZERO, DVec3::X).unwrap();

        // Straight ahead: full intensity
        assert!(light.intensity_at(DVec3::new(3.0, 0.0, 0.0)).abs_diff_eq(Color::ONE, 1e-12));

        // 60 degrees off: half intensity
        let off = DVec3::new(0.5, 3f64.sqrt() / 2.0, 0.0);
        assert!(light.intensity_at(off).abs_diff_eq(Color::splat(0.5), 1e-9));

        // Behind: nothing
        assert_eq!(light.intensity_at(DVec3::new(-1.0, 0.0, 0.0)), Color::ZERO);
    }
}
