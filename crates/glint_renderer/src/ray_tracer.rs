//! Recursive Whitted-style shading.
//!
//! Colors are computed from:
//! - Local effects: emission plus Phong diffuse/specular from every light, dimmed
//!   by the transmittance of whatever lies between the point and the light
//! - Global effects: recursively traced reflection and straight-through
//!   transmission rays, optionally spread over a glossy grid
//!
//! Recursion stops at a fixed depth or once the accumulated attenuation of a path
//! drops below a minimum contribution, whichever comes first.

use crate::{Color, GeoPoint, Intersectable, LightSource, RenderConfig, Scene};
use glint_math::{align_zero, is_zero, DVec3, Interval, Ray};

/// Default recursion depth for reflection and refraction.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Paths whose attenuation falls below this on every channel are dropped.
pub const MIN_CALC_COLOR_K: f64 = 0.001;

/// Anything that can turn a ray into a color.
pub trait RayTracer: Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Whitted ray tracer over a read-only [`Scene`].
pub struct WhittedTracer<'s> {
    scene: &'s Scene,
    max_depth: u32,
    min_contribution: f64,
    glossy_rays: u32,
    glossy_distance: f64,
    glossy_grid_size: f64,
}

impl<'s> WhittedTracer<'s> {
    /// Create a tracer with the default depth, threshold and glossy grid.
    pub fn new(scene: &'s Scene) -> Self {
        Self::from_config(scene, &RenderConfig::default())
    }

    /// Create a tracer using the shading settings of `config`.
    pub fn from_config(scene: &'s Scene, config: &RenderConfig) -> Self {
        log::debug!(
            "Tracer for scene '{}': depth {}, min contribution {}",
            scene.name,
            config.max_depth,
            config.min_contribution
        );
        if scene.lights.is_empty() && scene.ambient_light.intensity() == Color::ZERO {
            log::warn!("Scene '{}' has no lights; only emission will be visible", scene.name);
        }
        if scene.geometries.is_empty() {
            log::warn!("Scene '{}' has no geometry", scene.name);
        }
        Self {
            scene,
            max_depth: config.max_depth,
            min_contribution: config.min_contribution,
            glossy_rays: config.glossy_rays,
            glossy_distance: config.glossy_distance,
            glossy_grid_size: config.glossy_grid_size,
        }
    }

    /// Set the recursion depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum path attenuation worth tracing.
    pub fn with_min_contribution(mut self, min_contribution: f64) -> Self {
        self.min_contribution = min_contribution;
        self
    }

    /// True if every channel of `k` is below the minimum contribution.
    #[inline]
    fn negligible(&self, k: DVec3) -> bool {
        k.cmplt(DVec3::splat(self.min_contribution)).all()
    }

    /// Color at `gp`, seen along `ray`, with `depth` levels of recursion left.
    fn calc_color(&self, gp: &GeoPoint<'_>, ray: &Ray, depth: u32, k: DVec3) -> Color {
        let color = self.local_effects(gp, ray, k);
        if depth <= 1 {
            return color;
        }
        color + self.global_effects(gp, ray, depth, k)
    }

    fn local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: DVec3) -> Color {
        let mut color = gp.geometry.emission();
        let v = ray.direction();
        let n = gp.normal();
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return color;
        }

        let material = gp.geometry.material();
        for light in &self.scene.lights {
            let l = light.direction_at(gp.point);
            let nl = align_zero(n.dot(l));

            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp, light.as_ref(), l, n);
            if self.negligible(ktr * k) {
                continue;
            }

            let il = light.intensity_at(gp.point) * ktr;
            let diffuse = material.kd * nl.abs();
            let r = l - n * (2.0 * nl);
            let specular = material.ks * (-v.dot(r)).max(0.0).powi(material.shininess);
            color += il * (diffuse + specular);
        }

        color
    }

    /// Fraction of `light` reaching `gp`: the product of the transmittance of every
    /// surface strictly between the point and the light.
    fn transparency(&self, gp: &GeoPoint<'_>, light: &dyn LightSource, l: DVec3, n: DVec3) -> DVec3 {
        let light_ray = Ray::offset(gp.point, -l, n);
        let Some(hits) = self.scene.geometries.intersect(&light_ray) else {
            return DVec3::ONE;
        };

        let origin = light_ray.origin();
        let between = Interval::before(light.distance_to(origin));
        let mut ktr = DVec3::ONE;
        for hit in hits {
            if between.surrounds(origin.distance(hit.point)) {
                ktr *= hit.geometry.material().kt;
                if self.negligible(ktr) {
                    break;
                }
            }
        }
        ktr
    }

    fn global_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, depth: u32, k: DVec3) -> Color {
        let material = gp.geometry.material();
        let n = gp.normal();
        let v = ray.direction();
        let mut color = Color::ZERO;

        let kkr = k * material.kr;
        if !self.negligible(kkr) {
            let r = v - n * (2.0 * v.dot(n));
            let reflected = Ray::offset(gp.point, r, n);
            let rays = self.secondary_rays(reflected, n, material.glossiness);
            color += self.average_secondary(&rays, depth, material.kr, kkr);
        }

        // Transmission continues straight through, without bending
        let kkt = k * material.kt;
        if !self.negligible(kkt) {
            let refracted = Ray::offset(gp.point, v, n);
            let rays = self.secondary_rays(refracted, n, material.glossiness);
            color += self.average_secondary(&rays, depth, material.kt, kkt);
        }

        color
    }

    /// Mean contribution of `rays`; rays that hit nothing contribute black.
    fn average_secondary(&self, rays: &[Ray], depth: u32, kx: DVec3, kkx: DVec3) -> Color {
        let sum: Color = rays
            .iter()
            .filter_map(|ray| {
                let hit = self.scene.geometries.closest_intersection(ray)?;
                Some(self.calc_color(&hit, ray, depth - 1, kkx) * kx)
            })
            .sum();
        sum / rays.len() as f64
    }

    /// The ideal secondary ray, plus a grid of rays spread around it when the
    /// surface is glossy.
    ///
    /// Grid targets lie on a square of side `glossiness * side / grid_size` centered
    /// on the ideal ray, `glossy_distance` away from its origin. Targets that would
    /// put the ray on the other side of the surface are dropped.
    fn secondary_rays(&self, ideal: Ray, normal: DVec3, glossiness: f64) -> Vec<Ray> {
        if is_zero(glossiness) || self.glossy_rays <= 1 {
            return vec![ideal];
        }

        let side = (self.glossy_rays as f64).sqrt().ceil() as u32;
        let dir = ideal.direction();
        let departure = align_zero(normal.dot(dir));
        let (right, up) = dir.any_orthonormal_pair();
        let center = ideal.at(self.glossy_distance);
        let step = glossiness / self.glossy_grid_size;
        let half = (side - 1) as f64 / 2.0;

        let mut rays = Vec::with_capacity((side * side) as usize + 1);
        rays.push(ideal);
        for i in 0..side {
            for j in 0..side {
                // The center cell of an odd grid is the ideal ray itself
                if i as f64 == half && j as f64 == half {
                    continue;
                }
                let target = center
                    + right * ((i as f64 - half) * step)
                    + up * ((j as f64 - half) * step);
                let Some(ray) = Ray::try_new(ideal.origin(), target - ideal.origin()) else {
                    continue;
                };
                if align_zero(normal.dot(ray.direction())) * departure > 0.0 {
                    rays.push(ray);
                }
            }
        }
        rays
    }
}

impl RayTracer for WhittedTracer<'_> {
    /// Background on a miss, else ambient plus the recursive color of the hit.
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.scene.geometries.closest_intersection(ray) {
            None => self.scene.background,
            Some(hit) => {
                self.scene.ambient_light.intensity()
                    + self.calc_color(&hit, ray, self.max_depth, DVec3::ONE)
            }
        }
    }
}
