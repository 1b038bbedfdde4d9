//! Example: render a small test scene to a PNG.
//!
//! Run with: cargo run --release --example simple_render -- [output.png] [config.json]
//!
//! The optional config is a partial `RenderConfig` in JSON, e.g.
//! `{ "samples_per_pixel": 4, "adaptive": true, "threads": 8 }`.

use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_renderer::{
    render, AmbientLight, Camera, Color, Cylinder, DVec3, DirectionalLight, Geometries, Material, Plane,
    PointLight, Polygon, Ray, RenderConfig, Scene, Sphere, SpotLight, Triangle,
};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;

fn build_scene() -> Result<Scene> {
    let floor = Plane::new(DVec3::new(0.0, -50.0, 0.0), DVec3::Y)?.with_material(
        Material::new()
            .with_kd(DVec3::splat(0.4))
            .with_ks(DVec3::splat(0.2))
            .with_shininess(20)
            .with_kr(DVec3::splat(0.2)),
    );

    let glass_ball = Sphere::new(DVec3::new(-40.0, -20.0, -120.0), 30.0)?
        .with_emission(Color::new(0.05, 0.05, 0.15))
        .with_material(
            Material::new()
                .with_kd(DVec3::splat(0.2))
                .with_ks(DVec3::splat(0.8))
                .with_shininess(120)
                .with_kt(DVec3::splat(0.6)),
        );

    let red_ball = Sphere::new(DVec3::new(45.0, -30.0, -160.0), 20.0)?
        .with_emission(Color::new(0.4, 0.05, 0.05))
        .with_material(
            Material::new()
                .with_kd(DVec3::splat(0.5))
                .with_ks(DVec3::splat(0.5))
                .with_shininess(60),
        );

    let mirror = Triangle::new(
        DVec3::new(-120.0, -50.0, -250.0),
        DVec3::new(120.0, -50.0, -250.0),
        DVec3::new(0.0, 120.0, -260.0),
    )?
    .with_emission(Color::new(0.02, 0.02, 0.02))
    .with_material(Material::new().with_kr(DVec3::splat(0.7)).with_glossiness(2.0));

    let tile = Polygon::new(vec![
        DVec3::new(70.0, -49.0, -90.0),
        DVec3::new(110.0, -49.0, -90.0),
        DVec3::new(110.0, -49.0, -130.0),
        DVec3::new(70.0, -49.0, -130.0),
    ])?
    .with_emission(Color::new(0.1, 0.3, 0.1))
    .with_material(Material::new().with_kd(DVec3::splat(0.3)));

    let pillar = Cylinder::new(Ray::new(DVec3::new(-90.0, -50.0, -180.0), DVec3::Y), 10.0, 80.0)?
        .with_emission(Color::new(0.2, 0.15, 0.05))
        .with_material(
            Material::new()
                .with_kd(DVec3::splat(0.5))
                .with_ks(DVec3::splat(0.3))
                .with_shininess(30),
        );

    let objects = Geometries::new()
        .with(glass_ball)
        .with(red_ball)
        .with(Geometries::new().with(mirror).with(tile).with(pillar));

    Ok(Scene::new("simple")
        .with_background(Color::new(0.05, 0.07, 0.1))
        .with_ambient_light(AmbientLight::new(Color::splat(0.15), DVec3::ONE))
        .with_geometries(objects)
        .with_geometry(floor)
        .with_light(
            PointLight::new(Color::new(0.8, 0.7, 0.6), DVec3::new(60.0, 80.0, -40.0))
                .with_attenuation(1.0, 0.0005, 0.00002)?,
        )
        .with_light(
            SpotLight::new(Color::new(0.6, 0.6, 0.9), DVec3::new(-40.0, 60.0, -60.0), DVec3::new(0.0, -1.0, -1.0))?
                .with_attenuation(1.0, 0.0001, 0.00001)?,
        )
        .with_light(DirectionalLight::new(Color::splat(0.2), DVec3::new(1.0, -1.0, -0.5))?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let output = args.get(1).map(String::as_str).unwrap_or("simple_render.png");
    let config = match args.get(2) {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            RenderConfig::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => RenderConfig {
            samples_per_pixel: 3,
            adaptive: true,
            threads: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            ..Default::default()
        },
    };

    let scene = build_scene()?;
    let camera = Camera::new(DVec3::ZERO, -DVec3::Z, DVec3::Y)?
        .with_viewport_size(150.0, 100.0)
        .with_viewport_distance(100.0);

    log::info!("Rendering scene '{}' to {}", scene.name, output);
    let start = Instant::now();
    let image = render(&scene, &camera, &config, WIDTH, HEIGHT)?;
    log::info!("Done in {:.2?}", start.elapsed());

    let png = image::RgbaImage::from_raw(WIDTH, HEIGHT, image.to_rgba()).context("image buffer size mismatch")?;
    png.save(output).with_context(|| format!("writing {output}"))?;

    Ok(())
}
