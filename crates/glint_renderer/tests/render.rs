//! End-to-end renders through the public API.

use glint_renderer::{
    render, AmbientLight, Camera, Color, ConfigurationError, DVec3, ImageBuffer, Material, Plane, PointLight,
    RenderConfig, Scene, Sphere, Triangle, WhittedTracer,
};

const BACKGROUND: Color = Color::new(0.1, 0.2, 0.3);

fn camera() -> Camera {
    Camera::new(DVec3::ZERO, -DVec3::Z, DVec3::Y)
        .unwrap()
        .with_viewport_size(2.0, 2.0)
        .with_viewport_distance(1.0)
}

/// A single glowing sphere straight ahead of the camera.
fn glowing_sphere() -> Scene {
    Scene::new("glow")
        .with_background(BACKGROUND)
        .with_ambient_light(AmbientLight::new(Color::splat(0.1), DVec3::ONE))
        .with_geometry(
            Sphere::new(DVec3::new(0.0, 0.0, -10.0), 2.0)
                .unwrap()
                .with_emission(Color::new(0.5, 0.0, 0.0)),
        )
}

/// Lit scene exercising shadows, reflection and transparency.
fn lit_scene() -> Scene {
    Scene::new("lit")
        .with_background(BACKGROUND)
        .with_ambient_light(AmbientLight::new(Color::splat(0.15), DVec3::ONE))
        .with_geometry(
            Plane::new(DVec3::new(0.0, -2.0, 0.0), DVec3::Y)
                .unwrap()
                .with_material(Material::new().with_kd(DVec3::splat(0.5)).with_kr(DVec3::splat(0.3))),
        )
        .with_geometry(
            Sphere::new(DVec3::new(-1.0, 0.0, -8.0), 1.5)
                .unwrap()
                .with_emission(Color::new(0.2, 0.0, 0.0))
                .with_material(
                    Material::new()
                        .with_kd(DVec3::splat(0.4))
                        .with_ks(DVec3::splat(0.4))
                        .with_shininess(50)
                        .with_kt(DVec3::splat(0.5)),
                ),
        )
        .with_geometry(
            Triangle::new(
                DVec3::new(1.0, -2.0, -9.0),
                DVec3::new(3.0, -2.0, -9.0),
                DVec3::new(2.0, 1.0, -9.0),
            )
            .unwrap()
            .with_emission(Color::new(0.0, 0.2, 0.0))
            .with_material(Material::new().with_kd(DVec3::splat(0.6))),
        )
        .with_light(
            PointLight::new(Color::splat(1.0), DVec3::new(3.0, 5.0, -4.0))
                .with_attenuation(1.0, 0.01, 0.001)
                .unwrap(),
        )
}

#[test]
fn test_render_hits_and_misses() {
    let image = render(&glowing_sphere(), &camera(), &RenderConfig::default(), 5, 5).unwrap();

    // Center ray hits the sphere: ambient + emission, nothing else
    assert!(image.get(2, 2).abs_diff_eq(Color::new(0.6, 0.1, 0.1), 1e-12));
    // Corner rays miss everything
    assert_eq!(image.get(0, 0), BACKGROUND);
    assert_eq!(image.get(4, 4), BACKGROUND);
}

#[test]
fn test_threaded_render_matches_sequential() {
    let scene = lit_scene();
    let cam = camera();

    let sequential = RenderConfig::default();
    let threaded = RenderConfig {
        threads: 4,
        ..Default::default()
    };

    let a = render(&scene, &cam, &sequential, 24, 16).unwrap();
    let b = render(&scene, &cam, &threaded, 24, 16).unwrap();
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!(a.to_rgba(), b.to_rgba());
}

#[test]
fn test_adaptive_render_of_uniform_background() {
    let scene = Scene::new("empty").with_background(BACKGROUND);
    let config = RenderConfig {
        samples_per_pixel: 4,
        adaptive: true,
        threads: 2,
        ..Default::default()
    };

    let image = render(&scene, &camera(), &config, 8, 8).unwrap();
    assert!(image.pixels().iter().all(|c| *c == BACKGROUND));
}

#[test]
fn test_grid_sampling_inside_object() {
    let config = RenderConfig::from_json(r#"{ "samples_per_pixel": 3 }"#).unwrap();
    let image = render(&glowing_sphere(), &camera(), &config, 5, 5).unwrap();

    assert!(image.get(2, 2).abs_diff_eq(Color::new(0.6, 0.1, 0.1), 1e-12));
    assert!(image.get(0, 0).abs_diff_eq(BACKGROUND, 1e-12));
}

#[test]
fn test_configuration_errors_are_reported_before_rendering() {
    let scene = glowing_sphere();

    let bare = Camera::new(DVec3::ZERO, -DVec3::Z, DVec3::Y).unwrap();
    assert!(matches!(
        render(&scene, &bare, &RenderConfig::default(), 4, 4),
        Err(ConfigurationError::MissingViewportSize)
    ));

    let no_distance = bare.with_viewport_size(2.0, 2.0);
    assert!(matches!(
        render(&scene, &no_distance, &RenderConfig::default(), 4, 4),
        Err(ConfigurationError::MissingViewportDistance)
    ));

    let zero_samples = RenderConfig {
        samples_per_pixel: 0,
        ..Default::default()
    };
    assert!(matches!(
        render(&scene, &camera(), &zero_samples, 4, 4),
        Err(ConfigurationError::ZeroSamples)
    ));

    assert!(matches!(
        render(&scene, &camera(), &RenderConfig::default(), 0, 4),
        Err(ConfigurationError::EmptyTarget { width: 0, height: 4 })
    ));
}

#[test]
fn test_render_into_caller_buffer_with_grid() {
    let scene = glowing_sphere();
    let cam = camera();
    let tracer = WhittedTracer::new(&scene);
    let image = ImageBuffer::new(5, 5);

    let written = cam.render(&tracer, &image, &RenderConfig::default()).unwrap();
    assert_eq!(written, 25);

    cam.draw_grid(&image, 2, Color::ONE);
    assert_eq!(image.get(0, 2), Color::ONE);
    assert!(image.get(1, 1) != Color::ONE);
}
