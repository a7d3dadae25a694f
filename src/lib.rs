use clap::Parser;
use log::{debug, info};
use nalgebra::{Point3, Vector3, Vector4};

use crate::camera::Camera;
use crate::cli::{CliArguments, Command, RenderArguments, SimulateArguments};
use crate::physics::{cloth, ParticleSystem, SimParams};
use crate::render::Renderer;
use crate::tracer::environment::{Environment, EnvironmentMap, Sky};
use crate::tracer::scene::{Light, Material, Scene, Sphere};
use crate::tracer::RayTracer;
use crate::util::random_vec;

pub mod camera;
pub mod cli;
pub mod error;
pub mod physics;
pub mod render;
pub mod tracer;
pub mod util;

pub use error::{Error, Result};

// 0..1 범위 밖의 값은 잘라냄
pub fn vec4_to_rgba(color: &Vector4<f32>) -> [u8; 4] {
    color.map(|channel| (channel.clamp(0.0, 1.0) * 255.0) as u8).into()
}

pub fn run() -> Result<()> {
    // 로거 초기화. RUST_LOG가 없으면 info부터
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arguments = CliArguments::parse();
    match arguments.command {
        Command::Render(render) => run_render(render),
        Command::Simulate(simulate) => run_simulate(simulate),
    }
}

fn run_render(arguments: RenderArguments) -> Result<()> {
    let scene = Scene::demo();

    let environment: Box<dyn Environment> = match &arguments.environment {
        Some(path) => Box::new(EnvironmentMap::from_path(path)?),
        None => Box::new(Sky::default()),
    };

    let tracer = RayTracer::new(&scene, environment.as_ref(), arguments.bounces);
    let camera = Camera::look_at(
        Point3::new(0.0, 1.2, 6.0),
        Point3::new(0.0, -0.2, 0.0),
        45f32.to_radians(),
        (arguments.width, arguments.height),
    );
    let renderer = Renderer::new(render::Settings {
        samples: arguments.samples,
        keep_alpha: arguments.transparent,
    });

    info!(
        "rendering {} spheres, {} lights",
        scene.spheres.len(),
        scene.lights.len()
    );
    renderer.render_to_file(&tracer, &camera, &arguments.output)
}

fn simulation_params(arguments: &SimulateArguments) -> Result<SimParams> {
    physics::check_time_step(arguments.dt)?;

    let params = SimParams {
        stiffness: arguments.stiffness,
        damping: arguments.damping,
        particle_mass: arguments.mass,
        gravity: Vector3::new(0.0, -arguments.gravity, 0.0),
        restitution: arguments.restitution,
    };
    params.validate()?;
    Ok(params)
}

fn run_simulate(arguments: SimulateArguments) -> Result<()> {
    let params = simulation_params(&arguments)?;

    let (positions, triangles) = cloth::grid(arguments.resolution, 1.4, 0.8);
    let springs = cloth::springs_from_triangles(&positions, &triangles);

    // 완전히 평평하면 대칭이 깨지지 않으니 살짝 흔들어 줌
    let velocities = positions.iter().map(|_| random_vec(-0.05..0.05)).collect();
    let mut system = ParticleSystem::with_velocities(positions, velocities, springs)?;

    info!(
        "simulating {} particles, {} springs for {} steps (dt = {})",
        system.len(),
        system.springs().len(),
        arguments.steps,
        arguments.dt
    );

    let report_every = (arguments.steps / 10).max(1);
    for step in 1..=arguments.steps {
        system.step(arguments.dt, &params);

        if step % report_every == 0 {
            if let Some((min, max)) = system.bounds() {
                debug!(
                    "step {step}: kinetic energy {:.4}, y in [{:.3}, {:.3}]",
                    system.kinetic_energy(params.particle_mass),
                    min.y,
                    max.y
                );
            }
        }
    }

    info!(
        "finished after {} ticks, kinetic energy {:.4}",
        system.ticks(),
        system.kinetic_energy(params.particle_mass)
    );

    if let Some(path) = &arguments.render {
        render_particles(&system, path)?;
    }

    Ok(())
}

// 입자 하나당 작은 구 하나, 바닥은 상자 아래쪽 면에 닿는 큰 구
fn render_particles(system: &ParticleSystem, path: &std::path::Path) -> Result<()> {
    let fabric = Material::new(
        Vector3::new(0.85, 0.4, 0.2),
        Vector3::new(0.2, 0.2, 0.2),
        30.0,
    );
    let mut spheres: Vec<Sphere> = system
        .positions()
        .iter()
        .map(|position| Sphere::new(Point3::from(*position), 0.04, fabric))
        .collect();
    spheres.push(Sphere::new(
        Point3::new(0.0, -1001.04, 0.0),
        1000.0,
        Material::new(
            Vector3::new(0.4, 0.4, 0.45),
            Vector3::new(0.3, 0.3, 0.3),
            40.0,
        ),
    ));

    let scene = Scene::new(
        spheres,
        vec![Light::new(Point3::new(2.0, 4.0, 3.0), Vector3::new(1.0, 1.0, 1.0))],
    );
    let sky = Sky::default();
    let tracer = RayTracer::new(&scene, &sky, 2);
    let camera = Camera::look_at(
        Point3::new(2.2, 1.6, 3.2),
        Point3::new(0.0, -0.6, 0.0),
        45f32.to_radians(),
        (480, 360),
    );

    Renderer::new(render::Settings::default()).render_to_file(&tracer, &camera, path)
}
