//! Projects a 5×5×5 grid of world-space points into clip space and logs the
//! result, then runs a short particle simulation.
//!
//! Usage:
//! ```text
//! cargo run --example projection_grid
//! RUST_LOG=gfxmath=trace cargo run --example projection_grid
//! ```

use gfxmath::math::{
    matrix4_product, multiply_matrix4_and_vector3, orthographic_projection_matrix4,
    y_rotation_matrix4, Vector3,
};
use gfxmath::physics::{AnchoredSpring, Drag, Gravity, Particle, ParticleWorld};
use gfxmath::GfxError;

fn main() -> Result<(), GfxError> {
    // Default: WARN for everything, INFO for gfxmath and this demo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=gfxmath=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("projection_grid=info".parse().unwrap_or_default())
        .add_directive("gfxmath=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    project_grid()?;
    simulate_pendulum()
}

fn project_grid() -> Result<(), GfxError> {
    let projection = orthographic_projection_matrix4(-20.0, 20.0, -20.0, 20.0, -20.0, 20.0)?;
    let view = y_rotation_matrix4(std::f64::consts::FRAC_PI_6);
    let matrix = matrix4_product(&projection, &view);
    tracing::info!(elements = ?matrix.get_elements(), "projection matrix");

    for i in 0..5_i32 {
        for j in 0..5_i32 {
            for k in 0..5_i32 {
                let point = Vector3::new(
                    f64::from(i * 10 - 20),
                    f64::from(j * 10 - 20),
                    f64::from(k * 10 - 20),
                );
                let projected = multiply_matrix4_and_vector3(&matrix, &point);
                tracing::info!(?point, ?projected, "projected");
            }
        }
    }
    Ok(())
}

fn simulate_pendulum() -> Result<(), GfxError> {
    let mut world = ParticleWorld::new();
    let bob = world.add_particle(
        Particle::new(Vector3::new(4.0, 0.0, 0.0))
            .with_mass(2.0)?
            .with_damping(0.95)?,
    );
    world.register(bob, Gravity::new(Vector3::new(0.0, -9.81, 0.0)))?;
    world.register(bob, Drag::new(0.05, 0.01))?;
    world.register(bob, AnchoredSpring::new(Vector3::new(0.0, 5.0, 0.0), 40.0, 3.0))?;

    let dt = 1.0 / 60.0;
    for frame in 0..180 {
        world.step(dt)?;
        if frame % 30 == 0 {
            let particle = world.particle(bob)?;
            tracing::info!(frame, position = ?particle.position(), "bob");
        }
    }
    Ok(())
}
