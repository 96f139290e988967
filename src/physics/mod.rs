pub mod force;
pub mod particle;
pub mod world;

pub use force::{AnchoredSpring, Buoyancy, Bungee, Drag, ForceGenerator, Gravity, Spring};
pub use particle::Particle;
pub use world::{ParticleId, ParticleWorld};

/// Default fraction of velocity a particle retains per second.
pub const DEFAULT_DAMPING: f64 = 0.999;
