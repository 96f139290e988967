use slotmap::SlotMap;

use crate::error::{PhysicsError, Result};
use crate::math::Vector3;

use super::{ForceGenerator, Particle};

slotmap::new_key_type! {
    /// Unique identifier for a particle in a [`ParticleWorld`].
    pub struct ParticleId;
}

/// A force generator bound to the particle it acts on.
#[derive(Debug)]
struct Registration {
    particle: ParticleId,
    generator: Box<dyn ForceGenerator>,
}

/// Owns a set of particles and the force generators acting on them.
///
/// Particles are referenced by typed IDs (generational indices), so a
/// generator holding the ID of a removed particle simply stops producing
/// force instead of dangling.
#[derive(Debug, Default)]
pub struct ParticleWorld {
    particles: SlotMap<ParticleId, Particle>,
    registrations: Vec<Registration>,
}

impl ParticleWorld {
    /// Creates a new, empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Particle operations ---

    /// Inserts a particle and returns its ID.
    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = self.particles.insert(particle);
        tracing::debug!(?id, "particle added");
        id
    }

    /// Returns a reference to the particle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the particle is not in the world.
    pub fn particle(&self, id: ParticleId) -> Result<&Particle> {
        self.particles.get(id).ok_or_else(|| not_found(id))
    }

    /// Returns a mutable reference to the particle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the particle is not in the world.
    pub fn particle_mut(&mut self, id: ParticleId) -> Result<&mut Particle> {
        self.particles.get_mut(id).ok_or_else(|| not_found(id))
    }

    /// Removes a particle together with every generator registered on it.
    ///
    /// Generators registered on *other* particles that reference this one
    /// (springs, bungees) are kept and yield no force from now on.
    ///
    /// # Errors
    ///
    /// Returns an error if the particle is not in the world.
    pub fn remove_particle(&mut self, id: ParticleId) -> Result<Particle> {
        let particle = self.particles.remove(id).ok_or_else(|| not_found(id))?;
        let dropped = self.unregister(id);
        tracing::debug!(?id, dropped, "particle removed");
        Ok(particle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles.iter()
    }

    // --- Registry operations ---

    /// Registers `generator` to act on particle `id` every step.
    ///
    /// # Errors
    ///
    /// Returns an error if the particle is not in the world.
    pub fn register(
        &mut self,
        id: ParticleId,
        generator: impl ForceGenerator + 'static,
    ) -> Result<()> {
        if !self.particles.contains_key(id) {
            return Err(not_found(id));
        }
        self.registrations.push(Registration {
            particle: id,
            generator: Box::new(generator),
        });
        Ok(())
    }

    /// Removes every generator registered on particle `id` and returns how
    /// many were removed.
    pub fn unregister(&mut self, id: ParticleId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.particle != id);
        let removed = before - self.registrations.len();
        if removed > 0 {
            tracing::debug!(?id, removed, "force registrations dropped");
        }
        removed
    }

    pub fn clear_registrations(&mut self) {
        self.registrations.clear();
    }

    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    // --- Simulation ---

    /// Evaluates every registered generator and adds the resulting forces to
    /// the particles' accumulators.
    ///
    /// All forces are computed against the same snapshot of the world before
    /// any of them is applied.
    pub fn update_forces(&mut self, duration: f64) {
        let forces: Vec<(ParticleId, Vector3)> = self
            .registrations
            .iter()
            .filter_map(|r| {
                let particle = self.particles.get(r.particle)?;
                let force = r.generator.force(particle, self, duration)?;
                Some((r.particle, force))
            })
            .collect();

        for (id, force) in forces {
            if let Some(particle) = self.particles.get_mut(id) {
                particle.add_force(&force);
            }
        }
    }

    /// Integrates every particle forward by `duration` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` is not positive, even when every
    /// particle is immovable.
    pub fn integrate(&mut self, duration: f64) -> Result<()> {
        validate_duration(duration)?;
        for particle in self.particles.values_mut() {
            particle.integrate(duration)?;
        }
        Ok(())
    }

    /// Runs one simulation step: force update followed by integration.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` is not positive. No forces are
    /// accumulated in that case.
    pub fn step(&mut self, duration: f64) -> Result<()> {
        validate_duration(duration)?;
        tracing::trace!(
            duration,
            particles = self.particles.len(),
            registrations = self.registrations.len(),
            "world step"
        );
        self.update_forces(duration);
        self.integrate(duration)
    }
}

fn validate_duration(duration: f64) -> Result<()> {
    if duration.is_nan() || duration <= 0.0 {
        return Err(PhysicsError::InvalidDuration(duration).into());
    }
    Ok(())
}

fn not_found(id: ParticleId) -> crate::error::GfxError {
    PhysicsError::EntityNotFound(format!("particle {id:?}")).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::GfxError;
    use crate::physics::{AnchoredSpring, Drag, Gravity, Spring};

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn add_get_and_remove_particles() {
        let mut world = ParticleWorld::new();
        assert!(world.is_empty());

        let a = world.add_particle(Particle::new(v(1.0, 0.0, 0.0)));
        let b = world.add_particle(Particle::new(v(2.0, 0.0, 0.0)));
        assert_eq!(world.len(), 2);
        assert_eq!(world.particle(b).unwrap().position(), &v(2.0, 0.0, 0.0));

        world.particle_mut(a).unwrap().set_position(v(5.0, 0.0, 0.0));
        let removed = world.remove_particle(a).unwrap();
        assert_eq!(removed.position(), &v(5.0, 0.0, 0.0));
        assert_eq!(world.len(), 1);
        assert_eq!(world.iter().count(), 1);

        assert!(matches!(
            world.particle(a),
            Err(GfxError::Physics(PhysicsError::EntityNotFound(_)))
        ));
        assert!(world.remove_particle(a).is_err());
    }

    #[test]
    fn register_requires_existing_particle() {
        let mut world = ParticleWorld::new();
        let id = world.add_particle(Particle::new(Vector3::zero()));
        world.remove_particle(id).unwrap();
        assert!(world.register(id, Gravity::new(v(0.0, -1.0, 0.0))).is_err());
        assert_eq!(world.registration_count(), 0);
    }

    #[test]
    fn removing_particle_drops_its_registrations() {
        let mut world = ParticleWorld::new();
        let a = world.add_particle(Particle::new(Vector3::zero()));
        let b = world.add_particle(Particle::new(v(2.0, 0.0, 0.0)));
        world.register(a, Gravity::new(v(0.0, -1.0, 0.0))).unwrap();
        world.register(a, Drag::new(0.1, 0.0)).unwrap();
        world.register(b, Spring::new(a, 1.0, 1.0)).unwrap();
        assert_eq!(world.registration_count(), 3);

        world.remove_particle(a).unwrap();
        assert_eq!(world.registration_count(), 1);

        // b's spring now references a missing particle and yields nothing.
        world.update_forces(0.1);
        assert_eq!(world.particle(b).unwrap().accumulated_force(), &Vector3::zero());
    }

    #[test]
    fn unregister_and_clear() {
        let mut world = ParticleWorld::new();
        let a = world.add_particle(Particle::new(Vector3::zero()));
        world.register(a, Gravity::new(v(0.0, -1.0, 0.0))).unwrap();
        world.register(a, Drag::new(0.1, 0.0)).unwrap();
        assert_eq!(world.unregister(a), 2);
        assert_eq!(world.unregister(a), 0);

        world.register(a, Drag::new(0.1, 0.0)).unwrap();
        world.clear_registrations();
        assert_eq!(world.registration_count(), 0);
    }

    #[test]
    fn update_forces_accumulates_all_generators() {
        let mut world = ParticleWorld::new();
        let a = world.add_particle(Particle::new(Vector3::zero()).with_mass(2.0).unwrap());
        world.register(a, Gravity::new(v(0.0, -10.0, 0.0))).unwrap();
        world
            .register(a, AnchoredSpring::new(v(3.0, 0.0, 0.0), 1.0, 1.0))
            .unwrap();

        world.update_forces(0.1);
        // gravity (0, -20, 0) + spring toward anchor (2, 0, 0)
        let f = *world.particle(a).unwrap().accumulated_force();
        assert_relative_eq!(f.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(f.y, -20.0, epsilon = 1e-12);
    }

    #[test]
    fn spring_pair_is_symmetric() {
        let mut world = ParticleWorld::new();
        let a = world.add_particle(Particle::new(v(-2.0, 0.0, 0.0)));
        let b = world.add_particle(Particle::new(v(2.0, 0.0, 0.0)));
        world.register(a, Spring::new(b, 3.0, 2.0)).unwrap();
        world.register(b, Spring::new(a, 3.0, 2.0)).unwrap();

        world.update_forces(0.1);
        let fa = *world.particle(a).unwrap().accumulated_force();
        let fb = *world.particle(b).unwrap().accumulated_force();
        assert_relative_eq!(fa.x, 6.0, epsilon = 1e-12);
        assert_relative_eq!(fb.x, -6.0, epsilon = 1e-12);
    }

    #[test]
    fn step_falls_under_gravity() {
        let mut world = ParticleWorld::new();
        let a = world.add_particle(
            Particle::new(v(0.0, 100.0, 0.0))
                .with_damping(1.0)
                .unwrap(),
        );
        let anchor = world.add_particle(Particle::new(Vector3::zero()).with_infinite_mass());
        world.register(a, Gravity::new(v(0.0, -10.0, 0.0))).unwrap();
        world.register(anchor, Gravity::new(v(0.0, -10.0, 0.0))).unwrap();

        world.step(1.0).unwrap();
        let p = world.particle(a).unwrap();
        assert_eq!(p.position(), &v(0.0, 100.0, 0.0));
        assert_eq!(p.velocity(), &v(0.0, -10.0, 0.0));

        world.step(1.0).unwrap();
        let p = world.particle(a).unwrap();
        assert_eq!(p.position(), &v(0.0, 90.0, 0.0));
        assert_eq!(p.velocity(), &v(0.0, -20.0, 0.0));

        assert_eq!(world.particle(anchor).unwrap().position(), &Vector3::zero());
    }

    #[test]
    fn integrate_rejects_invalid_duration_for_immovable_world() {
        let mut world = ParticleWorld::new();
        world.add_particle(Particle::new(Vector3::zero()).with_infinite_mass());

        for duration in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                world.integrate(duration),
                Err(GfxError::Physics(PhysicsError::InvalidDuration(_)))
            ));
            assert!(world.step(duration).is_err());
        }
        assert!(ParticleWorld::new().integrate(0.0).is_err());
        assert!(world.integrate(0.5).is_ok());
    }

    #[test]
    fn step_rejects_invalid_duration_without_accumulating() {
        let mut world = ParticleWorld::new();
        let a = world.add_particle(Particle::new(Vector3::zero()));
        world.register(a, Gravity::new(v(0.0, -10.0, 0.0))).unwrap();

        assert!(world.step(0.0).is_err());
        assert_eq!(world.particle(a).unwrap().accumulated_force(), &Vector3::zero());
    }
}
