use std::fmt::Debug;

use crate::error::{PhysicsError, Result};
use crate::math::{Vector3, TOLERANCE};

use super::{Particle, ParticleId, ParticleWorld};

/// Computes a force to apply to a particle for one simulation step.
///
/// Generators read the world but never mutate it; [`ParticleWorld`] adds the
/// returned force to the particle's accumulator.
pub trait ForceGenerator: Debug + Send + Sync {
    /// Returns the force acting on `particle`, or `None` when the generator
    /// has nothing to contribute this step.
    fn force(&self, particle: &Particle, world: &ParticleWorld, duration: f64) -> Option<Vector3>;
}

/// Constant gravitational acceleration, applied as a mass-scaled force.
#[derive(Debug, Clone)]
pub struct Gravity {
    gravity: Vector3,
}

impl Gravity {
    #[must_use]
    pub fn new(gravity: Vector3) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for Gravity {
    fn force(&self, particle: &Particle, _world: &ParticleWorld, _duration: f64) -> Option<Vector3> {
        particle
            .has_finite_mass()
            .then(|| self.gravity * particle.mass())
    }
}

/// Velocity-dependent drag with linear (`k1`) and quadratic (`k2`) terms.
#[derive(Debug, Clone)]
pub struct Drag {
    k1: f64,
    k2: f64,
}

impl Drag {
    #[must_use]
    pub fn new(k1: f64, k2: f64) -> Self {
        Self { k1, k2 }
    }
}

impl ForceGenerator for Drag {
    fn force(&self, particle: &Particle, _world: &ParticleWorld, _duration: f64) -> Option<Vector3> {
        let velocity = *particle.velocity();
        let speed = velocity.magnitude();
        if speed < TOLERANCE {
            return None;
        }
        let drag = self.k1 * speed + self.k2 * speed * speed;
        Some(velocity * (-drag / speed))
    }
}

/// Hooke's-law spring connecting a particle to another particle.
#[derive(Debug, Clone)]
pub struct Spring {
    other: ParticleId,
    spring_constant: f64,
    rest_length: f64,
}

impl Spring {
    #[must_use]
    pub fn new(other: ParticleId, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            other,
            spring_constant,
            rest_length,
        }
    }
}

impl ForceGenerator for Spring {
    fn force(&self, particle: &Particle, world: &ParticleWorld, _duration: f64) -> Option<Vector3> {
        let other = world.particle(self.other).ok()?;
        let displacement = *particle.position() - *other.position();
        hooke(displacement, self.spring_constant, self.rest_length)
    }
}

/// Hooke's-law spring connecting a particle to a fixed point.
#[derive(Debug, Clone)]
pub struct AnchoredSpring {
    anchor: Vector3,
    spring_constant: f64,
    rest_length: f64,
}

impl AnchoredSpring {
    #[must_use]
    pub fn new(anchor: Vector3, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            anchor,
            spring_constant,
            rest_length,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> &Vector3 {
        &self.anchor
    }

    /// Moves the anchor point, e.g. to follow the cursor.
    pub fn set_anchor(&mut self, anchor: Vector3) {
        self.anchor = anchor;
    }
}

impl ForceGenerator for AnchoredSpring {
    fn force(&self, particle: &Particle, _world: &ParticleWorld, _duration: f64) -> Option<Vector3> {
        hooke(*particle.position() - self.anchor, self.spring_constant, self.rest_length)
    }
}

/// A spring that only pulls: no force while slack.
#[derive(Debug, Clone)]
pub struct Bungee {
    other: ParticleId,
    spring_constant: f64,
    rest_length: f64,
}

impl Bungee {
    #[must_use]
    pub fn new(other: ParticleId, spring_constant: f64, rest_length: f64) -> Self {
        Self {
            other,
            spring_constant,
            rest_length,
        }
    }
}

impl ForceGenerator for Bungee {
    fn force(&self, particle: &Particle, world: &ParticleWorld, _duration: f64) -> Option<Vector3> {
        let other = world.particle(self.other).ok()?;
        let displacement = *particle.position() - *other.position();
        if displacement.magnitude() <= self.rest_length {
            return None;
        }
        hooke(displacement, self.spring_constant, self.rest_length)
    }
}

/// Buoyancy of a body floating in a liquid whose surface is the plane
/// `y = water_height`.
///
/// Between fully submerged and fully emerged the force grows linearly with
/// depth.
#[derive(Debug, Clone)]
pub struct Buoyancy {
    max_depth: f64,
    volume: f64,
    water_height: f64,
    liquid_density: f64,
}

impl Buoyancy {
    /// `max_depth` is the submersion depth at which the body generates its
    /// full buoyant force `liquid_density * volume`.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidParameter`] if `max_depth` is not
    /// positive.
    pub fn new(max_depth: f64, volume: f64, water_height: f64, liquid_density: f64) -> Result<Self> {
        if max_depth.is_nan() || max_depth <= 0.0 {
            return Err(PhysicsError::InvalidParameter {
                parameter: "max depth",
                value: max_depth,
            }
            .into());
        }
        Ok(Self {
            max_depth,
            volume,
            water_height,
            liquid_density,
        })
    }
}

impl ForceGenerator for Buoyancy {
    fn force(&self, particle: &Particle, _world: &ParticleWorld, _duration: f64) -> Option<Vector3> {
        let depth = particle.position().y;
        if depth >= self.water_height + self.max_depth {
            return None;
        }

        let full = self.liquid_density * self.volume;
        let lift = if depth <= self.water_height - self.max_depth {
            full
        } else {
            full * (self.water_height + self.max_depth - depth) / (2.0 * self.max_depth)
        };
        Some(Vector3::new(0.0, lift, 0.0))
    }
}

/// `-k (|d| - rest) d̂`, or `None` when the endpoints coincide.
fn hooke(displacement: Vector3, spring_constant: f64, rest_length: f64) -> Option<Vector3> {
    let length = displacement.magnitude();
    if length < TOLERANCE {
        return None;
    }
    let magnitude = -spring_constant * (length - rest_length);
    Some(displacement * (magnitude / length))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn assert_vec_eq(actual: Vector3, expected: Vector3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-12);
    }

    // ── Gravity ──

    #[test]
    fn gravity_scales_with_mass() {
        let world = ParticleWorld::new();
        let p = Particle::new(Vector3::zero()).with_mass(3.0).unwrap();
        let f = Gravity::new(v(0.0, -9.81, 0.0)).force(&p, &world, 0.1).unwrap();
        assert_vec_eq(f, v(0.0, -29.43, 0.0));
    }

    #[test]
    fn gravity_skips_immovable() {
        let world = ParticleWorld::new();
        let p = Particle::new(Vector3::zero()).with_infinite_mass();
        assert!(Gravity::new(v(0.0, -9.81, 0.0)).force(&p, &world, 0.1).is_none());
    }

    // ── Drag ──

    #[test]
    fn drag_opposes_velocity() {
        let world = ParticleWorld::new();
        let p = Particle::new(Vector3::zero()).with_velocity(v(3.0, 0.0, 4.0));
        // speed 5: 0.1 * 5 + 0.01 * 25 = 0.75
        let f = Drag::new(0.1, 0.01).force(&p, &world, 0.1).unwrap();
        assert_vec_eq(f, v(-0.45, 0.0, -0.6));
    }

    #[test]
    fn drag_at_rest_is_none() {
        let world = ParticleWorld::new();
        let p = Particle::new(Vector3::zero());
        assert!(Drag::new(0.1, 0.01).force(&p, &world, 0.1).is_none());
    }

    // ── Springs ──

    #[test]
    fn stretched_spring_pulls_toward_other() {
        let mut world = ParticleWorld::new();
        let other = world.add_particle(Particle::new(Vector3::zero()));
        let p = Particle::new(v(3.0, 0.0, 0.0));

        let f = Spring::new(other, 2.0, 1.0).force(&p, &world, 0.1).unwrap();
        assert_vec_eq(f, v(-4.0, 0.0, 0.0));
    }

    #[test]
    fn compressed_spring_pushes_away() {
        let mut world = ParticleWorld::new();
        let other = world.add_particle(Particle::new(Vector3::zero()));
        let p = Particle::new(v(0.0, 0.5, 0.0));

        let f = Spring::new(other, 2.0, 1.0).force(&p, &world, 0.1).unwrap();
        assert_vec_eq(f, v(0.0, 1.0, 0.0));
    }

    #[test]
    fn spring_to_missing_particle_is_none() {
        let mut world = ParticleWorld::new();
        let other = world.add_particle(Particle::new(Vector3::zero()));
        world.remove_particle(other).unwrap();
        let p = Particle::new(v(3.0, 0.0, 0.0));
        assert!(Spring::new(other, 2.0, 1.0).force(&p, &world, 0.1).is_none());
    }

    #[test]
    fn anchored_spring_at_rest_length_is_zero() {
        let world = ParticleWorld::new();
        let mut spring = AnchoredSpring::new(v(0.0, 10.0, 0.0), 5.0, 2.0);
        let p = Particle::new(v(0.0, 8.0, 0.0));
        assert_vec_eq(spring.force(&p, &world, 0.1).unwrap(), Vector3::zero());

        spring.set_anchor(v(0.0, 12.0, 0.0));
        assert_eq!(spring.anchor(), &v(0.0, 12.0, 0.0));
        assert_vec_eq(spring.force(&p, &world, 0.1).unwrap(), v(0.0, 10.0, 0.0));
    }

    #[test]
    fn anchored_spring_on_its_anchor_is_none() {
        let world = ParticleWorld::new();
        let spring = AnchoredSpring::new(v(1.0, 2.0, 3.0), 5.0, 2.0);
        let p = Particle::new(v(1.0, 2.0, 3.0 + TOLERANCE / 2.0));
        assert!(spring.force(&p, &world, 0.1).is_none());

        let p = Particle::new(v(1.0, 2.0, 3.0 + 1e-6));
        assert!(spring.force(&p, &world, 0.1).is_some());
    }

    #[test]
    fn bungee_is_slack_when_short() {
        let mut world = ParticleWorld::new();
        let other = world.add_particle(Particle::new(Vector3::zero()));
        let bungee = Bungee::new(other, 1.0, 2.0);

        let near = Particle::new(v(1.0, 0.0, 0.0));
        assert!(bungee.force(&near, &world, 0.1).is_none());

        let far = Particle::new(v(0.0, 0.0, 5.0));
        assert_vec_eq(bungee.force(&far, &world, 0.1).unwrap(), v(0.0, 0.0, -3.0));
    }

    // ── Buoyancy ──

    #[test]
    fn buoyancy_regimes() {
        let world = ParticleWorld::new();
        let b = Buoyancy::new(1.0, 2.0, 0.0, 1000.0).unwrap();

        let above = Particle::new(v(0.0, 1.5, 0.0));
        assert!(b.force(&above, &world, 0.1).is_none());

        let submerged = Particle::new(v(0.0, -3.0, 0.0));
        assert_vec_eq(b.force(&submerged, &world, 0.1).unwrap(), v(0.0, 2000.0, 0.0));

        let half = Particle::new(v(0.0, 0.0, 0.0));
        assert_vec_eq(b.force(&half, &world, 0.1).unwrap(), v(0.0, 1000.0, 0.0));
    }

    #[test]
    fn buoyancy_rejects_non_positive_depth() {
        assert!(Buoyancy::new(0.0, 1.0, 0.0, 1000.0).is_err());
    }
}
