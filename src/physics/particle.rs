use crate::error::{PhysicsError, Result};
use crate::math::Vector3;

use super::DEFAULT_DAMPING;

/// A point mass integrated with a Newton-Euler step.
///
/// Mass is stored as its inverse so that immovable particles are
/// representable (`inverse_mass == 0`) while zero mass is not.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vector3,
    velocity: Vector3,
    acceleration: Vector3,
    damping: f64,
    inverse_mass: f64,
    force_accum: Vector3,
}

impl Particle {
    /// Creates a unit-mass particle at rest at `position`.
    #[must_use]
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
            damping: DEFAULT_DAMPING,
            inverse_mass: 1.0,
            force_accum: Vector3::zero(),
        }
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets a constant acceleration (e.g. gravity) applied every step in
    /// addition to accumulated forces.
    #[must_use]
    pub fn with_acceleration(mut self, acceleration: Vector3) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Sets the fraction of velocity retained per second.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidParameter`] unless `0 < damping <= 1`.
    pub fn with_damping(mut self, damping: f64) -> Result<Self> {
        self.set_damping(damping)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidParameter`] if `mass` is not positive
    /// and finite.
    pub fn with_mass(mut self, mass: f64) -> Result<Self> {
        self.set_mass(mass)?;
        Ok(self)
    }

    /// Makes the particle immovable.
    #[must_use]
    pub fn with_infinite_mass(mut self) -> Self {
        self.inverse_mass = 0.0;
        self
    }

    #[must_use]
    pub fn position(&self) -> &Vector3 {
        &self.position
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    #[must_use]
    pub fn velocity(&self) -> &Vector3 {
        &self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    #[must_use]
    pub fn acceleration(&self) -> &Vector3 {
        &self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vector3) {
        self.acceleration = acceleration;
    }

    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidParameter`] unless `0 < damping <= 1`.
    pub fn set_damping(&mut self, damping: f64) -> Result<()> {
        if damping.is_nan() || damping <= 0.0 || damping > 1.0 {
            return Err(PhysicsError::InvalidParameter {
                parameter: "damping",
                value: damping,
            }
            .into());
        }
        self.damping = damping;
        Ok(())
    }

    /// Returns the mass, or `f64::INFINITY` for an immovable particle.
    #[must_use]
    pub fn mass(&self) -> f64 {
        if self.inverse_mass == 0.0 {
            f64::INFINITY
        } else {
            1.0 / self.inverse_mass
        }
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidParameter`] if `mass` is not positive
    /// and finite.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter {
                parameter: "mass",
                value: mass,
            }
            .into());
        }
        self.inverse_mass = mass.recip();
        Ok(())
    }

    #[must_use]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidParameter`] if `inverse_mass` is
    /// negative or not finite.
    pub fn set_inverse_mass(&mut self, inverse_mass: f64) -> Result<()> {
        if !inverse_mass.is_finite() || inverse_mass < 0.0 {
            return Err(PhysicsError::InvalidParameter {
                parameter: "inverse mass",
                value: inverse_mass,
            }
            .into());
        }
        self.inverse_mass = inverse_mass;
        Ok(())
    }

    #[must_use]
    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Adds a force to be applied during the next integration step only.
    pub fn add_force(&mut self, force: &Vector3) {
        self.force_accum.add_vector(force);
    }

    /// Sum of forces added since the last integration step.
    #[must_use]
    pub fn accumulated_force(&self) -> &Vector3 {
        &self.force_accum
    }

    pub fn clear_accumulator(&mut self) {
        self.force_accum.clear();
    }

    /// Advances the particle by `duration` seconds.
    ///
    /// Position is updated with the old velocity, then velocity with the
    /// combined acceleration, then damping is applied as `damping^duration`.
    /// The force accumulator is cleared afterwards. Immovable particles are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidDuration`] if `duration` is not
    /// positive.
    pub fn integrate(&mut self, duration: f64) -> Result<()> {
        if !self.has_finite_mass() {
            return Ok(());
        }
        if duration.is_nan() || duration <= 0.0 {
            return Err(PhysicsError::InvalidDuration(duration).into());
        }

        self.position.add_scaled_vector(duration, &self.velocity);

        let mut resulting_acc = self.acceleration;
        resulting_acc.add_scaled_vector(self.inverse_mass, &self.force_accum);
        self.velocity.add_scaled_vector(duration, &resulting_acc);

        self.velocity.multiply_scalar(self.damping.powf(duration));

        self.clear_accumulator();
        Ok(())
    }
}
