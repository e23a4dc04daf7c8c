//! Forward Euler integration of attractor trajectories.
//!
//! One stepping primitive serves two entry points: [`Integrator::integrate`]
//! for bulk pre-computation of static lines, and [`Integrator::step`] for
//! incremental per-frame stepping where the caller owns the persistent state.
//!
//! The update is deliberately asymmetric per axis, matching the reference
//! behavior of the spark visuals:
//!
//!   x' = x + dt * dx * sx
//!   y' = y + dt * dy * sy
//!   z' = z + dt * dz * sz
//!
//! with `(sx, sy, sz)` the per-axis post-scale (sx historically 1.0). All
//! three derivatives are evaluated from the incoming state before any axis is
//! updated, and the integrator itself contains no randomness: identical
//! inputs produce bit-identical trajectories.

use glam::Vec3;

use crate::attractor::Attractor;
use crate::error::ConfigError;

/// Time step, per-axis post-scale and warm-up count for an integration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    /// Euler time step, must be > 0.
    pub dt: f32,
    /// Per-axis post-scale applied to each delta. Defaults to `Vec3::ONE`;
    /// the X component is a real parameter, not an implied 1.0.
    pub axis_scale: Vec3,
    /// Steps discarded before recording begins, skipping the transient
    /// before the trajectory settles onto the attractor manifold.
    pub warmup: u32,
}

impl IntegrationConfig {
    /// Config with the given time step, unit axis scale and no warm-up.
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            axis_scale: Vec3::ONE,
            warmup: 0,
        }
    }

    /// Set the per-axis post-scale.
    pub fn with_axis_scale(mut self, axis_scale: Vec3) -> Self {
        self.axis_scale = axis_scale;
        self
    }

    /// Set the number of discarded warm-up steps.
    pub fn with_warmup(mut self, warmup: u32) -> Self {
        self.warmup = warmup;
        self
    }

    /// Check the config, rejecting non-positive `dt` and non-finite scales.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0) {
            return Err(ConfigError::NonPositiveDt(self.dt));
        }
        if !self.axis_scale.is_finite() {
            return Err(ConfigError::NonFiniteScale);
        }
        Ok(())
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self::new(0.005)
    }
}

/// Advances a state through an attractor's equations with explicit Euler steps.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    attractor: Attractor,
    config: IntegrationConfig,
}

impl Integrator {
    /// Create an integrator, validating the config up front.
    pub fn new(attractor: Attractor, config: IntegrationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { attractor, config })
    }

    /// The attractor this integrator steps through.
    pub fn attractor(&self) -> Attractor {
        self.attractor
    }

    /// The validated configuration.
    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Perform exactly one Euler step and return the new state.
    #[inline]
    pub fn step(&self, p: Vec3) -> Vec3 {
        let delta = self.attractor.delta(p, self.config.dt);
        p + delta * self.config.axis_scale
    }

    /// One Euler step with divergence containment.
    ///
    /// If the step produces a non-finite component the state is abandoned and
    /// `fallback` (typically the last known-finite state or the initial seed)
    /// is returned instead, so a single bad step never halts a frame loop.
    #[inline]
    pub fn step_contained(&self, p: Vec3, fallback: Vec3) -> Vec3 {
        let next = self.step(p);
        if next.is_finite() {
            next
        } else {
            fallback
        }
    }

    /// Run `config.warmup` discarded steps, then `steps` recorded steps.
    ///
    /// Each recorded entry is the state after its step, so
    /// `integrate(s0, 1)[0] == step(s0)`.
    pub fn integrate(&self, start: Vec3, steps: usize) -> Vec<Vec3> {
        let mut state = start;
        for _ in 0..self.config.warmup {
            state = self.step(state);
        }

        let mut trajectory = Vec::with_capacity(steps);
        for _ in 0..steps {
            state = self.step(state);
            trajectory.push(state);
        }
        trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorenz_reference() -> Integrator {
        let config = IntegrationConfig::new(0.005).with_axis_scale(Vec3::new(1.0, 1.18, 0.8));
        Integrator::new(Attractor::Lorenz, config).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        assert_eq!(
            Integrator::new(Attractor::Lorenz, IntegrationConfig::new(0.0)).unwrap_err(),
            ConfigError::NonPositiveDt(0.0)
        );
        assert!(Integrator::new(Attractor::Lorenz, IntegrationConfig::new(-0.005)).is_err());
        assert!(Integrator::new(Attractor::Lorenz, IntegrationConfig::new(f32::NAN)).is_err());
    }

    #[test]
    fn test_rejects_non_finite_scale() {
        let config = IntegrationConfig::new(0.005).with_axis_scale(Vec3::new(1.0, f32::NAN, 1.0));
        assert_eq!(
            Integrator::new(Attractor::Lorenz, config).unwrap_err(),
            ConfigError::NonFiniteScale
        );
    }

    #[test]
    fn test_concrete_lorenz_scenario() {
        // From (2, 4, 4): dx = 20, dy = 44, dz = -8/3
        let next = lorenz_reference().step(Vec3::new(2.0, 4.0, 4.0));
        assert!((next.x - 2.1).abs() < 1e-6);
        assert!((next.y - 4.2596).abs() < 1e-6);
        assert!((next.z - 3.989_333_3).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic_bulk() {
        let integrator = lorenz_reference();
        let a = integrator.integrate(Vec3::new(2.0, 4.0, 4.0), 500);
        let b = integrator.integrate(Vec3::new(2.0, 4.0, 4.0), 500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_step_consistency() {
        for attractor in Attractor::ALL {
            let integrator =
                Integrator::new(attractor, IntegrationConfig::new(0.005)).unwrap();
            let s0 = Vec3::new(0.1, 0.2, 0.3);
            assert_eq!(integrator.integrate(s0, 1)[0], integrator.step(s0));
        }
    }

    #[test]
    fn test_warmup_skip_equivalence() {
        let s0 = Vec3::new(2.0, 4.0, 4.0);
        let warm = Integrator::new(
            Attractor::Lorenz,
            IntegrationConfig::new(0.005).with_warmup(100),
        )
        .unwrap();
        let cold = Integrator::new(Attractor::Lorenz, IntegrationConfig::new(0.005)).unwrap();

        let with_warmup = warm.integrate(s0, 50);
        let full = cold.integrate(s0, 150);
        assert_eq!(with_warmup.as_slice(), &full[100..]);
    }

    #[test]
    fn test_step_contained_falls_back() {
        let integrator = lorenz_reference();
        let fallback = Vec3::new(1.0, 1.0, 1.0);
        let poisoned = Vec3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(integrator.step_contained(poisoned, fallback), fallback);

        // A finite state steps normally
        let fine = Vec3::new(2.0, 4.0, 4.0);
        assert_eq!(
            integrator.step_contained(fine, fallback),
            integrator.step(fine)
        );
    }

    #[test]
    fn test_step_contained_never_goes_non_finite() {
        // Dequan with an absurd dt blows up fast; containment must hold the
        // state at its last finite value instead of propagating inf/NaN.
        let integrator =
            Integrator::new(Attractor::Dequan, IntegrationConfig::new(10.0)).unwrap();
        let seed = Vec3::new(0.1, 0.1, 0.1);
        let mut state = seed;
        for _ in 0..64 {
            state = integrator.step_contained(state, seed);
            assert!(state.is_finite());
        }
    }
}
