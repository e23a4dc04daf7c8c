//! Spark storms: bundles of independent streaming attractor lines.
//!
//! Each spark line owns a private integrator state and a fixed window of
//! rendered points, so lines never share mutable state and a storm can be
//! stepped once per frame with no synchronization. Randomness lives entirely
//! in construction (initial position on the unit sphere, per-line radius
//! jitter); stepping is deterministic after that, and a storm built with an
//! explicit seed is bit-reproducible.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::attractor::Attractor;
use crate::error::ConfigError;
use crate::integrator::{IntegrationConfig, Integrator};
use crate::stream::StreamingLine;

/// One streaming attractor line: integrator state plus its visible window.
///
/// The raw state integrates freely through the attractor's equations; the
/// rendered point is the state projected onto a sphere of the line's radius,
/// which keeps every spark of a storm at a comparable visual scale no matter
/// how far its trajectory wanders.
#[derive(Debug, Clone)]
pub struct SparkLine {
    integrator: Integrator,
    state: Vec3,
    seed_state: Vec3,
    radius: f32,
    buffer: StreamingLine,
}

impl SparkLine {
    /// Create a line starting at `initial`, with all window slots filled with
    /// the initial rendered point.
    pub fn new(
        integrator: Integrator,
        initial: Vec3,
        radius: f32,
        window: usize,
    ) -> Result<Self, ConfigError> {
        let rendered = initial.normalize_or_zero() * radius;
        Ok(Self {
            integrator,
            state: initial,
            seed_state: initial,
            radius,
            buffer: StreamingLine::new(window, rendered)?,
        })
    }

    /// Take one Euler step and push the new rendered point into the window.
    ///
    /// A divergent step resets the state to the line's initial condition
    /// instead of poisoning the window.
    pub fn advance(&mut self) -> Vec3 {
        self.state = self.integrator.step_contained(self.state, self.seed_state);
        let rendered = self.state.normalize_or_zero() * self.radius;
        self.buffer.advance(rendered);
        rendered
    }

    /// The current raw (unprojected) integrator state.
    pub fn state(&self) -> Vec3 {
        self.state
    }

    /// The rendered radius of this line.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The visible window, for per-frame read-out by a renderer.
    pub fn line(&self) -> &StreamingLine {
        &self.buffer
    }
}

/// A configured collection of spark lines, stepped once per frame.
///
/// Built with method chaining:
///
/// ```
/// use sparkstorm::{Attractor, SparkStorm};
///
/// let mut storm = SparkStorm::new(Attractor::LorenzMod2)
///     .with_count(15)
///     .with_window_size(100)
///     .with_base_radius(10.0)
///     .with_radius_variation(0.2)
///     .with_seed(7)
///     .build()
///     .unwrap();
///
/// storm.advance_all();
/// ```
pub struct SparkStorm {
    lines: Vec<SparkLine>,
}

impl SparkStorm {
    /// Start building a storm around the given attractor.
    pub fn new(attractor: Attractor) -> SparkStormBuilder {
        SparkStormBuilder {
            attractor,
            count: 15,
            window_size: 100,
            base_radius: 10.0,
            radius_variation: 0.2,
            config: IntegrationConfig::new(0.005),
            seed: None,
        }
    }

    /// Advance every line by one step.
    pub fn advance_all(&mut self) {
        for line in &mut self.lines {
            line.advance();
        }
    }

    /// The storm's lines.
    pub fn lines(&self) -> &[SparkLine] {
        &self.lines
    }

    /// Mutable access for hosts that step lines at different rates.
    pub fn lines_mut(&mut self) -> &mut [SparkLine] {
        &mut self.lines
    }
}

/// Builder for [`SparkStorm`].
pub struct SparkStormBuilder {
    attractor: Attractor,
    count: usize,
    window_size: usize,
    base_radius: f32,
    radius_variation: f32,
    config: IntegrationConfig,
    seed: Option<u64>,
}

impl SparkStormBuilder {
    /// Number of independent lines.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Window size (trail length) of every line.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Base rendered radius.
    pub fn with_base_radius(mut self, base_radius: f32) -> Self {
        self.base_radius = base_radius;
        self
    }

    /// Fractional per-line radius jitter (0.2 = ±20%).
    pub fn with_radius_variation(mut self, radius_variation: f32) -> Self {
        self.radius_variation = radius_variation;
        self
    }

    /// Integration time step.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.config.dt = dt;
        self
    }

    /// Per-axis post-scale for the Euler update.
    pub fn with_axis_scale(mut self, axis_scale: Vec3) -> Self {
        self.config.axis_scale = axis_scale;
        self
    }

    /// Warm-up steps discarded per line before its window starts filling.
    pub fn with_warmup(mut self, warmup: u32) -> Self {
        self.config.warmup = warmup;
        self
    }

    /// Seed for initial-condition sampling. With a seed the storm is
    /// bit-reproducible; without one it draws entropy from the system clock.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and spawn the lines.
    pub fn build(self) -> Result<SparkStorm, ConfigError> {
        let integrator = Integrator::new(self.attractor, self.config)?;

        let seed = self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut lines = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            let jitter = if self.radius_variation > 0.0 {
                rng.gen_range(-self.radius_variation..=self.radius_variation)
            } else {
                0.0
            };
            let radius = self.base_radius * (1.0 + jitter);

            let mut initial = random_on_sphere(&mut rng, 1.0);
            for _ in 0..self.config.warmup {
                initial = integrator.step_contained(initial, initial);
            }

            lines.push(SparkLine::new(
                integrator,
                initial,
                radius,
                self.window_size,
            )?);
        }

        Ok(SparkStorm { lines })
    }
}

/// Uniformly distributed point on a sphere surface.
fn random_on_sphere(rng: &mut SmallRng, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let cos_phi = rng.gen_range(-1.0_f32..1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
    Vec3::new(
        radius * sin_phi * theta.cos(),
        radius * sin_phi * theta.sin(),
        radius * cos_phi,
    )
}
