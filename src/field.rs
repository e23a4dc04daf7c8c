//! Particle field configuration and deterministic seeding.
//!
//! A particle field is a `W x H` grid with one particle per cell; on the GPU
//! each cell is one RGBA32Float texel of the simulation's ping-pong targets
//! (see [`crate::gpu::fbo`]). This module owns the CPU-side description: grid
//! dimensions, the attractor and integration parameters the simulation pass
//! will run, and the initial texel data.
//!
//! Seeding is a pure function of grid coordinates - particle `(i, j)` starts
//! at normalized `(i/W, j/H, 0)` - so the initial field is reproducible and
//! independent of iteration order.

use crate::attractor::Attractor;
use crate::error::ConfigError;
use crate::integrator::IntegrationConfig;

/// Configuration of a GPU-simulated particle field.
#[derive(Debug, Clone, Copy)]
pub struct FieldConfig {
    /// Grid width in particles (texels).
    pub width: u32,
    /// Grid height in particles (texels).
    pub height: u32,
    /// The attractor whose equations drive every cell.
    pub attractor: Attractor,
    /// Time step and axis scales for the per-texel Euler step.
    pub integration: IntegrationConfig,
}

impl FieldConfig {
    /// A `width x height` field stepped through `attractor` with default
    /// integration parameters.
    pub fn new(attractor: Attractor, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            attractor,
            integration: IntegrationConfig::default(),
        }
    }

    /// Override the integration parameters.
    pub fn with_integration(mut self, integration: IntegrationConfig) -> Self {
        self.integration = integration;
        self
    }

    /// Check grid dimensions and integration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroGridSize {
                width: self.width,
                height: self.height,
            });
        }
        self.integration.validate()
    }

    /// Total number of particles in the grid.
    pub fn particle_count(&self) -> u32 {
        self.width * self.height
    }

    /// The deterministic seed position of cell `(i, j)`.
    pub fn seed_position(&self, i: u32, j: u32) -> [f32; 3] {
        [
            i as f32 / self.width as f32,
            j as f32 / self.height as f32,
            0.0,
        ]
    }

    /// Initial contents of the position texture, row-major RGBA32Float.
    ///
    /// The alpha channel is held at 1.0; the simulation pass carries it
    /// through untouched.
    pub fn seed_texels(&self) -> Vec<f32> {
        let mut texels = Vec::with_capacity(self.particle_count() as usize * 4);
        for j in 0..self.height {
            for i in 0..self.width {
                let [x, y, z] = self.seed_position(i, j);
                texels.extend_from_slice(&[x, y, z, 1.0]);
            }
        }
        texels
    }
}
