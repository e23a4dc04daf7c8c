//! # sparkstorm - strange attractor engine
//!
//! Chaotic-attractor trajectories rendered two ways: streaming "spark" lines
//! stepped on the CPU once per frame, and GPU-resident particle fields
//! advanced by a ping-pong render-to-texture pass.
//!
//! The crate is the simulation core only. It produces ordered point
//! sequences and position textures; scene composition, cameras, controls and
//! styling belong to the host renderer.
//!
//! ## Streaming lines
//!
//! ```
//! use sparkstorm::prelude::*;
//!
//! let mut storm = SparkStorm::new(Attractor::LorenzMod2)
//!     .with_count(15)
//!     .with_window_size(100)
//!     .with_base_radius(10.0)
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut positions = Vec::new();
//! // Per frame:
//! storm.advance_all();
//! for line in storm.lines() {
//!     line.line().write_positions(&mut positions);
//!     // hand `positions` to the renderer as xyz triples, oldest to newest
//! }
//! ```
//!
//! ## GPU particle fields
//!
//! ```ignore
//! use sparkstorm::prelude::*;
//!
//! let context = GpuContext::headless()?;
//! let config = FieldConfig::new(Attractor::Lorenz, 128, 128)
//!     .with_integration(IntegrationConfig::new(0.005));
//! let mut field = ParticleFieldGpu::new(&context, config)?;
//! let cloud = PointCloud::new(&context, &field, wgpu::TextureFormat::Bgra8UnormSrgb);
//!
//! // Per frame:
//! let mut encoder = context.device.create_command_encoder(&Default::default());
//! field.tick(&mut encoder);               // Euler step every texel, then swap
//! // ... open a render pass on the host's target, then:
//! // cloud.draw(&mut pass, &field);
//! context.queue.submit([encoder.finish()]);
//! ```
//!
//! ## Core concepts
//!
//! - [`Attractor`] - closed registry of six derivative functions with fixed
//!   coefficients, looked up by tag; each also emits its WGSL form so the CPU
//!   and GPU paths share one definition.
//! - [`Integrator`] - forward Euler with per-axis post-scales; deterministic
//!   for fixed inputs, with divergence containment for per-frame use.
//! - [`StreamingLine`] - fixed-capacity window over an evolving trajectory;
//!   O(1) advance, never reallocates.
//! - [`SparkStorm`] - a seeded bundle of independent streaming lines.
//! - [`ParticleFieldGpu`] - two ping-pong position textures plus the
//!   fullscreen simulation pass; [`PointCloud`] draws the latest one.

pub mod attractor;
pub mod error;
pub mod field;
pub mod gpu;
pub mod integrator;
pub mod stream;
pub mod storm;
pub mod uniforms;

pub use bytemuck;
pub use glam::{Vec2, Vec3, Vec4};

pub use attractor::Attractor;
pub use error::{AttractorError, ConfigError, GpuError};
pub use field::FieldConfig;
pub use gpu::fbo::ParticleFieldGpu;
pub use gpu::points::PointCloud;
pub use gpu::GpuContext;
pub use integrator::{IntegrationConfig, Integrator};
pub use stream::StreamingLine;
pub use storm::{SparkLine, SparkStorm, SparkStormBuilder};
pub use uniforms::SimUniforms;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::attractor::Attractor;
    pub use crate::error::{AttractorError, ConfigError, GpuError};
    pub use crate::field::FieldConfig;
    pub use crate::gpu::fbo::ParticleFieldGpu;
    pub use crate::gpu::points::PointCloud;
    pub use crate::gpu::GpuContext;
    pub use crate::integrator::{IntegrationConfig, Integrator};
    pub use crate::stream::StreamingLine;
    pub use crate::storm::{SparkLine, SparkStorm};
    pub use crate::uniforms::SimUniforms;
    pub use crate::{Vec2, Vec3, Vec4};
}
