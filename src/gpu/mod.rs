//! GPU resources for the particle field simulator.
//!
//! The simulation is render-to-texture: particle positions live in a pair of
//! ping-pong RGBA32Float targets advanced by a fullscreen pass
//! ([`fbo::ParticleFieldGpu`]), and a separate draw pass samples the latest
//! target as a per-vertex position source ([`points::PointCloud`]).

pub mod fbo;
pub mod points;

use crate::error::GpuError;

/// Handle to the device and queue the simulator records against.
///
/// Hosts that already own a surface hand their device over with
/// [`GpuContext::from_parts`]; offscreen use and tests go through
/// [`GpuContext::headless`].
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Wrap an existing device and queue.
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Acquire a device without a surface.
    pub fn headless() -> Result<Self, GpuError> {
        pollster::block_on(Self::request_headless())
    }

    async fn request_headless() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sparkstorm device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        Ok(Self { device, queue })
    }
}
