//! Error types for sparkstorm.
//!
//! Construction-time failures (bad configuration, unknown attractor tags) are
//! reported immediately through these types and never silently defaulted.
//! Numeric divergence during a running simulation is not an error: the step
//! functions contain it per-particle and the frame loop continues.

use std::fmt;

/// Errors raised when validating integration or field configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `dt` must be strictly positive.
    NonPositiveDt(f32),
    /// A streaming line needs at least one slot.
    ZeroWindowSize,
    /// A particle field needs at least one cell on each axis.
    ZeroGridSize { width: u32, height: u32 },
    /// Per-axis scale factors must be finite.
    NonFiniteScale,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDt(dt) => {
                write!(f, "Integration time step must be > 0, got {}", dt)
            }
            ConfigError::ZeroWindowSize => {
                write!(f, "Streaming line window size must be at least 1")
            }
            ConfigError::ZeroGridSize { width, height } => {
                write!(f, "Particle grid must be non-empty, got {}x{}", width, height)
            }
            ConfigError::NonFiniteScale => {
                write!(f, "Axis scale factors must be finite")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the attractor registry.
#[derive(Debug, Clone, PartialEq)]
pub enum AttractorError {
    /// The tag does not name one of the shipped attractor variants.
    UnknownAttractor(String),
}

impl fmt::Display for AttractorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttractorError::UnknownAttractor(tag) => write!(
                f,
                "Unknown attractor tag '{}'. Known tags: {}",
                tag,
                crate::attractor::Attractor::ALL
                    .iter()
                    .map(|a| a.tag())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl std::error::Error for AttractorError {}

/// Errors that can occur while acquiring a GPU context.
#[derive(Debug)]
pub enum GpuError {
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}
