//! Uniform block shared by the simulation and draw passes.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::field::FieldConfig;

/// Per-frame parameters uploaded once and bound by both GPU passes.
///
/// Field order matches [`SIM_UNIFORMS_WGSL`]; the trailing padding keeps the
/// Rust layout at the 112 bytes WGSL computes for the uniform struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SimUniforms {
    /// Camera matrix for the draw pass; the simulation pass ignores it.
    pub view_proj: [[f32; 4]; 4],
    /// External perturbation point, applied at draw time only.
    pub repel_point: [f32; 3],
    /// Strength of the draw-time repulsion bias (0 disables it).
    pub repel_strength: f32,
    /// Per-axis post-scale for the Euler update.
    pub axis_scale: [f32; 3],
    /// Euler time step.
    pub dt: f32,
    /// Elapsed time in seconds, for host-driven effects.
    pub time: f32,
    pub _padding: [f32; 3],
}

/// WGSL declaration matching [`SimUniforms`], spliced into generated shaders.
pub const SIM_UNIFORMS_WGSL: &str = r#"struct SimUniforms {
    view_proj: mat4x4<f32>,
    repel_point: vec3<f32>,
    repel_strength: f32,
    axis_scale: vec3<f32>,
    dt: f32,
    time: f32,
};"#;

impl SimUniforms {
    /// Uniforms for a field, with an identity camera and no repulsion.
    pub fn for_field(config: &FieldConfig) -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            repel_point: [0.0; 3],
            repel_strength: 0.0,
            axis_scale: config.integration.axis_scale.to_array(),
            dt: config.integration.dt,
            time: 0.0,
            _padding: [0.0; 3],
        }
    }

    /// Set the camera matrix.
    pub fn set_view_proj(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj.to_cols_array_2d();
    }

    /// Set the draw-time repulsion input.
    pub fn set_repulsion(&mut self, point: Vec3, strength: f32) {
        self.repel_point = point.to_array();
        self.repel_strength = strength;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attractor::Attractor;

    #[test]
    fn test_layout_matches_wgsl() {
        // mat4 (64) + vec3+f32 (16) + vec3+f32 (16) + f32 + pad (16)
        assert_eq!(std::mem::size_of::<SimUniforms>(), 112);
        assert_eq!(std::mem::size_of::<SimUniforms>() % 16, 0);
    }

    #[test]
    fn test_for_field_copies_integration() {
        let config = FieldConfig::new(Attractor::Lorenz, 64, 64);
        let uniforms = SimUniforms::for_field(&config);
        assert_eq!(uniforms.dt, config.integration.dt);
        assert_eq!(uniforms.axis_scale, [1.0, 1.0, 1.0]);
        assert_eq!(uniforms.repel_strength, 0.0);
    }
}
