//! Validates every generated WGSL shader with naga, without needing a GPU.

use sparkstorm::gpu::fbo::simulation_shader_wgsl;
use sparkstorm::gpu::points::point_cloud_shader_wgsl;
use sparkstorm::{Attractor, FieldConfig, IntegrationConfig, Vec3};

/// Validates WGSL code using naga.
fn validate_wgsl(code: &str) -> Result<(), String> {
    let module = naga::front::wgsl::parse_str(code)
        .map_err(|e| format!("WGSL parse error: {:?}", e))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| format!("WGSL validation error: {:?}", e))?;

    Ok(())
}

#[test]
fn simulation_shader_valid_for_every_attractor() {
    for attractor in Attractor::ALL {
        let config = FieldConfig::new(attractor, 256, 256);
        let wgsl = simulation_shader_wgsl(&config);
        validate_wgsl(&wgsl)
            .unwrap_or_else(|e| panic!("{} simulation shader invalid: {}", attractor.tag(), e));
    }
}

#[test]
fn simulation_shader_valid_with_scaled_axes() {
    let config = FieldConfig::new(Attractor::Lorenz, 64, 64).with_integration(
        IntegrationConfig::new(0.005).with_axis_scale(Vec3::new(1.0, 1.18, 0.8)),
    );
    validate_wgsl(&simulation_shader_wgsl(&config)).expect("scaled simulation shader invalid");
}

#[test]
fn point_cloud_shader_valid() {
    validate_wgsl(&point_cloud_shader_wgsl()).expect("point cloud shader invalid");
}
