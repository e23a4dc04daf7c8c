//! Ping-pong render-to-texture simulation of a particle field.
//!
//! Particle state lives in two RGBA32Float targets of the grid's dimensions;
//! pixel `(i, j)` encodes one particle's position. Every tick binds the
//! current target as an input, draws a fullscreen triangle whose fragment
//! shader performs one Euler step per texel into the other target, then swaps
//! the slots. The two slots never alias within a tick, and command-encoder
//! pass ordering guarantees a tick's write completes before the next tick (or
//! the draw pass) reads it.
//!
//! A texel that steps to a non-finite or runaway value is reset to its
//! deterministic seed position instead of being written back. Diverged texels
//! are sampled by every later tick, so containment here is a correctness
//! requirement for the whole field, not cosmetics.

use wgpu::util::DeviceExt;

use crate::error::ConfigError;
use crate::field::FieldConfig;
use crate::gpu::GpuContext;
use crate::uniforms::{SimUniforms, SIM_UNIFORMS_WGSL};

/// Texture format of the position targets.
pub const POSITION_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

/// Positions whose magnitude exceeds this on any axis are treated as diverged.
const DIVERGENCE_LIMIT: f32 = 1.0e6;

/// One of the two ping-pong position targets.
struct PositionTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl PositionTarget {
    fn new(device: &wgpu::Device, config: &FieldConfig, index: usize) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("Position Target {}", index)),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: POSITION_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// GPU-resident particle field advanced by a fullscreen simulation pass.
pub struct ParticleFieldGpu {
    config: FieldConfig,
    slots: [PositionTarget; 2],
    /// Index of the slot holding the latest positions.
    current: usize,
    pipeline: wgpu::RenderPipeline,
    /// One bind group per slot, reading that slot as input.
    bind_groups: [wgpu::BindGroup; 2],
    uniform_buffer: wgpu::Buffer,
    ticks: u64,
}

impl ParticleFieldGpu {
    /// Allocate targets, seed them, and build the simulation pipeline.
    pub fn new(context: &GpuContext, config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let device = &context.device;

        let slots = [
            PositionTarget::new(device, &config, 0),
            PositionTarget::new(device, &config, 1),
        ];

        // Seed both slots so the first tick reads a defined field no matter
        // which slot is current.
        let seed = config.seed_texels();
        for slot in &slots {
            context.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &slot.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                bytemuck::cast_slice(&seed),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(config.width * 16),
                    rows_per_image: Some(config.height),
                },
                wgpu::Extent3d {
                    width: config.width,
                    height: config.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let uniforms = SimUniforms::for_field(&config);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sim Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shader_src = simulation_shader_wgsl(&config);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Simulation Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Simulation Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        // RGBA32Float is non-filterable without extra features
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_groups = [0, 1].map(|i| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("Simulation Bind Group {}", i)),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&slots[i].view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                ],
            })
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Simulation Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Simulation Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: POSITION_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            config,
            slots,
            current: 0,
            pipeline,
            bind_groups,
            uniform_buffer,
            ticks: 0,
        })
    }

    /// The field configuration this simulator was built for.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of ticks recorded so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Index of the slot holding the latest positions (0 or 1).
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Views of both position slots, for consumers that bind per-slot.
    pub fn slot_views(&self) -> [&wgpu::TextureView; 2] {
        [&self.slots[0].view, &self.slots[1].view]
    }

    /// The texture view holding the latest particle positions.
    pub fn position_texture(&self) -> &wgpu::TextureView {
        &self.slots[self.current].view
    }

    /// Upload fresh per-frame uniforms.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SimUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// The uniform buffer shared with the draw pass.
    pub fn uniform_buffer(&self) -> &wgpu::Buffer {
        &self.uniform_buffer
    }

    /// Record one simulation tick: read `current`, write the other slot, swap.
    pub fn tick(&mut self, encoder: &mut wgpu::CommandEncoder) {
        let next = 1 - self.current;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Simulation Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.slots[next].view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Every texel is overwritten by the fullscreen triangle
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_groups[self.current], &[]);
            pass.draw(0..3, 0..1);
        }
        self.current = next;
        self.ticks += 1;
    }
}

/// Generate the WGSL for the per-texel Euler-step pass.
///
/// The fragment shader reads the previous position with `textureLoad`,
/// applies the attractor delta scaled per axis, and writes the result back -
/// unless it diverged, in which case the texel resets to its seed position
/// derived from its own grid coordinate.
pub fn simulation_shader_wgsl(config: &FieldConfig) -> String {
    format!(
        r#"{uniforms_struct}

@group(0) @binding(0) var positions: texture_2d<f32>;
@group(0) @binding(1) var<uniform> uniforms: SimUniforms;

{delta_fn}
@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> @builtin(position) vec4<f32> {{
    // Fullscreen triangle
    var corners = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 3.0, -1.0),
        vec2<f32>(-1.0,  3.0),
    );
    return vec4<f32>(corners[vertex_index], 0.0, 1.0);
}}

@fragment
fn fs_main(@builtin(position) frag_coord: vec4<f32>) -> @location(0) vec4<f32> {{
    let texel = vec2<i32>(frag_coord.xy);
    let prev = textureLoad(positions, texel, 0).xyz;
    let next = prev + attractor_delta(prev, uniforms.dt) * uniforms.axis_scale;

    // A NaN/inf/runaway texel resets to its seed position. The comparison is
    // written so that NaN fails it.
    let runaway = !(abs(next.x) < {limit:.1}) || !(abs(next.y) < {limit:.1}) || !(abs(next.z) < {limit:.1});
    if runaway {{
        let seed = vec3<f32>(
            f32(texel.x) / {width:.1},
            f32(texel.y) / {height:.1},
            0.0,
        );
        return vec4<f32>(seed, 1.0);
    }}
    return vec4<f32>(next, 1.0);
}}
"#,
        uniforms_struct = SIM_UNIFORMS_WGSL,
        delta_fn = config.attractor.wgsl_delta_fn(),
        limit = DIVERGENCE_LIMIT,
        width = config.width as f32,
        height = config.height as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attractor::Attractor;

    #[test]
    fn test_shader_embeds_grid_and_attractor() {
        let config = FieldConfig::new(Attractor::Dadras, 128, 64);
        let wgsl = simulation_shader_wgsl(&config);
        assert!(wgsl.contains("dadras"));
        assert!(wgsl.contains("128.0"));
        assert!(wgsl.contains("64.0"));
        assert!(wgsl.contains("textureLoad(positions, texel, 0)"));
    }

    #[test]
    fn test_shader_contains_divergence_reset() {
        let config = FieldConfig::new(Attractor::Lorenz, 64, 64);
        let wgsl = simulation_shader_wgsl(&config);
        assert!(wgsl.contains("runaway"));
        assert!(wgsl.contains("1000000.0"));
    }
}
