//! wgpu resources and the per-frame draw for the backdrop scene.

use backdrop_core::gpu::{
    beam_vertices, particle_instances, BeamVertex, DrawUniforms, Globals, ParticleInstance,
};
use backdrop_core::wave::WaveLayer;
use backdrop_core::{Scene, BEAM_COUNT, BEAM_OPACITY, PARTICLE_COUNT, PARTICLE_OPACITY, WAVE_OPACITY};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[derive(Debug, thiserror::Error)]
pub enum GpuInitError {
    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// One wave layer's GPU-side resources. The vertex buffer is rewritten every
/// frame from the deformed grid; the index buffer is shared across layers.
struct WaveLayerResources {
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    wave_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    beam_pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    wave_layers: Vec<WaveLayerResources>,
    wave_index_buffer: wgpu::Buffer,
    wave_index_count: u32,

    quad_vb: wgpu::Buffer,
    particle_instance_vb: wgpu::Buffer,
    particle_uniform_buffer: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,

    beam_vb: wgpu::Buffer,
    beam_bind_group: wgpu::BindGroup,

    particle_scratch: Vec<ParticleInstance>,
    beam_scratch: Vec<BeamVertex>,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window) -> Result<Self, GpuInitError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuInitError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop_shader"),
            source: wgpu::ShaderSource::Wgsl(backdrop_core::BACKDROP_WGSL.into()),
        });

        let globals_bgl = uniform_bind_group_layout(&device, "globals_bgl");
        let draw_bgl = uniform_bind_group_layout(&device, "draw_bgl");

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = uniform_bind_group(&device, &globals_bgl, &globals_buffer, "globals_bg");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("backdrop_pl"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });

        // Waves: line-list wireframe over a grid re-uploaded each frame.
        let wave_vertex_layout = [wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        }];
        let wave_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            "wave_pipeline",
            "vs_wave",
            "fs_wave",
            &wave_vertex_layout,
            wgpu::PrimitiveTopology::LineList,
            format,
        );

        // Particles: a unit quad instanced per particle.
        let particle_vertex_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let particle_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            "particle_pipeline",
            "vs_particle",
            "fs_particle",
            &particle_vertex_layouts,
            wgpu::PrimitiveTopology::TriangleList,
            format,
        );

        // Beams: line segments with per-vertex color.
        let beam_vertex_layout = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BeamVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 1,
                },
            ],
        }];
        let beam_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            "beam_pipeline",
            "vs_beam",
            "fs_beam",
            &beam_vertex_layout,
            wgpu::PrimitiveTopology::LineList,
            format,
        );

        // Per-layer wave buffers; the index buffer is identical for all
        // layers so it is built once.
        let indices = WaveLayer::grid_line_indices();
        let wave_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wave_ib"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let wave_index_count = indices.len() as u32;
        let wave_vb_size = (WaveLayer::vertex_count() * 3 * std::mem::size_of::<f32>()) as u64;
        let wave_layers = (0..backdrop_core::WAVE_LAYER_COUNT)
            .map(|i| {
                let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("wave_vb"),
                    size: wave_vb_size,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("wave_uniforms"),
                    size: std::mem::size_of::<DrawUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = uniform_bind_group(&device, &draw_bgl, &uniform_buffer, "wave_bg");
                log::debug!("wave layer {i} resources created");
                WaveLayerResources {
                    vertex_buffer,
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        // Quad vertices for two triangles.
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let particle_instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instance_vb"),
            size: (std::mem::size_of::<ParticleInstance>() * PARTICLE_COUNT) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let particle_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_uniforms"),
            size: std::mem::size_of::<DrawUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let particle_bind_group =
            uniform_bind_group(&device, &draw_bgl, &particle_uniform_buffer, "particle_bg");

        let beam_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("beam_vb"),
            size: (std::mem::size_of::<BeamVertex>() * BEAM_COUNT * 2) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Beams are drawn in world space; an identity transform satisfies the
        // shared pipeline layout.
        let beam_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("beam_uniforms"),
            contents: bytemuck::bytes_of(&DrawUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                color: [1.0, 1.0, 1.0, 1.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let beam_bind_group = uniform_bind_group(&device, &draw_bgl, &beam_uniform_buffer, "beam_bg");

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            wave_pipeline,
            particle_pipeline,
            beam_pipeline,
            globals_buffer,
            globals_bind_group,
            wave_layers,
            wave_index_buffer,
            wave_index_count,
            quad_vb,
            particle_instance_vb,
            particle_uniform_buffer,
            particle_bind_group,
            beam_vb,
            beam_bind_group,
            particle_scratch: Vec::with_capacity(PARTICLE_COUNT),
            beam_scratch: Vec::with_capacity(BEAM_COUNT * 2),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload the frame's scene state and encode a single render pass.
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: scene.camera.view_proj(),
            }),
        );
        for (wave, res) in scene.waves.iter().zip(&self.wave_layers) {
            self.queue
                .write_buffer(&res.vertex_buffer, 0, bytemuck::cast_slice(wave.vertices()));
            self.queue.write_buffer(
                &res.uniform_buffer,
                0,
                bytemuck::bytes_of(&DrawUniforms {
                    model: wave.model_matrix().to_cols_array_2d(),
                    color: [wave.color[0], wave.color[1], wave.color[2], WAVE_OPACITY],
                }),
            );
        }
        self.queue.write_buffer(
            &self.particle_uniform_buffer,
            0,
            bytemuck::bytes_of(&DrawUniforms {
                model: scene.particles.model_matrix().to_cols_array_2d(),
                color: [1.0, 1.0, 1.0, 1.0],
            }),
        );
        particle_instances(&scene.particles, PARTICLE_OPACITY, &mut self.particle_scratch);
        self.queue.write_buffer(
            &self.particle_instance_vb,
            0,
            bytemuck::cast_slice(&self.particle_scratch),
        );
        beam_vertices(&scene.beams, BEAM_OPACITY, &mut self.beam_scratch);
        self.queue
            .write_buffer(&self.beam_vb, 0, bytemuck::cast_slice(&self.beam_scratch));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("backdrop_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            rpass.set_pipeline(&self.wave_pipeline);
            for res in &self.wave_layers {
                rpass.set_bind_group(1, &res.bind_group, &[]);
                rpass.set_vertex_buffer(0, res.vertex_buffer.slice(..));
                rpass.set_index_buffer(self.wave_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.wave_index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_bind_group(1, &self.particle_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.particle_instance_vb.slice(..));
            rpass.draw(0..6, 0..self.particle_scratch.len() as u32);

            rpass.set_pipeline(&self.beam_pipeline);
            rpass.set_bind_group(1, &self.beam_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.beam_vb.slice(..));
            rpass.draw(0..self.beam_scratch.len() as u32, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn uniform_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    vs_entry: &str,
    fs_entry: &str,
    vertex_buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers: vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
