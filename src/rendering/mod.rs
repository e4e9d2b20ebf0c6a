//! Rendering system: display lists painted onto a persistent canvas texture,
//! then presented to the window.

mod batch;

pub use batch::{blend_state, build_batches, premultiply, to_ndc, Batch, Vertex};

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::canvas::{CompositeOp, DisplayList, StencilMode};
use crate::params::RenderConfig;

const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Stencil8;

/// Offscreen square canvas: color persists across frames, stencil does not
struct CanvasTarget {
    side: u32,
    _color: wgpu::Texture,
    _stencil: wgpu::Texture,
    color_view: wgpu::TextureView,
    stencil_view: wgpu::TextureView,
    blit_bind_group: wgpu::BindGroup,
    /// Cleared to black on the next render
    needs_clear: bool,
}

/// Rendering system managing wgpu device, pipelines and the canvas target
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    fill_stencil_pipeline: wgpu::RenderPipeline,
    coverage_stencil_pipeline: wgpu::RenderPipeline,
    cover_pipelines: Vec<(CompositeOp, wgpu::RenderPipeline)>,
    blit_pipeline: wgpu::RenderPipeline,
    blit_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    target: CanvasTarget,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("Failed to request device")?;

        // Canvas colors are authored in sRGB space: present them untouched
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let canvas_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("canvas.wgsl").into()),
        });

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        let canvas_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let fill_stencil_pipeline = canvas_pipeline(
            &device,
            &canvas_layout,
            &canvas_shader,
            "Fill Stencil Pipeline",
            None,
            wgpu::ColorWrites::empty(),
            stencil_write_state(
                wgpu::StencilOperation::IncrementWrap,
                wgpu::StencilOperation::DecrementWrap,
            ),
        );

        let coverage_stencil_pipeline = canvas_pipeline(
            &device,
            &canvas_layout,
            &canvas_shader,
            "Coverage Stencil Pipeline",
            None,
            wgpu::ColorWrites::empty(),
            stencil_write_state(
                wgpu::StencilOperation::IncrementClamp,
                wgpu::StencilOperation::IncrementClamp,
            ),
        );

        // Cover: paint where the stencil is set, resetting it for the next item
        let cover_face = wgpu::StencilFaceState {
            compare: wgpu::CompareFunction::NotEqual,
            fail_op: wgpu::StencilOperation::Keep,
            depth_fail_op: wgpu::StencilOperation::Keep,
            pass_op: wgpu::StencilOperation::Zero,
        };
        let cover_pipelines = CompositeOp::ALL
            .iter()
            .map(|&op| {
                let pipeline = canvas_pipeline(
                    &device,
                    &canvas_layout,
                    &canvas_shader,
                    "Cover Pipeline",
                    Some(blend_state(op)),
                    wgpu::ColorWrites::ALL,
                    stencil_state(cover_face, cover_face),
                );
                (op, pipeline)
            })
            .collect();

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let target = create_target(
            &device,
            &blit_layout,
            &sampler,
            RenderConfig::canvas_side(config.width, config.height),
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            fill_stencil_pipeline,
            coverage_stencil_pipeline,
            cover_pipelines,
            blit_pipeline,
            blit_layout,
            sampler,
            target,
        })
    }

    /// Side of the square canvas (pixels)
    pub fn canvas_side(&self) -> u32 {
        self.target.side
    }

    /// Reconfigure for a new window size; a new canvas side starts black
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        let side = RenderConfig::canvas_side(width, height);
        if side != self.target.side {
            log::debug!("Canvas resized to {}px", side);
            self.target = create_target(&self.device, &self.blit_layout, &self.sampler, side);
        }
    }

    /// Reapply the current surface configuration (after `Lost`/`Outdated`)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Paint a display list over the canvas and present it
    pub fn render(&mut self, list: &DisplayList) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let side = self.target.side as f32;
        let (vertices, batches) = build_batches(list, side);
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Canvas Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let canvas_load = if self.target.needs_clear {
            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
        } else {
            wgpu::LoadOp::Load
        };
        self.target.needs_clear = false;

        {
            let mut canvas_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: canvas_load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.target.stencil_view,
                    depth_ops: None,
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Discard,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(buffer) = &vertex_buffer {
                canvas_pass.set_vertex_buffer(0, buffer.slice(..));
                canvas_pass.set_stencil_reference(0);

                for batch in &batches {
                    let stencil_pipeline = match batch.stencil {
                        StencilMode::NonZero => &self.fill_stencil_pipeline,
                        StencilMode::Coverage => &self.coverage_stencil_pipeline,
                    };
                    canvas_pass.set_pipeline(stencil_pipeline);
                    canvas_pass.draw(batch.stencil_range.clone(), 0..1);

                    if let Some(cover) = self.cover_pipeline(batch.composite) {
                        canvas_pass.set_pipeline(cover);
                        canvas_pass.draw(batch.cover_range.clone(), 0..1);
                    }
                }
            }
        }

        {
            let mut blit_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Centre the square canvas in the window
            let x = (self.config.width - self.target.side) as f32 / 2.0;
            let y = (self.config.height - self.target.side) as f32 / 2.0;
            blit_pass.set_viewport(x, y, side, side, 0.0, 1.0);
            blit_pass.set_pipeline(&self.blit_pipeline);
            blit_pass.set_bind_group(0, &self.target.blit_bind_group, &[]);
            blit_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn cover_pipeline(&self, op: CompositeOp) -> Option<&wgpu::RenderPipeline> {
        self.cover_pipelines
            .iter()
            .find(|(mode, _)| *mode == op)
            .map(|(_, pipeline)| pipeline)
    }
}

fn stencil_write_state(
    front: wgpu::StencilOperation,
    back: wgpu::StencilOperation,
) -> wgpu::StencilState {
    let face = |pass_op| wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Always,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op,
    };
    stencil_state(face(front), face(back))
}

fn stencil_state(
    front: wgpu::StencilFaceState,
    back: wgpu::StencilFaceState,
) -> wgpu::StencilState {
    wgpu::StencilState {
        front,
        back,
        read_mask: 0xff,
        write_mask: 0xff,
    }
}

/// Triangle pipeline over [`Vertex`] with the given blend and stencil setup
fn canvas_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    blend: Option<wgpu::BlendState>,
    write_mask: wgpu::ColorWrites,
    stencil: wgpu::StencilState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x4,
                    },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: CANVAS_FORMAT,
                blend,
                write_mask,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Winding is counted, not culled
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: STENCIL_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil,
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_target(
    device: &wgpu::Device,
    blit_layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    side: u32,
) -> CanvasTarget {
    let size = wgpu::Extent3d {
        width: side,
        height: side,
        depth_or_array_layers: 1,
    };

    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Canvas Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: CANVAS_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let stencil = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Canvas Stencil"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: STENCIL_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
    let stencil_view = stencil.create_view(&wgpu::TextureViewDescriptor::default());

    let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Blit Bind Group"),
        layout: blit_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&color_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    CanvasTarget {
        side,
        _color: color,
        _stencil: stencil,
        color_view,
        stencil_view,
        blit_bind_group,
        needs_clear: true,
    }
}
