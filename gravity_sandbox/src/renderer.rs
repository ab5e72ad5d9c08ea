//! Rendering system for the gravity sandbox

use std::ops::Range;

use common::{create_uniform_buffer, create_vertex_buffer, Camera2D, CameraUniform, GraphicsContext, Vertex};
use glam::DVec2;
use wgpu::util::DeviceExt;

use crate::scene::{circle_instances, debug_lines, grid_lines, CircleInstance};
use crate::view::ViewSettings;
use crate::world::World;

impl CircleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32,
        3 => Float32,
        4 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad vertex for instanced rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Unit quad vertices
const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

/// Draw ranges produced by [`Renderer::update_scene`]
#[derive(Debug, Clone, Default)]
pub struct FrameGeometry {
    pub grid: Range<u32>,
    pub overlay: Range<u32>,
    pub bodies: Range<u32>,
    pub marker: Range<u32>,
}

pub struct Renderer {
    circle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    line_capacity: usize,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    max_instances: usize,
}

fn alpha_blend_target(format: wgpu::TextureFormat) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        }),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    desc: PipelineDesc,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: desc.vs,
            buffers: desc.buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: desc.fs,
            targets: &alpha_blend_target(format),
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
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
    })
}

impl Renderer {
    /// `max_bodies` is fixed for a run; one extra slot holds the barycenter marker
    pub fn new(ctx: &GraphicsContext, max_bodies: usize) -> Self {
        let device = &ctx.device;
        let max_instances = max_bodies + 1;

        let circle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Circle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/circle.wgsl").into()),
        });
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let (width, height) = ctx.viewport();
        let camera_buffer = create_uniform_buffer(
            device,
            &CameraUniform::from_camera_2d(&Camera2D::new(width, height)),
        );

        let camera_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let circle_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            ctx.config.format,
            PipelineDesc {
                label: "Circle Pipeline",
                shader: &circle_shader,
                vs: "vs_circle",
                fs: "fs_circle",
                buffers: &[QuadVertex::layout(), CircleInstance::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        let line_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            ctx.config.format,
            PipelineDesc {
                label: "Line Pipeline",
                shader: &line_shader,
                vs: "vs_line",
                fs: "fs_line",
                buffers: &[Vertex::LAYOUT],
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (std::mem::size_of::<CircleInstance>() * max_instances) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Sized for the fine grid; grows if the overlay needs more
        let initial_lines = grid_lines(1.0);
        let line_buffer = create_vertex_buffer(device, &initial_lines);

        Self {
            circle_pipeline,
            line_pipeline,
            quad_buffer,
            instance_buffer,
            line_buffer,
            line_capacity: initial_lines.len(),
            camera_buffer,
            camera_bind_group,
            max_instances,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera_2d(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload this frame's grid, circles and debug overlay
    pub fn update_scene(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera2D,
        world: &World,
        barycenter: DVec2,
        view: ViewSettings,
    ) -> FrameGeometry {
        let mut lines = grid_lines(camera.zoom);
        let grid_end = lines.len() as u32;
        if view.debug {
            lines.extend(debug_lines(&world.bodies, barycenter));
        }
        let overlay_end = lines.len() as u32;
        self.upload_lines(device, queue, &lines);

        let mut instances = circle_instances(camera, &world.bodies, barycenter, view.debug);
        instances.truncate(self.max_instances);
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let body_end = world.bodies.len().min(instances.len()) as u32;
        FrameGeometry {
            grid: 0..grid_end,
            overlay: grid_end..overlay_end,
            bodies: 0..body_end,
            marker: body_end..instances.len() as u32,
        }
    }

    fn upload_lines(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        if vertices.len() > self.line_capacity {
            log::debug!("growing line buffer to {} vertices", vertices.len());
            self.line_buffer = create_vertex_buffer(device, vertices);
            self.line_capacity = vertices.len();
        } else if !vertices.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(vertices));
        }
    }

    /// Grid, bodies, debug lines, then the barycenter marker on top
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, geometry: &FrameGeometry) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
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

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        render_pass.set_pipeline(&self.line_pipeline);
        render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
        render_pass.draw(geometry.grid.clone(), 0..1);

        render_pass.set_pipeline(&self.circle_pipeline);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.draw(0..6, geometry.bodies.clone());

        if !geometry.overlay.is_empty() {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            render_pass.draw(geometry.overlay.clone(), 0..1);
        }

        if !geometry.marker.is_empty() {
            render_pass.set_pipeline(&self.circle_pipeline);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.draw(0..6, geometry.marker.clone());
        }
    }
}
