use glam::{Mat4, Vec3};
use instant::Instant;
use wgpu::util::DeviceExt;

use tree_core::{
    Camera, InstanceRaw, PhotoContent, PhotoInstance, RenderState, PLACEHOLDERS, SCENE_WGSL,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

// Stand-in tint for decoded photos; texture upload is outside this viewer.
const PHOTO_AREA_TINT: [f32; 4] = [0.82, 0.84, 0.88, 1.0];
const INITIAL_INSTANCE_CAPACITY: usize = 8192;

// Model matrix columns at locations 1..=4, color at 5.
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
];

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    card_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    bind_group: wgpu::BindGroup,
    camera: Camera,
    last_frame: Instant,
    // reused each frame: two records per photo
    photo_staging: Vec<InstanceRaw>,
}

fn make_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vert_entry: &str,
    frag_entry: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: model matrix columns + color
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(frag_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vert_entry),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
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

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<InstanceRaw>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Card plus photo-area records for one photo, in that draw order.
fn photo_records(photo: &PhotoInstance) -> [InstanceRaw; 2] {
    let base = photo.transform.matrix();
    let card = base * Mat4::from_scale(photo.frame.frame_size.extend(1.0));
    let area = base
        * Mat4::from_translation(photo.frame.photo_offset.extend(0.002))
        * Mat4::from_scale(photo.frame.photo_size.extend(1.0));
    let area_color = match photo.content {
        PhotoContent::Image { .. } => PHOTO_AREA_TINT,
        PhotoContent::Placeholder(i) => {
            let [r, g, b] = PLACEHOLDERS[i].accent;
            [r, g, b, 1.0]
        }
    };
    [
        InstanceRaw {
            model: card.to_cols_array_2d(),
            color: photo.instance.color,
        },
        InstanceRaw {
            model: area.to_cols_array_2d(),
            color: area_color,
        },
    ]
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
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
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            label: Some("scene"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Unit quad centered on the origin, two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let sprite_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            "vs_sprite",
            "fs_sprite",
            format,
        );
        let card_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            "vs_card",
            "fs_card",
            format,
        );

        let camera = Camera {
            aspect: config.width as f32 / config.height as f32,
            ..Camera::default()
        };

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            card_pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            bind_group,
            camera,
            last_frame: Instant::now(),
            photo_staging: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.camera.aspect = new_size.width as f32 / new_size.height as f32;
        self.surface.configure(&self.device, &self.config);
    }

    /// Seconds since the previous call; the core clamps long stalls itself.
    pub fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        dt.as_secs_f32()
    }

    fn ensure_capacity(&mut self, needed: usize) {
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!("[render] growing instance buffer {} -> {}", self.instance_capacity, capacity);
        self.instance_vb = create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }

    pub fn render(&mut self, state: &RenderState) -> Result<(), wgpu::SurfaceError> {
        self.camera.apply_pose(&state.camera);
        let eye: Vec3 = self.camera.eye;
        let (right, up) = self.camera.billboard_axes();
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: self.camera.view_proj().to_cols_array_2d(),
                eye: eye.extend(1.0).to_array(),
                cam_right: right.extend(0.0).to_array(),
                cam_up: up.extend(0.0).to_array(),
            }),
        );

        self.photo_staging.clear();
        for photo in &state.photos {
            self.photo_staging.extend_from_slice(&photo_records(photo));
        }
        let batched: usize = state.batches.iter().map(|b| b.len()).sum();
        self.ensure_capacity(batched + self.photo_staging.len());

        // Batched kinds: one contiguous range each, written straight from the batch
        let stride = std::mem::size_of::<InstanceRaw>() as u64;
        let mut ranges = Vec::with_capacity(state.batches.len());
        let mut next = 0u32;
        for batch in &state.batches {
            let start = next;
            next += batch.len() as u32;
            if !batch.is_empty() {
                self.queue
                    .write_buffer(&self.instance_vb, start as u64 * stride, batch.as_bytes());
            }
            ranges.push(start..next);
        }
        let photo_start = next;
        if !self.photo_staging.is_empty() {
            self.queue.write_buffer(
                &self.instance_vb,
                photo_start as u64 * stride,
                bytemuck::cast_slice(&self.photo_staging),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.01,
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
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));

            rpass.set_pipeline(&self.sprite_pipeline);
            for range in ranges {
                if !range.is_empty() {
                    rpass.draw(0..6, range);
                }
            }

            // Photos draw one at a time: card, then its photo area
            rpass.set_pipeline(&self.card_pipeline);
            for i in 0..state.photos.len() as u32 {
                let first = photo_start + i * 2;
                rpass.draw(0..6, first..first + 2);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
