use crate::device::{Gpu, GpuFrame};
use crate::render::RenderSurface;

/// Uploads a [`RenderSurface`] and blits it onto the swapchain frame.
///
/// GPU objects are created lazily and rebuilt when the surface format or the
/// render surface size changes.
pub struct Presenter {
    filter: wgpu::FilterMode,

    pipeline: Option<wgpu::RenderPipeline>,
    pipeline_format: Option<wgpu::TextureFormat>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    texture: Option<wgpu::Texture>,
    texture_size: (u32, u32),
    bind_group: Option<wgpu::BindGroup>,
}

impl Presenter {
    /// Presenter scaling the surface with `filter` (see `GpuConfig::blit_filter`).
    pub fn new(filter: wgpu::FilterMode) -> Self {
        Self {
            filter,
            pipeline: None,
            pipeline_format: None,
            bind_group_layout: None,
            sampler: None,
            texture: None,
            texture_size: (0, 0),
            bind_group: None,
        }
    }

    /// Records the upload and the blit pass into `frame`.
    pub fn present(&mut self, gpu: &Gpu<'_>, frame: &mut GpuFrame, surface: &RenderSurface) {
        self.ensure_pipeline(gpu);
        self.ensure_sampler(gpu);
        self.ensure_texture(gpu, surface.width(), surface.height());

        let (Some(pipeline), Some(texture), Some(bind_group)) =
            (self.pipeline.as_ref(), self.texture.as_ref(), self.bind_group.as_ref())
        else {
            return;
        };

        gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            surface.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(surface.width() * 4),
                rows_per_image: Some(surface.height()),
            },
            wgpu::Extent3d {
                width: surface.width(),
                height: surface.height(),
                depth_or_array_layers: 1,
            },
        );

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("bugdash present pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, gpu: &Gpu<'_>) {
        let format = gpu.surface_format();
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let device = gpu.device();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bugdash blit shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bugdash blit bgl"),
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

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bugdash blit pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("bugdash blit pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        // The texture format follows the surface's sRGB-ness.
        self.texture = None;
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, gpu: &Gpu<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(gpu.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("bugdash blit sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: self.filter,
            min_filter: self.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_texture(&mut self, gpu: &Gpu<'_>, width: u32, height: u32) {
        if self.texture.is_some() && self.bind_group.is_some() && self.texture_size == (width, height) {
            return;
        }

        let (Some(bgl), Some(sampler)) = (self.bind_group_layout.as_ref(), self.sampler.as_ref()) else {
            return;
        };

        let format = if gpu.surface_format().is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("bugdash surface texture"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bugdash blit bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        log::debug!("present texture {width}x{height} {format:?}");
        self.texture = Some(texture);
        self.texture_size = (width, height);
        self.bind_group = Some(bind_group);
    }
}
