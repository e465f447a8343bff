//! Off-screen rendering of a figure through egui's wgpu renderer.

use eframe::egui;
use egui_wgpu::wgpu;
use image::RgbaImage;

use crate::config::FigureConfig;
use crate::figure::Figure;
use crate::{themes, widgets};

type HeadlessResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Lays `figure` out at the configured size, draws it into a texture and
/// reads the pixels back.
pub(crate) fn render(figure: &Figure, config: &FigureConfig) -> HeadlessResult<RgbaImage> {
    let _span = tracing::info_span!("headless_render").entered();
    let (device, queue) = request_device()?;
    let max_texture_side = device.limits().max_texture_dimension_2d as usize;

    let ctx = egui::Context::default();
    themes::install(&ctx, egui::ThemePreference::Light);

    // The first pass only populates the font atlas.
    let mut textures = egui::TexturesDelta::default();
    let mut output = run_frame(&ctx, figure, config, max_texture_side);
    textures.append(std::mem::take(&mut output.textures_delta));
    let mut output = run_frame(&ctx, figure, config, max_texture_side);
    textures.append(std::mem::take(&mut output.textures_delta));

    let [width, height] = config.size_pixels();
    let mut renderer =
        egui_wgpu::Renderer::new(&device, TARGET_FORMAT, egui_wgpu::RendererOptions::default());
    for (id, delta) in &textures.set {
        renderer.update_texture(&device, &queue, *id, delta);
    }
    let primitives = ctx.tessellate(output.shapes, output.pixels_per_point);
    let screen = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [width, height],
        pixels_per_point: output.pixels_per_point,
    };

    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("pacer-plot target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let rows = RowLayout::new(width);
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("pacer-plot readback"),
        size: u64::from(rows.padded) * u64::from(height),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("pacer-plot frame"),
    });
    let mut commands =
        renderer.update_buffers(&device, &queue, &mut encoder, &primitives, &screen);
    {
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pacer-plot pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(ctx.style().visuals.window_fill)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        renderer.render(&mut pass, &primitives, &screen);
    }
    encoder.copy_texture_to_buffer(
        target.as_image_copy(),
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(rows.padded),
                rows_per_image: Some(height),
            },
        },
        extent,
    );
    commands.push(encoder.finish());
    queue.submit(commands);

    let padded = map_buffer(&device, &readback)?;
    let image = RgbaImage::from_raw(width, height, rows.strip(&padded, height))
        .ok_or("readback is smaller than the render target")?;
    tracing::debug!(width, height, "captured figure");
    Ok(image)
}

fn request_device() -> HeadlessResult<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::default();
    let adapter = pollster::block_on(instance.request_adapter(&Default::default()))
        .or_else(|err| {
            tracing::debug!(%err, "no hardware adapter, trying the software fallback");
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
                force_fallback_adapter: true,
                ..Default::default()
            }))
        })?;
    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("pacer-plot"),
        ..Default::default()
    }))?;
    Ok((device, queue))
}

fn run_frame(
    ctx: &egui::Context,
    figure: &Figure,
    config: &FigureConfig,
    max_texture_side: usize,
) -> egui::FullOutput {
    let screen_rect = egui::Rect::from_min_size(egui::Pos2::ZERO, config.size_points());
    let mut input = egui::RawInput {
        screen_rect: Some(screen_rect),
        max_texture_side: Some(max_texture_side),
        ..Default::default()
    };
    input
        .viewports
        .entry(input.viewport_id)
        .or_default()
        .native_pixels_per_point = Some(config.pixels_per_point());

    ctx.run(input, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| widgets::figure(ui, figure, config));
    })
}

fn map_buffer(device: &wgpu::Device, buffer: &wgpu::Buffer) -> HeadlessResult<Vec<u8>> {
    let slice = buffer.slice(..);
    let (sender, receiver) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });
    device.poll(wgpu::PollType::wait_indefinitely())?;
    receiver.recv()??;
    let bytes = slice.get_mapped_range().to_vec();
    buffer.unmap();
    Ok(bytes)
}

/// Row sizes of an RGBA8 image. Buffer copies pad every row to
/// `COPY_BYTES_PER_ROW_ALIGNMENT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RowLayout {
    tight: u32,
    padded: u32,
}

impl RowLayout {
    fn new(width: u32) -> Self {
        let tight = width * 4;
        Self {
            tight,
            padded: tight.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT),
        }
    }

    fn strip(self, padded: &[u8], height: u32) -> Vec<u8> {
        padded
            .chunks(self.padded as usize)
            .take(height as usize)
            .flat_map(|row| &row[..self.tight as usize])
            .copied()
            .collect()
    }
}

/// The target is sRGB, so the clear value has to be linear.
fn clear_color(fill: egui::Color32) -> wgpu::Color {
    let [r, g, b, a] = egui::Rgba::from(fill).to_array();
    wgpu::Color {
        r: r.into(),
        g: g.into(),
        b: b.into(),
        a: a.into(),
    }
}
