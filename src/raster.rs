//! Writes a captured figure in the image format its file extension names.
//!
//! PNG keeps the figure density in a `pHYs` chunk and JPEG in its JFIF
//! header. The other formats carry pixels only.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::config::FigureConfig;
use crate::PlotError;

/// Formats an output path may name.
pub const WRITABLE_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Tga,
    ImageFormat::WebP,
];

const JPEG_QUALITY: u8 = 92;

/// Picks the output format from the extension of `path` (case-insensitive).
pub fn output_format(path: &Path) -> Result<ImageFormat, PlotError> {
    ImageFormat::from_path(path)
        .ok()
        .filter(|format| WRITABLE_FORMATS.contains(format))
        .ok_or_else(|| PlotError::UnsupportedFormat(path.to_path_buf()))
}

pub fn write_image(
    path: &Path,
    format: ImageFormat,
    image: RgbaImage,
    config: &FigureConfig,
) -> Result<(), PlotError> {
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        ImageFormat::Png => write_png(&mut out, &image, config.pixels_per_meter())?,
        ImageFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            encoder.set_pixel_density(PixelDensity::dpi(config.dpi.round() as u16));
            encoder.encode_image(&DynamicImage::ImageRgba8(image).to_rgb8())?;
        }
        // The figure background is opaque; only PNG keeps the alpha channel.
        other => DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .write_to(&mut out, other)?,
    }
    out.flush()?;
    Ok(())
}

fn write_png(out: impl Write, image: &RgbaImage, pixels_per_meter: u32) -> io::Result<()> {
    let mut encoder = png::Encoder::new(out, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_meter,
        yppu: pixels_per_meter,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}
