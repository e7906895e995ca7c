use crate::design::{Design, Geometry, Rgb};
use crate::raster::{apply_mask, fill_disc, rounded_square_mask, stroke_ring, stroke_segment};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::{self, FilterType},
    ColorType, ImageBuffer, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::Builder;

/// Where the store icon lands when no output path is given
pub const DEFAULT_OUTPUT: &str =
    "/home/user/llm_time_blocker/extension/assets/icons/icon128_store.png";

// Paint opacities for the white clock parts
const RING_ALPHA: u8 = 230;
const FACE_ALPHA: u8 = 30;
const MARKER_ALPHA: u8 = 200;
const HAND_ALPHA: u8 = 220;
const CAP_ALPHA: u8 = 240;

/// Everything one run of the renderer needs
#[derive(Debug, Clone)]
pub struct Options {
    pub output: PathBuf,
    pub design: Design,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            design: Design::default(),
        }
    }
}

fn white(alpha: u8) -> Rgba<u8> {
    Rgba([255, 255, 255, alpha])
}

fn opaque(rgb: Rgb) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

/// Fill the canvas with a top-to-bottom blend between two colors, fully opaque
pub fn paint_gradient(canvas: &mut RgbaImage, top: Rgb, bottom: Rgb) {
    let height = canvas.height();
    let span = height.saturating_sub(1).max(1) as f32;

    for (y, row) in canvas.enumerate_rows_mut() {
        let t = y as f32 / span;
        let mut color = [0u8, 0, 0, 255];
        for channel in 0..3 {
            color[channel] = (top[channel] as f32 * (1.0 - t) + bottom[channel] as f32 * t) as u8;
        }

        for (_, _, pixel) in row {
            *pixel = Rgba(color);
        }
    }
}

/// Draw the clock: ring, translucent face, hour markers, both hands and the center cap
pub fn draw_clock(canvas: &mut RgbaImage, geometry: &Geometry) {
    let center = (geometry.center, geometry.center);

    stroke_ring(
        canvas,
        center,
        geometry.clock_radius,
        geometry.ring_width,
        white(RING_ALPHA),
    );

    // The face goes through its own layer so its opacity is applied exactly once
    let mut face = ImageBuffer::from_pixel(canvas.width(), canvas.height(), Rgba([0, 0, 0, 0]));
    fill_disc(
        &mut face,
        center,
        geometry.clock_radius - geometry.ring_width,
        white(FACE_ALPHA),
    );
    imageops::overlay(canvas, &face, 0, 0);

    for index in 0..12 {
        fill_disc(
            canvas,
            geometry.marker_center(index),
            geometry.marker_size(index),
            white(MARKER_ALPHA),
        );
    }

    for hand in [geometry.hour_hand, geometry.minute_hand] {
        stroke_segment(
            canvas,
            center,
            hand.tip(geometry.center),
            hand.width,
            white(HAND_ALPHA),
        );
    }

    fill_disc(canvas, center, geometry.cap_radius, white(CAP_ALPHA));
}

/// Draw the prohibition ring and the slash from its upper right to lower left
pub fn draw_prohibition(canvas: &mut RgbaImage, geometry: &Geometry, color: Rgb) {
    let c = geometry.center;
    let red = opaque(color);

    stroke_ring(canvas, (c, c), geometry.ban_radius, geometry.ban_width, red);

    let offset = geometry.slash_reach * std::f32::consts::FRAC_PI_4.cos();
    stroke_segment(
        canvas,
        (c + offset, c - offset),
        (c - offset, c + offset),
        geometry.ban_width,
        red,
    );
}

/// Render the full artwork on the supersampled canvas
pub fn render_supersampled(design: &Design) -> RgbaImage {
    let geometry = design.geometry();
    let size = geometry.canvas;

    let mut canvas = ImageBuffer::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    paint_gradient(&mut canvas, design.gradient_top, design.gradient_bottom);

    let mask = rounded_square_mask(size, geometry.corner_radius);
    apply_mask(&mut canvas, &mask);

    draw_clock(&mut canvas, &geometry);
    draw_prohibition(&mut canvas, &geometry, design.ban_color);

    canvas
}

/// Render the icon at its final size
pub fn render_icon(design: &Design) -> RgbaImage {
    let canvas = render_supersampled(design);
    imageops::resize(&canvas, design.size, design.size, FilterType::Lanczos3)
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(())
}

/// Encode the icon into PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(image, &mut buf)?;
    Ok(buf)
}

/// Write the icon as PNG, replacing `path` only once the whole file is on disk
///
/// The directory holding `path` must already exist.
pub fn save_png_atomic(image: &RgbaImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same mode `File::create` asks for, narrowed by the umask
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let tmp = builder
        .tempfile_in(dir)
        .with_context(|| format!("Can't create a temporary file in {}", dir.display()))?;

    {
        let mut out_file = BufWriter::new(tmp.as_file());
        write_png(image, &mut out_file)?;
        out_file.flush().context("Failed to write PNG")?;
    }
    tmp.as_file().sync_all().context("Failed to sync PNG")?;

    tmp.persist(path)
        .with_context(|| format!("Failed to move PNG into place at {}", path.display()))?;
    Ok(())
}

pub fn generate_icon(options: &Options) -> Result<()> {
    let design = &options.design;
    design.validate()?;

    println!(
        "Rendering icon on a {0}x{0} canvas, downscaling to {1}x{1}...",
        design.supersample, design.size
    );
    let icon = render_icon(design);

    save_png_atomic(&icon, &options.output)?;
    println!(
        "✓ Saved {0}x{0} to {1}",
        design.size,
        options.output.display()
    );
    Ok(())
}
