//! Hard-edged drawing primitives on RGBA canvases
//!
//! Shapes are sampled once per pixel at integer pixel coordinates, with no edge
//! anti-aliasing; smooth edges come from rendering large and downscaling afterwards.
//! Paint is applied with source-over blending.

use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgba, RgbaImage};

/// Blend `color` over `pixel` with `Pixel::blend`
///
/// Source-over onto an opaque pixel is opaque, but `blend` truncates its float alpha
/// and can land on 254 for translucent paint, so opaque pixels are pinned at 255.
pub fn paint(pixel: &mut Rgba<u8>, color: Rgba<u8>) {
    let opaque = pixel[3] == u8::MAX;
    pixel.blend(&color);
    if opaque {
        pixel[3] = u8::MAX;
    }
}

/// Visit every pixel whose coordinates fall in the given bounding box, clipped to the canvas
fn for_each_in_box(
    canvas: &mut RgbaImage,
    min: (f32, f32),
    max: (f32, f32),
    mut paint: impl FnMut(f32, f32, &mut Rgba<u8>),
) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let x0 = min.0.floor().max(0.0) as u32;
    let y0 = min.1.floor().max(0.0) as u32;
    let x1 = (max.0.ceil().max(0.0) as u32).min(width - 1);
    let y1 = (max.1.ceil().max(0.0) as u32).min(height - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            paint(x as f32, y as f32, canvas.get_pixel_mut(x, y));
        }
    }
}

/// Fill a disc of the given radius
pub fn fill_disc(canvas: &mut RgbaImage, center: (f32, f32), radius: f32, color: Rgba<u8>) {
    let (cx, cy) = center;
    let r2 = radius * radius;

    for_each_in_box(
        canvas,
        (cx - radius, cy - radius),
        (cx + radius, cy + radius),
        |x, y, pixel| {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r2 {
                paint(pixel, color);
            }
        },
    );
}

/// Stroke a circle outline lying just inside `radius`, `width` pixels thick
pub fn stroke_ring(
    canvas: &mut RgbaImage,
    center: (f32, f32),
    radius: f32,
    width: f32,
    color: Rgba<u8>,
) {
    let (cx, cy) = center;
    let outer2 = radius * radius;
    let inner = (radius - width).max(0.0);
    let inner2 = inner * inner;

    for_each_in_box(
        canvas,
        (cx - radius, cy - radius),
        (cx + radius, cy + radius),
        |x, y, pixel| {
            let dx = x - cx;
            let dy = y - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= outer2 && d2 > inner2 {
                paint(pixel, color);
            }
        },
    );
}

/// Stroke a straight segment with flat (butt) ends
pub fn stroke_segment(
    canvas: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return;
    }

    // Unit direction and half thickness
    let (ux, uy) = (dx / length, dy / length);
    let half = width / 2.0;

    for_each_in_box(
        canvas,
        (from.0.min(to.0) - half, from.1.min(to.1) - half),
        (from.0.max(to.0) + half, from.1.max(to.1) + half),
        |x, y, pixel| {
            let px = x - from.0;
            let py = y - from.1;
            let along = px * ux + py * uy;
            let across = (px * uy - py * ux).abs();
            if (0.0..=length).contains(&along) && across <= half {
                paint(pixel, color);
            }
        },
    );
}

/// Build a single-channel mask of a rounded square filling a `size`×`size` canvas
///
/// Pixels inside the shape are 255, everything outside (the cut corners) is 0.
pub fn rounded_square_mask(size: u32, corner_radius: f32) -> GrayImage {
    let last = size.saturating_sub(1) as f32;
    let radius = corner_radius.clamp(0.0, last / 2.0);
    let r2 = radius * radius;

    ImageBuffer::from_fn(size, size, |x, y| {
        // Nearest point of the inner square whose offset by `radius` forms the shape
        let nx = (x as f32).clamp(radius, last - radius);
        let ny = (y as f32).clamp(radius, last - radius);
        let dx = x as f32 - nx;
        let dy = y as f32 - ny;

        if dx * dx + dy * dy <= r2 {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Replace the canvas alpha channel with the mask
pub fn apply_mask(canvas: &mut RgbaImage, mask: &GrayImage) {
    assert_eq!(
        canvas.dimensions(),
        mask.dimensions(),
        "mask must match the canvas it cuts"
    );

    for (pixel, alpha) in canvas.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }
}
