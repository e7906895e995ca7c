//! Quick structural checks on a rendered icon

use image::{DynamicImage, Rgba};

/// Summary of what a rendered icon looks like
#[derive(Debug, Clone, PartialEq)]
pub struct IconReport {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    /// Alpha of the top-left, top-right, bottom-left and bottom-right pixels
    pub corner_alpha: [u8; 4],
    pub center: Rgba<u8>,
    /// Pixels that read as the prohibition red
    pub red_pixels: usize,
    /// Pixels that read as the white clock parts
    pub light_pixels: usize,
}

impl IconReport {
    pub fn corners_transparent(&self) -> bool {
        self.corner_alpha.iter().all(|&alpha| alpha == 0)
    }
}

/// Red-dominant, visible pixel
pub fn is_red(pixel: &Rgba<u8>) -> bool {
    pixel[3] > 0 && pixel[0] > 150 && pixel[1] < 110 && pixel[2] < 110
}

/// White or near-white visible pixel
pub fn is_light(pixel: &Rgba<u8>) -> bool {
    pixel[3] > 0 && pixel[0] > 170 && pixel[1] > 170 && pixel[2] > 170
}

pub fn inspect(img: &DynamicImage) -> IconReport {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let corner_alpha = if width == 0 || height == 0 {
        [0; 4]
    } else {
        [
            rgba.get_pixel(0, 0)[3],
            rgba.get_pixel(width - 1, 0)[3],
            rgba.get_pixel(0, height - 1)[3],
            rgba.get_pixel(width - 1, height - 1)[3],
        ]
    };

    let center = if width == 0 || height == 0 {
        Rgba([0, 0, 0, 0])
    } else {
        *rgba.get_pixel(width / 2, height / 2)
    };

    IconReport {
        width,
        height,
        has_alpha: img.color().has_alpha(),
        corner_alpha,
        center,
        red_pixels: rgba.pixels().filter(|p| is_red(p)).count(),
        light_pixels: rgba.pixels().filter(|p| is_light(p)).count(),
    }
}
