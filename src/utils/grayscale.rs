/// Convert color images to 8-bit luminance
/// Y = 0.299*R + 0.587*G + 0.114*B
/// Uses 16-bit fixed point with rounding: Y = (19595*R + 38470*G + 7471*B + 2^15) >> 16
/// so the weights sum to exactly 1.0 and pure white stays 255.
use image::{DynamicImage, GrayImage};
use rayon::prelude::*;

const COEF_R: u32 = 19595;
const COEF_G: u32 = 38470;
const COEF_B: u32 = 7471;
const ROUND: u32 = 1 << 15;

/// Luminance of a single RGB triple
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + ROUND) >> 16) as u8
}

/// Convert packed RGB bytes to grayscale, processing rows in parallel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale_parallel(rgb, width, height, 3, |px| luminance(px[0], px[1], px[2]))
}

/// Scale a colour channel by alpha, rounding to nearest
#[inline]
fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u32 * alpha as u32 + 127) / 255) as u8
}

/// Convert packed RGBA bytes to grayscale.
///
/// Colour is premultiplied by alpha first, so a fully transparent pixel
/// reads as black whatever its stored colour.
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale_parallel(rgba, width, height, 4, |px| {
        let a = px[3];
        luminance(
            premultiply(px[0], a),
            premultiply(px[1], a),
            premultiply(px[2], a),
        )
    })
}

fn to_grayscale_parallel<F>(
    pixels: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    convert: F,
) -> Vec<u8>
where
    F: Fn(&[u8]) -> u8 + Sync,
{
    let mut gray = vec![0u8; width * height];
    if width == 0 || height == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * channels;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * channels;
            *out = convert(&pixels[idx..idx + channels]);
        }
    });

    gray
}

/// Luminance plane of any decoded image.
///
/// 8-bit grayscale input is taken as-is. Formats with an alpha channel go
/// through premultiplied RGBA, every other format through RGB, then the
/// weights above.
pub fn to_luma(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }

    let (width, height, luma) = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let luma = rgba_to_grayscale(rgba.as_raw(), width as usize, height as usize);
        (width, height, luma)
    } else {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let luma = rgb_to_grayscale(rgb.as_raw(), width as usize, height as usize);
        (width, height, luma)
    };
    let mut gray = GrayImage::new(width, height);
    gray.copy_from_slice(&luma);
    gray
}
