use image::{DynamicImage, GrayImage};
use rayon::prelude::*;

use super::grayscale::to_luma;
use crate::{BLACK, WHITE};

/// Simple global threshold binarization.
/// Luminance strictly above `threshold` becomes white (255), the rest black (0).
pub fn threshold_binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut binary = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return binary;
    }

    let src: &[u8] = gray.as_raw();
    let dst: &mut [u8] = &mut binary;
    let stride = width as usize;
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(out, row)| {
            for (o, &v) in out.iter_mut().zip(row) {
                *o = if v > threshold { WHITE } else { BLACK };
            }
        });

    binary
}

/// Luminance conversion followed by the fixed-threshold cut
pub fn binarize(image: &DynamicImage, threshold: u8) -> GrayImage {
    threshold_binarize(&to_luma(image), threshold)
}
