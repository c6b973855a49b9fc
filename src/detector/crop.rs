use image::GrayImage;

use crate::BLACK;
use crate::models::FinderBounds;

/// Copy the padded rectangle of `bounds` out of `binary`.
///
/// The output always has the rectangle's declared size. Reads start at the
/// clamped origin; destination pixels whose source would fall past the
/// right or bottom edge of `binary` are left black.
pub fn crop(binary: &GrayImage, bounds: &FinderBounds) -> GrayImage {
    let (src_w, src_h) = binary.dimensions();
    let (ox, oy) = bounds.origin();
    let (dst_w, dst_h) = (bounds.width(), bounds.height());

    let mut out = GrayImage::from_pixel(dst_w, dst_h, image::Luma([BLACK]));
    let copy_w = dst_w.min(src_w.saturating_sub(ox));
    let copy_h = dst_h.min(src_h.saturating_sub(oy));

    for dy in 0..copy_h {
        for dx in 0..copy_w {
            out.put_pixel(dx, dy, *binary.get_pixel(ox + dx, oy + dy));
        }
    }
    out
}
