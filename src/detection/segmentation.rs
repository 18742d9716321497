use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;

use crate::models::HsvRange;

/// 255 where the HSV pixel falls inside `range`, 0 elsewhere
pub fn in_range(hsv: &RgbImage, range: &HsvRange) -> GrayImage {
    map_colors(hsv, |p: Rgb<u8>| {
        if range.contains(p.0) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Keep the color pixels under the mask, black out the rest
pub fn apply_mask(img: &RgbImage, mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let keep = mask
            .get_pixel_checked(x, y)
            .is_some_and(|m| m[0] > 0);
        if keep {
            *img.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

pub fn count_set(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] > 0).count()
}
