use image::{Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use imageproc::map::map_colors;

/// Sigma OpenCV picks for a Gaussian kernel when none is given
pub fn sigma_for_kernel(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply Gaussian blur so background noise does not survive thresholding
pub fn apply_blur(img: &RgbImage, ksize: u32) -> RgbImage {
    gaussian_blur_f32(img, sigma_for_kernel(ksize))
}

/// Convert to HSV packed into an RGB buffer as (H, S, V), H halved to fit a byte
pub fn to_hsv(img: &RgbImage) -> RgbImage {
    map_colors(img, |p: Rgb<u8>| Rgb(rgb_to_hsv(p.0)))
}

pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0.0 { 0.0 } else { 255.0 * diff / v };

    let mut h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    [
        (h / 2.0).round() as u8,
        s.round() as u8,
        v as u8,
    ]
}
