use image::GrayImage;
use imageproc::contours::{find_contours as trace_borders, BorderType};

use crate::models::Contour;

/// Trace every border in the binary mask, outer and hole borders alike,
/// keeping the full pixel chain of each.
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    trace_borders::<i32>(mask)
        .into_iter()
        .map(|c| Contour::new(c.points, matches!(c.border_type, BorderType::Hole)))
        .collect()
}

/// Keep contours enclosing strictly more than `min_area` square pixels
pub fn filter_by_area(contours: Vec<Contour>, min_area: f64) -> Vec<Contour> {
    contours
        .into_iter()
        .filter(|c| c.area() > min_area)
        .collect()
}
