use crate::camera::{PointCloud, Unit};
use crate::models::DepthReading;

/// Euclidean distance from the camera to the point measured at pixel (x, y)
pub fn measure(cloud: &PointCloud, x: i32, y: i32) -> DepthReading {
    let Some(point) = cloud.get(x, y) else {
        return DepthReading::Unavailable;
    };
    let [px, py, pz] = point;
    let distance = (px * px + py * py + pz * pz).sqrt();

    if distance.is_finite() {
        DepthReading::Measured { point, distance }
    } else {
        DepthReading::Unavailable
    }
}

/// Line printed for one located object
pub fn report_line(centroid: (i32, i32), reading: &DepthReading, unit: Unit) -> String {
    match reading {
        DepthReading::Measured { distance, .. } => format!(
            "Orange object x y coords ({}, {}): Distance {} {}",
            centroid.0,
            centroid.1,
            three_significant(*distance as f64),
            unit.symbol()
        ),
        DepthReading::Unavailable => "Can't estimate distance at this position.\n\
             Your camera is probably too close to the scene, please move it backwards.\n"
            .to_string(),
    }
}

/// Three significant digits, trailing zeros dropped but at least one digit
/// after the point; exponent form below 1e-4 and from 100 up (`1.23e+02`).
pub fn three_significant(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }

    let sci = format!("{:.2e}", value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if !(-4..2).contains(&exp) {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.abs());
    }

    let fixed = format!("{:.*}", (2 - exp) as usize, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0')
    } else {
        fixed.as_str()
    };
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        format!("{}.0", trimmed)
    }
}
