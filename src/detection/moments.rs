use imageproc::point::Point;

use crate::models::Moments;

/// m00, m10 and m01 of the polygon through `points`, via Green's theorem.
///
/// Orientation is normalised so m00 is never negative. Fewer than three
/// points enclose nothing and give all-zero moments.
pub fn polygon_moments(points: &[Point<i32>]) -> Moments {
    if points.len() < 3 {
        return Moments::default();
    }

    let mut a00 = 0.0f64;
    let mut a10 = 0.0f64;
    let mut a01 = 0.0f64;

    let mut prev = points[points.len() - 1];
    for &cur in points {
        let (xp, yp) = (prev.x as f64, prev.y as f64);
        let (xc, yc) = (cur.x as f64, cur.y as f64);
        let cross = xp * yc - xc * yp;
        a00 += cross;
        a10 += cross * (xp + xc);
        a01 += cross * (yp + yc);
        prev = cur;
    }

    let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
    Moments {
        m00: sign * a00 / 2.0,
        m10: sign * a10 / 6.0,
        m01: sign * a01 / 6.0,
    }
}
