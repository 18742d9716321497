use image::{GrayImage, Luma};
use imageproc::point::Point;
use orange_tracker::camera::{PointCloud, Unit};
use orange_tracker::depth::{measure, report_line, three_significant};
use orange_tracker::detection::contours::{filter_by_area, find_contours};
use orange_tracker::detection::moments::polygon_moments;
use orange_tracker::{Contour, DepthReading};

fn square_points(x0: i32, y0: i32, side: i32) -> Vec<Point<i32>> {
    vec![
        Point::new(x0, y0),
        Point::new(x0 + side, y0),
        Point::new(x0 + side, y0 + side),
        Point::new(x0, y0 + side),
    ]
}

#[test]
fn test_square_moments() {
    let m = polygon_moments(&square_points(0, 0, 10));
    assert_eq!(m.m00, 100.0);
    assert_eq!(m.centroid(), Some((5.0, 5.0)));
}

#[test]
fn test_orientation_does_not_flip_area() {
    let mut points = square_points(4, 6, 8);
    let forward = polygon_moments(&points);
    points.reverse();
    let backward = polygon_moments(&points);

    assert_eq!(forward.m00, 64.0);
    assert_eq!(forward, backward);
}

#[test]
fn test_degenerate_contours_have_no_centroid() {
    let line = Contour::new(vec![Point::new(1, 1), Point::new(5, 5)], false);
    assert_eq!(line.area(), 0.0);
    assert_eq!(line.centroid(), None);

    let collinear = Contour::new(
        vec![Point::new(0, 0), Point::new(3, 0), Point::new(6, 0)],
        false,
    );
    assert_eq!(collinear.centroid(), None);
}

#[test]
fn test_centroid_truncates() {
    // Triangle with centroid (10/3, 10/3)
    let tri = Contour::new(
        vec![Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)],
        false,
    );
    assert_eq!(tri.area(), 50.0);
    assert_eq!(tri.centroid(), Some((3, 3)));
    assert_eq!(tri.bounding_box(), Some((0, 0, 10, 10)));
}

#[test]
fn test_traced_block_area_uses_pixel_centres() {
    let mut mask = GrayImage::new(40, 40);
    for y in 10..20 {
        for x in 5..15 {
            mask.put_pixel(x, y, Luma([255]));
        }
    }

    let contours = find_contours(&mask);
    assert_eq!(contours.len(), 1);
    assert!(!contours[0].is_hole);
    assert_eq!(contours[0].area(), 81.0);
    assert_eq!(contours[0].centroid(), Some((9, 14)));

    assert_eq!(filter_by_area(contours.clone(), 80.0).len(), 1);
    // Strictly greater than the threshold
    assert!(filter_by_area(contours, 81.0).is_empty());
}

#[test]
fn test_ring_yields_outer_and_hole_borders() {
    let mut mask = GrayImage::new(50, 50);
    for y in 5..45 {
        for x in 5..45 {
            let inside_hole = (15..35).contains(&x) && (15..35).contains(&y);
            if !inside_hole {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    let contours = find_contours(&mask);
    assert_eq!(contours.len(), 2);
    assert_eq!(contours.iter().filter(|c| c.is_hole).count(), 1);
}

#[test]
fn test_depth_is_euclidean_distance() {
    let cloud = PointCloud::from_fn(4, 4, |x, _| if x == 1 { [3.0, 4.0, 0.0] } else { [0.0, 0.0, 1.0] });

    match measure(&cloud, 1, 2) {
        DepthReading::Measured { point, distance } => {
            assert_eq!(point, [3.0, 4.0, 0.0]);
            assert_eq!(distance, 5.0);
        }
        DepthReading::Unavailable => panic!("expected a measurement"),
    }
    assert_eq!(measure(&cloud, 0, 0).distance(), Some(1.0));
}

#[test]
fn test_unmeasured_or_outside_points_are_unavailable() {
    let cloud = PointCloud::from_fn(3, 3, |x, y| match (x, y) {
        (0, 0) => [f32::NAN, f32::NAN, f32::NAN],
        (1, 0) => [0.0, 0.0, f32::INFINITY],
        _ => [0.0, 0.0, 2.0],
    });

    assert_eq!(measure(&cloud, 0, 0), DepthReading::Unavailable);
    assert_eq!(measure(&cloud, 1, 0), DepthReading::Unavailable);
    assert_eq!(measure(&cloud, -1, 1), DepthReading::Unavailable);
    assert_eq!(measure(&cloud, 3, 1), DepthReading::Unavailable);
    assert_eq!(measure(&cloud, 2, 2).distance(), Some(2.0));
}

#[test]
fn test_report_lines() {
    let measured = DepthReading::Measured {
        point: [0.0, 0.0, 1.25],
        distance: 1.25,
    };
    assert_eq!(
        report_line((12, 34), &measured, Unit::Meter),
        "Orange object x y coords (12, 34): Distance 1.25 m"
    );

    let line = report_line((1, 2), &DepthReading::Unavailable, Unit::Meter);
    assert!(line.starts_with("Can't estimate distance at this position."));
    assert!(line.ends_with("please move it backwards.\n"));
}

#[test]
fn test_distance_keeps_three_significant_digits() {
    let line = |distance: f32| {
        let reading = DepthReading::Measured {
            point: [0.0, 0.0, distance],
            distance,
        };
        report_line((1, 2), &reading, Unit::Meter)
    };

    assert!(line(1.23456).ends_with("Distance 1.23 m"));
    assert!(line(12.3456).ends_with("Distance 12.3 m"));
    assert!(line(0.5).ends_with("Distance 0.5 m"));
    assert!(line(0.123456).ends_with("Distance 0.123 m"));
    assert!(line(2.0).ends_with("Distance 2.0 m"));
}

#[test]
fn test_three_significant_switches_to_exponent() {
    assert_eq!(three_significant(12.0), "12.0");
    assert_eq!(three_significant(9.996), "10.0");
    assert_eq!(three_significant(100.0), "1e+02");
    assert_eq!(three_significant(123.4), "1.23e+02");
    assert_eq!(three_significant(0.00012345), "0.000123");
    assert_eq!(three_significant(0.00001), "1e-05");
    assert_eq!(three_significant(0.0), "0.0");
}

#[test]
fn test_point_cloud_resize_and_scale() -> anyhow::Result<()> {
    let cloud = PointCloud::from_fn(4, 2, |x, y| [x as f32, y as f32, 1.0]);
    let half = cloud.resize(2, 1);
    assert_eq!(half.dimensions(), (2, 1));
    assert_eq!(half.get(1, 0), Some([2.0, 0.0, 1.0]));

    let mm = half.scaled(Unit::Millimeter.per_meter());
    assert_eq!(mm.get(1, 0), Some([2000.0, 0.0, 1000.0]));

    assert!(PointCloud::new(2, 2, vec![[0.0; 3]; 3]).is_err());
    Ok(())
}
