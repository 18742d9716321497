use image::GrayImage;
use imageproc::point::Point;

/// Inclusive HSV bounds, OpenCV 8-bit scale (H 0..180, S and V 0..255)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Tested against underwater footage, good up to about 8 feet away
    pub const ORANGE: HsvRange = HsvRange {
        lower: [10, 156, 73],
        upper: [73, 255, 255],
    };

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::ORANGE
    }
}

/// Spatial moments of a closed contour polygon
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// A border traced in the binary mask
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
    pub is_hole: bool,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>, is_hole: bool) -> Self {
        Self { points, is_hole }
    }

    pub fn moments(&self) -> Moments {
        crate::detection::moments::polygon_moments(&self.points)
    }

    /// Area enclosed by the point chain, pixel centres as vertices
    pub fn area(&self) -> f64 {
        self.moments().m00.abs()
    }

    /// Centroid truncated to whole pixels
    pub fn centroid(&self) -> Option<(i32, i32)> {
        self.moments()
            .centroid()
            .map(|(cx, cy)| (cx as i32, cy as i32))
    }

    /// (min_x, min_y, max_x, max_y)
    pub fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.points.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.points.iter().fold(init, |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthReading {
    Measured { point: [f32; 3], distance: f32 },
    Unavailable,
}

impl DepthReading {
    pub fn distance(&self) -> Option<f32> {
        match self {
            DepthReading::Measured { distance, .. } => Some(*distance),
            DepthReading::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetectedObject {
    pub contour: Contour,
    pub area: f64,
    pub centroid: (i32, i32),
    pub depth: DepthReading,
}

/// Everything the detector learned from one frame
#[derive(Debug, Clone)]
pub struct FrameDetections {
    pub mask: GrayImage,
    pub objects: Vec<DetectedObject>,
}
