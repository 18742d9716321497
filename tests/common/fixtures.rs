use image::{Rgb, Rgb32FImage, RgbImage};
use orange_tracker::camera::{PointCloud, StereoFrame};
use std::path::{Path, PathBuf};

pub const ORANGE: Rgb<u8> = Rgb([255, 120, 0]);
pub const WATER_BLUE: Rgb<u8> = Rgb([30, 60, 120]);

/// Axis-aligned filled square: top-left corner and edge length in pixels
#[derive(Debug, Clone, Copy)]
pub struct Square {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Square {
    pub fn new(x: u32, y: u32, size: u32) -> Self {
        Self { x, y, size }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }

    /// Centroid of the pixel-centre polygon, truncated
    pub fn expected_centroid(&self) -> (i32, i32) {
        let half = (self.size - 1) as f64 / 2.0;
        ((self.x as f64 + half) as i32, (self.y as f64 + half) as i32)
    }
}

/// Blue background with orange squares painted on it
pub fn orange_scene(width: u32, height: u32, squares: &[Square]) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if squares.iter().any(|s| s.contains(x, y)) {
            ORANGE
        } else {
            WATER_BLUE
        }
    })
}

/// Cloud where every pixel sits at `z` straight ahead of the camera
pub fn flat_cloud(width: u32, height: u32, z: f32) -> PointCloud {
    PointCloud::from_fn(width, height, |_, _| [0.0, 0.0, z])
}

pub fn make_frame(width: u32, height: u32, squares: &[Square], z: f32) -> StereoFrame {
    StereoFrame {
        index: 0,
        left: orange_scene(width, height, squares),
        right: None,
        depth_view: RgbImage::from_pixel(width, height, Rgb([128, 128, 128])),
        point_cloud: flat_cloud(width, height, z),
    }
}

/// Write one recorded frame: left png, optional right png and an XYZ exr
pub fn write_recording_frame(
    root: &Path,
    stem: &str,
    left: &RgbImage,
    right: Option<&RgbImage>,
    xyz: [f32; 3],
) {
    let (width, height) = left.dimensions();
    for dir in ["left", "right", "cloud"] {
        std::fs::create_dir_all(root.join(dir)).expect("Failed to create recording dir");
    }

    left.save(root.join("left").join(format!("{}.png", stem)))
        .expect("Failed to save left frame");
    if let Some(right) = right {
        right
            .save(root.join("right").join(format!("{}.png", stem)))
            .expect("Failed to save right frame");
    }

    let cloud = Rgb32FImage::from_pixel(width, height, Rgb(xyz));
    cloud
        .save(root.join("cloud").join(format!("{}.exr", stem)))
        .expect("Failed to save point cloud");
}

/// Monospace TrueType font checked in next to the tests
pub fn test_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSansMono.ttf")
}
