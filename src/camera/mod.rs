//! Stereo depth frame sources.
//!
//! A [`FrameSource`] hands out one [`StereoFrame`] per grab: the left color
//! view, a depth visualisation and the XYZ point cloud, all at the retrieval
//! size configured in [`CameraConfig`].

pub mod recording;

use clap::ValueEnum;
use image::RgbImage;
use std::path::PathBuf;
use thiserror::Error;

pub use recording::RecordingSource;

/// Sensor resolution presets of the stereo camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Resolution {
    Hd2k,
    Hd1080,
    #[default]
    Hd720,
    Vga,
}

impl Resolution {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::Hd2k => (2208, 1242),
            Resolution::Hd1080 => (1920, 1080),
            Resolution::Hd720 => (1280, 720),
            Resolution::Vga => (672, 376),
        }
    }
}

/// Unit of the point cloud coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Unit {
    Millimeter,
    Centimeter,
    #[default]
    Meter,
    Inch,
    Foot,
}

impl Unit {
    /// How many of this unit make one meter
    pub fn per_meter(&self) -> f32 {
        match self {
            Unit::Millimeter => 1000.0,
            Unit::Centimeter => 100.0,
            Unit::Meter => 1.0,
            Unit::Inch => 39.370_08,
            Unit::Foot => 3.280_84,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Meter => "m",
            Unit::Inch => "in",
            Unit::Foot => "ft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub resolution: Resolution,
    pub units: Unit,
    /// Fraction of the sensor resolution frames are retrieved at
    pub retrieve_scale: f32,
}

impl CameraConfig {
    pub fn retrieve_size(&self) -> (u32, u32) {
        let (w, h) = self.resolution.dimensions();
        let scale = |v: u32| ((v as f32 * self.retrieve_scale).round() as u32).max(1);
        (scale(w), scale(h))
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::Hd720,
            units: Unit::Meter,
            retrieve_scale: 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraInfo {
    pub config: CameraConfig,
    pub retrieve_size: (u32, u32),
    pub frame_count: Option<usize>,
}

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("failed to open recording {path:?}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("frame {frame} is {actual:?}, camera is configured for {expected:?}")]
    ResolutionMismatch {
        frame: String,
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("frame {frame} has no point cloud")]
    MissingPointCloud { frame: String },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// XYZ measurement per pixel, NaN where the camera could not measure
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    width: u32,
    height: u32,
    points: Vec<[f32; 3]>,
}

impl PointCloud {
    pub fn new(width: u32, height: u32, points: Vec<[f32; 3]>) -> anyhow::Result<Self> {
        if points.len() != (width as usize) * (height as usize) {
            anyhow::bail!(
                "point cloud of {}x{} needs {} points, got {}",
                width,
                height,
                width as usize * height as usize,
                points.len()
            );
        }
        Ok(Self { width, height, points })
    }

    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [f32; 3]) -> Self {
        let mut points = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                points.push(f(x, y));
            }
        }
        Self { width, height, points }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<[f32; 3]> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.points
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn scaled(mut self, factor: f32) -> Self {
        if factor != 1.0 {
            for p in &mut self.points {
                p.iter_mut().for_each(|v| *v *= factor);
            }
        }
        self
    }

    /// Nearest-neighbour resample, measurements are never blended
    pub fn resize(&self, width: u32, height: u32) -> Self {
        if (width, height) == (self.width, self.height) {
            return self.clone();
        }
        PointCloud::from_fn(width, height, |x, y| {
            let sx = ((x as u64 * self.width as u64) / width as u64) as usize;
            let sy = ((y as u64 * self.height as u64) / height as u64) as usize;
            self.points[sy * self.width as usize + sx]
        })
    }
}

#[derive(Debug, Clone)]
pub struct StereoFrame {
    pub index: u64,
    pub left: RgbImage,
    pub right: Option<RgbImage>,
    pub depth_view: RgbImage,
    pub point_cloud: PointCloud,
}

pub trait FrameSource {
    /// Grab the next frame, `None` once the stream is exhausted
    fn grab(&mut self) -> Result<Option<StereoFrame>, CameraError>;

    fn info(&self) -> CameraInfo;
}
