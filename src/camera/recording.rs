use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

use super::{CameraConfig, CameraError, CameraInfo, FrameSource, PointCloud, StereoFrame};

/// Replays a recorded session directory:
///
/// ```text
/// session/
///   left/000000.png    color frames, one per grab
///   right/000000.png   optional
///   depth/000000.png   optional depth view
///   cloud/000000.exr   XYZ in meters, RGB float
/// ```
pub struct RecordingSource {
    root: PathBuf,
    config: CameraConfig,
    frames: Vec<String>,
    cursor: usize,
}

impl RecordingSource {
    pub fn open(root: impl AsRef<Path>, config: CameraConfig) -> Result<Self, CameraError> {
        let root = root.as_ref().to_path_buf();
        let open_err = |reason: &str| CameraError::Open {
            path: root.clone(),
            reason: reason.to_string(),
        };

        if !root.is_dir() {
            return Err(open_err("not a directory"));
        }
        let left_dir = root.join("left");
        if !left_dir.is_dir() {
            return Err(open_err("missing left/ directory"));
        }

        let mut frames: Vec<String> = std::fs::read_dir(&left_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(open_err("left/ holds no frames"));
        }

        tracing::info!(
            path = %root.display(),
            frames = frames.len(),
            resolution = ?config.resolution,
            "opened recording"
        );

        Ok(Self {
            root,
            config,
            frames,
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn load_view(&self, view: &str, stem: &str) -> Result<Option<RgbImage>, CameraError> {
        let path = self.root.join(view).join(format!("{}.png", stem));
        if !path.exists() {
            return Ok(None);
        }
        let img = image::open(&path)?.to_rgb8();
        self.check_resolution(stem, img.dimensions())?;
        Ok(Some(self.to_retrieve_size(img)))
    }

    fn load_cloud(&self, stem: &str) -> Result<PointCloud, CameraError> {
        let path = self.root.join("cloud").join(format!("{}.exr", stem));
        if !path.exists() {
            return Err(CameraError::MissingPointCloud {
                frame: stem.to_string(),
            });
        }
        let xyz = image::open(&path)?.into_rgb32f();
        self.check_resolution(stem, xyz.dimensions())?;

        let (width, height) = xyz.dimensions();
        let cloud = PointCloud::from_fn(width, height, |x, y| xyz.get_pixel(x, y).0);
        let (w, h) = self.config.retrieve_size();
        Ok(cloud.resize(w, h).scaled(self.config.units.per_meter()))
    }

    fn check_resolution(&self, stem: &str, actual: (u32, u32)) -> Result<(), CameraError> {
        let expected = self.config.resolution.dimensions();
        if actual != expected {
            return Err(CameraError::ResolutionMismatch {
                frame: stem.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn to_retrieve_size(&self, img: RgbImage) -> RgbImage {
        let (w, h) = self.config.retrieve_size();
        if img.dimensions() == (w, h) {
            img
        } else {
            imageops::resize(&img, w, h, FilterType::Triangle)
        }
    }
}

impl FrameSource for RecordingSource {
    fn grab(&mut self) -> Result<Option<StereoFrame>, CameraError> {
        let Some(stem) = self.frames.get(self.cursor).cloned() else {
            return Ok(None);
        };
        let index = self.cursor as u64;
        self.cursor += 1;

        let left = self
            .load_view("left", &stem)?
            .ok_or_else(|| CameraError::Open {
                path: self.root.clone(),
                reason: format!("left frame {} vanished", stem),
            })?;
        let right = self.load_view("right", &stem)?;
        let point_cloud = self.load_cloud(&stem)?;
        let depth_view = match self.load_view("depth", &stem)? {
            Some(view) => view,
            None => render_depth_view(&point_cloud),
        };

        tracing::trace!(frame = %stem, "grabbed");

        Ok(Some(StereoFrame {
            index,
            left,
            right,
            depth_view,
            point_cloud,
        }))
    }

    fn info(&self) -> CameraInfo {
        CameraInfo {
            config: self.config,
            retrieve_size: self.config.retrieve_size(),
            frame_count: Some(self.frames.len()),
        }
    }
}

/// Grey depth picture: nearest measured point white, farthest dark, unmeasured black
pub fn render_depth_view(cloud: &PointCloud) -> RgbImage {
    let (width, height) = cloud.dimensions();
    let distance = |x: u32, y: u32| {
        cloud
            .get(x as i32, y as i32)
            .map(|[px, py, pz]| (px * px + py * py + pz * pz).sqrt())
            .filter(|d| d.is_finite())
    };

    let mut near = f32::INFINITY;
    let mut far = f32::NEG_INFINITY;
    for y in 0..height {
        for x in 0..width {
            if let Some(d) = distance(x, y) {
                near = near.min(d);
                far = far.max(d);
            }
        }
    }
    let span = (far - near).max(f32::EPSILON);

    RgbImage::from_fn(width, height, |x, y| match distance(x, y) {
        Some(d) => {
            let v = (255.0 - 225.0 * (d - near) / span).round() as u8;
            Rgb([v, v, v])
        }
        None => Rgb([0, 0, 0]),
    })
}
