pub mod contours;
pub mod moments;
pub mod preprocessing;
pub mod segmentation;

use image::{DynamicImage, GrayImage};
use std::path::PathBuf;

use crate::camera::StereoFrame;
use crate::debug::DebugConfig;
use crate::depth;
use crate::models::{Contour, DetectedObject, FrameDetections, HsvRange};

/// Gaussian kernel edge length used before thresholding
pub const BLUR_KERNEL: u32 = 5;

/// Smaller blobs are treated as noise; may need adjusting per vehicle
pub const MIN_CONTOUR_AREA: f64 = 600.0;

/// Per-frame detection orchestrator
pub struct ObjectDetector {
    pub blur_kernel: u32,
    pub range: HsvRange,
    pub min_area: f64,
    pub verbose: bool,
    debug: Option<DebugConfig>,
}

impl ObjectDetector {
    pub fn new() -> Self {
        Self {
            blur_kernel: BLUR_KERNEL,
            range: HsvRange::ORANGE,
            min_area: MIN_CONTOUR_AREA,
            verbose: false,
            debug: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_range(mut self, range: HsvRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> anyhow::Result<Self> {
        self.debug = Some(DebugConfig::new(output_dir)?);
        Ok(self)
    }

    /// Run blur, threshold, contour, centroid and depth lookup on one frame
    pub fn detect(&self, frame: &StereoFrame) -> anyhow::Result<FrameDetections> {
        self.save_stage(frame.index, 0, "input", || {
            DynamicImage::ImageRgb8(frame.left.clone())
        })?;

        // Step 1: Preprocess
        if self.verbose {
            println!("\nFrame {}: blurring and converting to HSV...", frame.index);
        }
        let blurred = preprocessing::apply_blur(&frame.left, self.blur_kernel);
        self.save_stage(frame.index, 1, "gaussian blur", || {
            DynamicImage::ImageRgb8(blurred.clone())
        })?;
        let hsv = preprocessing::to_hsv(&blurred);
        self.save_stage(frame.index, 2, "hsv", || DynamicImage::ImageRgb8(hsv.clone()))?;

        // Step 2: Threshold the target color
        let mask = segmentation::in_range(&hsv, &self.range);
        self.save_stage(frame.index, 3, "color mask", || {
            DynamicImage::ImageLuma8(mask.clone())
        })?;
        if self.verbose {
            println!("Mask covers {} pixels", segmentation::count_set(&mask));
        }

        // Step 3: Contours, filtered by area
        let all_contours = contours::find_contours(&mask);
        let total = all_contours.len();
        let kept = contours::filter_by_area(all_contours, self.min_area);
        if self.verbose {
            println!(
                "Found {} contours, {} above {} px²",
                total,
                kept.len(),
                self.min_area
            );
        }

        // Step 4: Centroid and depth per surviving contour
        let mut objects = Vec::with_capacity(kept.len());
        for contour in kept {
            let Some(centroid) = contour.centroid() else {
                tracing::warn!(points = contour.points.len(), "contour has zero area moment");
                continue;
            };
            let reading = depth::measure(&frame.point_cloud, centroid.0, centroid.1);
            if self.verbose {
                println!(
                    "  Object at ({}, {}): area={:.0}, distance={:?}",
                    centroid.0,
                    centroid.1,
                    contour.area(),
                    reading.distance()
                );
            }
            objects.push(DetectedObject {
                area: contour.area(),
                centroid,
                depth: reading,
                contour,
            });
        }

        tracing::debug!(frame = frame.index, objects = objects.len(), "frame processed");

        Ok(FrameDetections { mask, objects })
    }

    /// Get the color mask of a frame (for debugging)
    pub fn get_mask(&self, frame: &StereoFrame) -> GrayImage {
        let blurred = preprocessing::apply_blur(&frame.left, self.blur_kernel);
        segmentation::in_range(&preprocessing::to_hsv(&blurred), &self.range)
    }

    /// Get every contour of the color mask before area filtering (for debugging)
    pub fn get_contours(&self, frame: &StereoFrame) -> Vec<Contour> {
        contours::find_contours(&self.get_mask(frame))
    }

    fn save_stage(
        &self,
        frame_index: u64,
        stage_index: usize,
        name: &str,
        image: impl FnOnce() -> DynamicImage,
    ) -> anyhow::Result<()> {
        if let Some(debug) = &self.debug {
            debug.save_stage(frame_index, stage_index, name, &image())?;
        }
        Ok(())
    }
}

impl Default for ObjectDetector {
    fn default() -> Self {
        Self::new()
    }
}
