use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut};
use std::path::Path;

use crate::camera::StereoFrame;
use crate::detection::segmentation;
use crate::models::{Contour, FrameDetections};

pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const CENTROID_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const LABEL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const CONTOUR_HALF_WIDTH: i32 = 1;
const CENTROID_RADIUS: i32 = 3;
const LABEL_SCALE: f32 = 12.0;

/// The three live views of a processed frame
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub index: u64,
    /// Annotated left image
    pub image: RgbImage,
    /// Left image with everything outside the color mask blacked out
    pub mask: RgbImage,
    /// Annotated depth view
    pub depth: RgbImage,
}

impl RenderedFrame {
    pub fn views(&self) -> [(&'static str, &RgbImage); 3] {
        [("Image", &self.image), ("Mask", &self.mask), ("Depth", &self.depth)]
    }
}

#[derive(Default)]
pub struct Renderer {
    font: Option<FontVec>,
}

impl Renderer {
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Labels are only drawn once a TrueType font is loaded
    pub fn with_font_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| anyhow::anyhow!("Invalid font {}: {}", path.display(), e))?;
        self.font = Some(font);
        Ok(self)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn render(&self, frame: &StereoFrame, detections: &FrameDetections) -> RenderedFrame {
        let mut image = frame.left.clone();
        let mut depth = frame.depth_view.clone();
        let mask = segmentation::apply_mask(&frame.left, &detections.mask);

        for object in &detections.objects {
            draw_contour(&mut image, &object.contour);
            draw_contour(&mut depth, &object.contour);

            let (cx, cy) = object.centroid;
            draw_filled_circle_mut(&mut image, (cx, cy), CENTROID_RADIUS, CENTROID_COLOR);
            draw_filled_circle_mut(&mut depth, (cx, cy), CENTROID_RADIUS, CENTROID_COLOR);

            if let Some(font) = &self.font {
                let scale = PxScale::from(LABEL_SCALE);
                draw_text_mut(&mut image, LABEL_COLOR, cx - 20, cy - 20, scale, font, "Centre");
                let coords = format!("({},{})", cx, cy);
                draw_text_mut(&mut image, LABEL_COLOR, cx + 10, cy + 15, scale, font, &coords);
            }
        }

        RenderedFrame {
            index: frame.index,
            image,
            mask,
            depth,
        }
    }
}

/// Three pixel wide outline along the contour chain
pub fn draw_contour(canvas: &mut RgbImage, contour: &Contour) {
    for p in &contour.points {
        draw_filled_circle_mut(canvas, (p.x, p.y), CONTOUR_HALF_WIDTH, CONTOUR_COLOR);
    }
}

/// Left and right views next to each other
pub fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());
    let mut out = RgbImage::new(width, height);
    image::imageops::replace(&mut out, left, 0, 0);
    image::imageops::replace(&mut out, right, left.width() as i64, 0);
    out
}
