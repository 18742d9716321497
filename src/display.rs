//! Output surfaces for rendered frames.

use anyhow::Result;
use std::path::PathBuf;

use crate::render::RenderedFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkControl {
    Continue,
    Quit,
}

pub trait FrameSink {
    fn show(&mut self, frame: &RenderedFrame) -> Result<SinkControl>;

    fn name(&self) -> &str;
}

/// Writes every view to `<dir>/<view>/<frame>.png`
pub struct ImageDirSink {
    root: PathBuf,
}

impl ImageDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn view_path(&self, view: &str, index: u64) -> PathBuf {
        self.root
            .join(view.to_lowercase())
            .join(format!("{:06}.png", index))
    }
}

impl FrameSink for ImageDirSink {
    fn show(&mut self, frame: &RenderedFrame) -> Result<SinkControl> {
        for (view, img) in frame.views() {
            let path = self.view_path(view, frame.index);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            img.save(&path)
                .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", path.display(), e))?;
        }
        Ok(SinkControl::Continue)
    }

    fn name(&self) -> &str {
        "Image Directory"
    }
}

#[cfg(feature = "display")]
pub use highgui::HighGuiSink;

#[cfg(feature = "display")]
mod highgui {
    use anyhow::Result;
    use image::RgbImage;
    use opencv::{
        core::{self, Mat, Scalar},
        highgui,
        prelude::*,
    };

    use super::{FrameSink, SinkControl};
    use crate::render::RenderedFrame;

    const QUIT_KEY: i32 = 'q' as i32;
    const WAIT_MS: i32 = 10;

    /// Live OpenCV windows, one per view
    pub struct HighGuiSink;

    impl HighGuiSink {
        pub fn new() -> Result<Self> {
            for view in ["Image", "Mask", "Depth"] {
                highgui::named_window(view, highgui::WINDOW_AUTOSIZE)?;
            }
            Ok(Self)
        }
    }

    impl FrameSink for HighGuiSink {
        fn show(&mut self, frame: &RenderedFrame) -> Result<SinkControl> {
            for (view, img) in frame.views() {
                highgui::imshow(view, &to_bgr_mat(img)?)?;
            }
            let key = highgui::wait_key(WAIT_MS)?;
            if key == QUIT_KEY {
                return Ok(SinkControl::Quit);
            }
            Ok(SinkControl::Continue)
        }

        fn name(&self) -> &str {
            "HighGUI"
        }
    }

    impl Drop for HighGuiSink {
        fn drop(&mut self) {
            if let Err(e) = highgui::destroy_all_windows() {
                tracing::warn!(error = %e, "failed to close windows");
            }
        }
    }

    fn to_bgr_mat(img: &RgbImage) -> Result<Mat> {
        let mut mat = Mat::new_rows_cols_with_default(
            img.height() as i32,
            img.width() as i32,
            core::CV_8UC3,
            Scalar::all(0.0),
        )?;
        let bytes = mat.data_bytes_mut()?;
        for (dst, src) in bytes.chunks_exact_mut(3).zip(img.pixels()) {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        }
        Ok(mat)
    }
}
