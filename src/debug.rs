use anyhow::Result;
use image::DynamicImage;
use std::path::PathBuf;

/// Where per-frame stage images are written in debug mode
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// The directory must be empty or non-existent
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn frame_dir(&self, frame_index: u64) -> PathBuf {
        self.output_dir.join(format!("{:06}", frame_index))
    }

    /// Save one stage image as `<frame>/<NN>_<stage_name>.png`
    pub fn save_stage(
        &self,
        frame_index: u64,
        stage_index: usize,
        stage_name: &str,
        image: &DynamicImage,
    ) -> Result<PathBuf> {
        let frame_dir = self.frame_dir(frame_index);
        std::fs::create_dir_all(&frame_dir)?;

        let filename = stage_filename(stage_index, stage_name);
        let output_path = frame_dir.join(&filename);
        image
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;

        tracing::debug!(path = %output_path.display(), "saved debug stage");
        Ok(output_path)
    }
}

/// e.g. `02_color_mask.png`
pub fn stage_filename(stage_index: usize, stage_name: &str) -> String {
    format!(
        "{:02}_{}.png",
        stage_index,
        stage_name.to_lowercase().replace(' ', "_")
    )
}
