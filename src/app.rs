use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::camera::FrameSource;
use crate::depth;
use crate::detection::ObjectDetector;
use crate::display::{FrameSink, SinkControl};
use crate::render::{self, Renderer};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Save left|right composites here for every frame that has a right view
    pub sbs_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub objects: usize,
    pub quit_requested: bool,
}

/// Grab, detect, report and show frames until the source runs dry or a sink quits.
/// Report lines go to `out`.
pub fn run<S, W>(
    source: &mut S,
    detector: &ObjectDetector,
    renderer: &Renderer,
    sinks: &mut [Box<dyn FrameSink>],
    options: &RunOptions,
    out: &mut W,
) -> Result<RunSummary>
where
    S: FrameSource + ?Sized,
    W: Write,
{
    let units = source.info().config.units;
    if let Some(dir) = &options.sbs_out {
        std::fs::create_dir_all(dir)?;
    }

    let mut summary = RunSummary::default();

    while !summary.quit_requested {
        if options.max_frames.is_some_and(|max| summary.frames >= max) {
            tracing::info!(frames = summary.frames, "frame limit reached");
            break;
        }

        let Some(frame) = source.grab()? else {
            tracing::info!(frames = summary.frames, "end of stream");
            break;
        };

        let detections = detector
            .detect(&frame)
            .with_context(|| format!("Detection failed on frame {}", frame.index))?;

        for object in &detections.objects {
            writeln!(out, "{}", depth::report_line(object.centroid, &object.depth, units))?;
        }

        if let (Some(dir), Some(right)) = (&options.sbs_out, &frame.right) {
            let path = dir.join(format!("{:06}.png", frame.index));
            render::side_by_side(&frame.left, right)
                .save(&path)
                .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", path.display(), e))?;
        }

        if !sinks.is_empty() {
            let rendered = renderer.render(&frame, &detections);
            for sink in sinks.iter_mut() {
                if sink.show(&rendered)? == SinkControl::Quit {
                    tracing::info!(sink = sink.name(), "quit requested");
                    summary.quit_requested = true;
                }
            }
        }

        summary.frames += 1;
        summary.objects += detections.objects.len();
    }

    Ok(summary)
}
