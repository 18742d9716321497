use clap::Parser;
use std::path::PathBuf;

use orange_tracker::app::{self, RunOptions};
use orange_tracker::camera::{CameraConfig, FrameSource, RecordingSource, Resolution, Unit};
use orange_tracker::detection::{MIN_CONTOUR_AREA, ObjectDetector};
use orange_tracker::display::{FrameSink, ImageDirSink};
use orange_tracker::render::Renderer;
use orange_tracker::telemetry;

#[derive(Parser)]
#[command(name = "orange-tracker")]
#[command(about = "Locate orange objects in stereo frames and range them with the point cloud")]
struct Cli {
    /// Recorded session directory (left/, cloud/, optional right/ and depth/)
    #[arg(value_name = "RECORDING")]
    recording: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save per-stage debug images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Write the Image, Mask and Depth views of every frame to directory
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Show live windows, press q to quit (needs the `display` feature)
    #[arg(long)]
    display: bool,

    /// TrueType font used for the centroid labels
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Save left|right side-by-side images to directory
    #[arg(long, value_name = "DIR")]
    sbs_out: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Camera resolution the recording was made at
    #[arg(long, value_enum, default_value_t = Resolution::Hd720)]
    resolution: Resolution,

    /// Unit for point cloud coordinates and reported distances
    #[arg(long, value_enum, default_value_t = Unit::Meter)]
    units: Unit,

    /// Contours must enclose more than this many square pixels
    #[arg(long, default_value_t = MIN_CONTOUR_AREA)]
    min_area: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    telemetry::init(args.verbose)?;

    let config = CameraConfig {
        resolution: args.resolution,
        units: args.units,
        ..CameraConfig::default()
    };
    let mut source = RecordingSource::open(&args.recording, config)?;

    if args.verbose {
        let info = source.info();
        println!(
            "Opened {:?}: {} frames, retrieved at {:?}",
            args.recording,
            source.len(),
            info.retrieve_size
        );
    }

    let mut detector = ObjectDetector::new()
        .with_verbose(args.verbose)
        .with_min_area(args.min_area);
    if let Some(debug_dir) = args.debug_out {
        detector = detector.with_debug(debug_dir)?;
    }

    let mut renderer = Renderer::new();
    if let Some(font) = &args.font {
        renderer = renderer.with_font_file(font)?;
    }

    let mut sinks: Vec<Box<dyn FrameSink>> = Vec::new();
    if let Some(dir) = args.output {
        sinks.push(Box::new(ImageDirSink::new(dir)?));
    }
    if args.display {
        sinks.push(live_sink()?);
    }

    let options = RunOptions {
        max_frames: args.max_frames,
        sbs_out: args.sbs_out,
    };
    let mut stdout = std::io::stdout().lock();
    let summary = app::run(&mut source, &detector, &renderer, &mut sinks, &options, &mut stdout)?;

    if args.verbose {
        println!(
            "\nProcessed {} frames, {} objects located",
            summary.frames, summary.objects
        );
    }
    // Windows close before the final message
    drop(sinks);
    println!("\nFINISH");

    Ok(())
}

#[cfg(feature = "display")]
fn live_sink() -> anyhow::Result<Box<dyn FrameSink>> {
    Ok(Box::new(orange_tracker::display::HighGuiSink::new()?))
}

#[cfg(not(feature = "display"))]
fn live_sink() -> anyhow::Result<Box<dyn FrameSink>> {
    anyhow::bail!("--display needs a build with the `display` feature")
}
