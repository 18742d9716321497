pub mod app;
pub mod camera;
pub mod debug;
pub mod depth;
pub mod detection;
pub mod display;
pub mod models;
pub mod render;
pub mod telemetry;

pub use camera::{CameraConfig, FrameSource, PointCloud, RecordingSource, StereoFrame};
pub use detection::ObjectDetector;
pub use models::{Contour, DepthReading, DetectedObject, FrameDetections, HsvRange, Moments};
pub use render::{RenderedFrame, Renderer};
