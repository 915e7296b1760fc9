// Library exports for sprite2h

pub mod config;
pub mod model;
pub mod pipeline;

pub use config::Config;
pub use model::{AnimationFrame, AnimationMapping, OutputArtifact, Rgb};
pub use pipeline::{BatchSummary, PipelineKind, run_batch};
