pub mod artifact;
pub mod color;
pub mod mapping;

pub use artifact::OutputArtifact;
pub use color::Rgb;
pub use mapping::{AnimationFrame, AnimationMapping};
