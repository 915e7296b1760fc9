pub mod batch;
pub mod classify;
pub mod convert;
pub mod fs_ops;
pub mod quantize;
pub mod sanitize;

pub use batch::{BatchSummary, PipelineKind, run_batch, run_generic, run_mapped};
pub use quantize::{TransparencyKey, pack_rgb565};
pub use sanitize::sanitize_identifier;
