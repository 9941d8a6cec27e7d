pub mod encode;
pub mod probe;
pub mod search;
pub mod synth;

pub use probe::{ProbeResult, ProbeRunner, Prober};
pub use search::{SearchDriver, SearchReport, SearchState};
pub use synth::{FontFace, ImageSynthesizer, TestImage};
