// Core modules
pub mod core;
pub mod service;
pub mod cli;
pub mod common;

// Re-export commonly used types
pub use crate::common::{Config, Dimensions, OcrProbeError, Result};
pub use crate::core::{ImageSynthesizer, ProbeResult, ProbeRunner, Prober, SearchDriver, SearchReport, SearchState};
pub use crate::service::{FailureReason, HttpOcrClient, OcrSubmitter};
