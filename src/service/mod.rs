pub mod client;
pub mod protocol;

pub use client::{HttpOcrClient, OcrSubmitter, Submission};
pub use protocol::{FailureReason, OcrRequest, Recognition};
