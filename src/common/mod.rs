pub mod config;
pub mod dimensions;
pub mod error;
pub mod paths;

pub use config::{ApiConfig, Config, ImageConfig, ProbeConfig};
pub use dimensions::Dimensions;
pub use error::{OcrProbeError, Result};
