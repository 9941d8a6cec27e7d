use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::common::dimensions::Dimensions;
use crate::common::paths;
use crate::common::error::{OcrProbeError, Result};
use crate::core::synth::MAX_FONT_SCALE;

pub const PLACEHOLDER_APP_ID: &str = "YOUR_APP_ID";
pub const PLACEHOLDER_APP_KEY: &str = "YOUR_APP_KEY";

const MAX_AXIS: u32 = 20_000;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub image: ImageConfig,
}

/// Identity and target of the OCR service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_app_id")]
    pub app_id: String,
    #[serde(default = "default_app_key")]
    pub app_key: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String { "https://api.mathpix.com/v3/text".to_string() }
fn default_app_id() -> String { PLACEHOLDER_APP_ID.to_string() }
fn default_app_key() -> String { PLACEHOLDER_APP_KEY.to_string() }
fn default_timeout() -> u64 { 30 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app_id: default_app_id(),
            app_key: default_app_key(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn has_placeholder_credentials(&self) -> bool {
        self.app_id == PLACEHOLDER_APP_ID || self.app_key == PLACEHOLDER_APP_KEY
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProbeConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_safety_percent")]
    pub safety_percent: u32,
    #[serde(default = "default_sizes")]
    pub sizes: Vec<Dimensions>,
}

fn default_jpeg_quality() -> u8 { 85 }
fn default_pause_ms() -> u64 { 1000 }
fn default_safety_percent() -> u32 { 80 }

pub fn default_sizes() -> Vec<Dimensions> {
    vec![
        Dimensions::new(800, 600),
        Dimensions::new(1200, 900),
        Dimensions::new(1600, 1200),
        Dimensions::new(2000, 1500),
        Dimensions::new(2500, 1875),
        Dimensions::new(3000, 2250),
        Dimensions::new(3500, 2625),
        Dimensions::new(4000, 3000),
    ]
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            pause_ms: default_pause_ms(),
            safety_percent: default_safety_percent(),
            sizes: default_sizes(),
        }
    }
}

impl ProbeConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageConfig {
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    /// Tried in order; the first file that parses as a TrueType font wins.
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<PathBuf>,
}

fn default_text() -> String { "∫ sin(x) dx = -cos(x) + C".to_string() }
fn default_font_scale() -> f32 { 40.0 }

fn default_font_paths() -> Vec<PathBuf> {
    [
        "/System/Library/Fonts/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            text: default_text(),
            font_scale: default_font_scale(),
            font_paths: default_font_paths(),
        }
    }
}

impl Config {
    /// Load from `explicit` if given, otherwise from the first config file found
    /// on the search path, otherwise fall back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match paths::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => {
                tracing::info!("No config file found, using built-in defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OcrProbeError::ConfigNotFound(path.display().to_string()));
        }

        println!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.api.endpoint).map_err(|e| {
            OcrProbeError::Config(format!("Invalid endpoint URL {:?}: {}", self.api.endpoint, e))
        })?;

        if self.api.timeout_seconds < 1 || self.api.timeout_seconds > 300 {
            return Err(OcrProbeError::Config(format!(
                "Timeout must be between 1 and 300 seconds, got {}", self.api.timeout_seconds
            )));
        }

        if self.probe.jpeg_quality < 1 || self.probe.jpeg_quality > 100 {
            return Err(OcrProbeError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}", self.probe.jpeg_quality
            )));
        }

        if self.probe.safety_percent < 1 || self.probe.safety_percent > 100 {
            return Err(OcrProbeError::Config(format!(
                "Safety percent must be between 1 and 100, got {}", self.probe.safety_percent
            )));
        }

        if self.probe.sizes.is_empty() {
            return Err(OcrProbeError::Config("At least one test size is required".to_string()));
        }

        for size in &self.probe.sizes {
            if size.width == 0 || size.width > MAX_AXIS || size.height == 0 || size.height > MAX_AXIS {
                return Err(OcrProbeError::Config(format!(
                    "Test size {} out of range, each axis must be between 1 and {}", size, MAX_AXIS
                )));
            }
        }

        for pair in self.probe.sizes.windows(2) {
            if pair[1].area() <= pair[0].area() {
                return Err(OcrProbeError::Config(format!(
                    "Test sizes must be strictly ascending by area, {} follows {}", pair[1], pair[0]
                )));
            }
        }

        if !self.image.font_scale.is_finite()
            || self.image.font_scale <= 0.0
            || self.image.font_scale > MAX_FONT_SCALE
        {
            return Err(OcrProbeError::Config(format!(
                "Font scale must be above 0 and at most {}, got {}", MAX_FONT_SCALE, self.image.font_scale
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = Config::default();
        assert_eq!(config.api.endpoint, "https://api.mathpix.com/v3/text");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.probe.jpeg_quality, 85);
        assert_eq!(config.probe.pause(), Duration::from_secs(1));
        assert_eq!(config.probe.safety_percent, 80);
        assert_eq!(config.probe.sizes.len(), 8);
        assert_eq!(config.probe.sizes[0], Dimensions::new(800, 600));
        assert_eq!(config.probe.sizes[7], Dimensions::new(4000, 3000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            app_id = "my-app"
            app_key = "secret"

            [probe]
            pause_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.api.app_id, "my-app");
        assert!(!config.api.has_placeholder_credentials());
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.probe.pause_ms, 0);
        assert_eq!(config.probe.sizes, default_sizes());
        assert_eq!(config.image.font_scale, 40.0);
    }

    #[test]
    fn sizes_parse_from_inline_tables() {
        let config = Config::from_toml(
            r#"
            [probe]
            sizes = [{ width = 100, height = 50 }, { width = 200, height = 100 }]
            "#,
        )
        .unwrap();
        assert_eq!(config.probe.sizes, vec![Dimensions::new(100, 50), Dimensions::new(200, 100)]);
    }

    #[test]
    fn rejects_non_ascending_sizes() {
        let mut config = Config::default();
        config.probe.sizes = vec![Dimensions::new(1200, 900), Dimensions::new(800, 600)];
        assert!(matches!(config.validate(), Err(OcrProbeError::Config(_))));

        config.probe.sizes = vec![Dimensions::new(800, 600), Dimensions::new(600, 800)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_or_zero_sizes() {
        let mut config = Config::default();
        config.probe.sizes.clear();
        assert!(config.validate().is_err());

        config.probe.sizes = vec![Dimensions::new(0, 600)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_quality_and_endpoint() {
        let mut config = Config::default();
        config.probe.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_font_scale() {
        let result = Config::from_toml("[image]\nfont_scale = 1e9\n");
        assert!(matches!(result, Err(OcrProbeError::Config(_))));

        let mut config = Config::default();
        config.image.font_scale = 0.0;
        assert!(config.validate().is_err());

        config.image.font_scale = MAX_FONT_SCALE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs").join(paths::CONFIG_FILE_NAME);
        let config = Config::load_from_path(&path).unwrap();
        let defaults = Config::default();

        assert_eq!(config.api.endpoint, defaults.api.endpoint);
        assert!(config.api.has_placeholder_credentials());
        assert_eq!(config.probe.sizes, defaults.probe.sizes);
        assert_eq!(config.probe.jpeg_quality, defaults.probe.jpeg_quality);
        assert_eq!(config.image.text, defaults.image.text);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/ocrprobe.toml")));
        assert!(matches!(result, Err(OcrProbeError::ConfigNotFound(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::from_toml("[probe]\njpeg_quality = \"high\"");
        assert!(matches!(result, Err(OcrProbeError::ConfigParse(_))));
    }
}
