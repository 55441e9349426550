//! Run configuration module.
//!
//! Handles loading and validating `config.toml`. All values are read once
//! before a run starts and treated as immutable for its duration — there is
//! no ambient state.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! api_token = ""            # Captioning service token; empty = no captions
//! model = "Salesforce/blip-image-captioning-large"
//! prefix = "influencer"     # Output name prefix, used verbatim
//! trigger = "ohwx person"   # Trigger word inserted into every caption
//! width = 1024              # Final image width in pixels (128-4096)
//! height = 1536             # Final image height in pixels (128-4096)
//! aspect_ratio = "2:3"      # "W:H" or a decimal like "0.667"
//! template = "a photo of {trigger}, {caption}"
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::caption::{CAPTION_PLACEHOLDER, TRIGGER_PLACEHOLDER};
use crate::captioner::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// A positive width/height ratio, parsed from `"W:H"` or a bare decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

/// Documented fallback when the configured ratio string does not parse.
pub const DEFAULT_ASPECT_RATIO: AspectRatio = AspectRatio(2.0 / 3.0);

impl AspectRatio {
    /// Parse `"W:H"` (e.g. `"2:3"`) or a bare decimal (e.g. `"0.75"`).
    ///
    /// Both components of a ratio must be positive; a bare value must be a
    /// positive finite number.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let invalid = || ConfigError::Validation(format!("invalid aspect ratio '{s}'"));

        let value = match s.split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| invalid())?;
                let h: f64 = h.trim().parse().map_err(|_| invalid())?;
                if h <= 0.0 {
                    return Err(ConfigError::Validation(format!(
                        "aspect ratio '{s}' has a non-positive height"
                    )));
                }
                w / h
            }
            None => s.parse().map_err(|_| invalid())?,
        };

        if !value.is_finite() || value <= 0.0 {
            return Err(invalid());
        }
        Ok(Self(value))
    }

    /// Parse, falling back to [`DEFAULT_ASPECT_RATIO`] with a warning instead
    /// of aborting the run.
    pub fn parse_or_default(s: &str) -> Self {
        match Self::parse(s) {
            Ok(ratio) => ratio,
            Err(err) => {
                println!("Warning: {err}; falling back to 2:3");
                DEFAULT_ASPECT_RATIO
            }
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Run configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Captioning service bearer token. Empty means no captioning calls are
    /// made and every caption resolves to the empty string.
    pub api_token: String,
    /// Captioning model identifier, opaque to the pipeline.
    pub model: String,
    /// Output name prefix, used verbatim: `{prefix}_0001.jpg`.
    pub prefix: String,
    /// Trigger word substituted for `{trigger}` in the template, verbatim.
    pub trigger: String,
    /// Final output width in pixels.
    pub width: u32,
    /// Final output height in pixels.
    pub height: u32,
    /// Crop target as `"W:H"` or a decimal string. Unparseable values fall
    /// back to 2:3 with a warning.
    pub aspect_ratio: String,
    /// Caption template with `{caption}` and `{trigger}` placeholders.
    pub template: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            model: DEFAULT_MODEL.to_string(),
            prefix: "influencer".to_string(),
            trigger: "ohwx person".to_string(),
            width: 1024,
            height: 1536,
            aspect_ratio: "2:3".to_string(),
            template: format!("a photo of {TRIGGER_PLACEHOLDER}, {CAPTION_PLACEHOLDER}"),
        }
    }
}

/// Final dimensions must stay in this range — no accidental 16px thumbnails
/// or 100-megapixel outputs.
const DIMENSION_RANGE: std::ops::RangeInclusive<u32> = 128..=4096;

impl RunConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !DIMENSION_RANGE.contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between {} and {}, got {value}",
                    DIMENSION_RANGE.start(),
                    DIMENSION_RANGE.end()
                )));
            }
        }
        if self.prefix.is_empty() {
            return Err(ConfigError::Validation("prefix must not be empty".into()));
        }
        Ok(())
    }

    /// Resolve the configured ratio string, falling back to 2:3 on parse
    /// failure rather than aborting the run.
    pub fn ratio(&self) -> AspectRatio {
        AspectRatio::parse_or_default(&self.aspect_ratio)
    }
}

/// A fully documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    format!(
        r#"# lora-prep configuration
# All options are optional - the values below are the defaults.

# Captioning service bearer token. Leave empty to skip captioning entirely
# (every caption will be the empty string).
api_token = ""

# Captioning model identifier.
model = "{DEFAULT_MODEL}"

# Output name prefix, used verbatim: influencer_0001.jpg / influencer_0001.txt
prefix = "influencer"

# Trigger word inserted into every caption via the {{trigger}} placeholder.
trigger = "ohwx person"

# Final output dimensions in pixels (128-4096).
width = 1024
height = 1536

# Crop target ratio: "W:H" or a decimal like "0.667".
# Unparseable values fall back to 2:3.
aspect_ratio = "2:3"

# Caption template. {{caption}} is replaced with the service caption,
# {{trigger}} with the trigger word.
template = "a photo of {{trigger}}, {{caption}}"
"#
    )
}
