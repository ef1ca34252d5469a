//! Per-body tunables.
//!
//! Contractual physics constants stay in [`crate::constants`]. `BodyConfig`
//! carries the values that legitimately differ between characters and can be
//! loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BODY_HEIGHT, BODY_WIDTH};

/// Errors raised while loading a [`BodyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read body config {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for a [`BodyConfig`].
    #[error("failed to parse body config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its accepted range.
    #[error("invalid body config: {0}")]
    Invalid(&'static str),
}

/// Tunables for one kinematic body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyConfig {
    /// Body width in world units.
    pub width: f32,
    /// Body height in world units.
    pub height: f32,
    /// Speed stat in percent.
    pub speed_percent: u16,
    /// Jump stat in percent.
    pub jump_percent: u16,
    /// Grants one extra jump per air time.
    pub double_jump: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            width: BODY_WIDTH,
            height: BODY_HEIGHT,
            speed_percent: 100,
            jump_percent: 100,
            double_jump: false,
        }
    }
}

impl BodyConfig {
    /// Parses and validates a config from a JSON string.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for non-positive or non-finite extents.
    ///
    /// # Examples
    /// ```
    /// use footing::config::BodyConfig;
    /// let cfg = BodyConfig::from_json(r#"{ "speed_percent": 140 }"#).unwrap();
    /// assert_eq!(cfg.speed_percent, 140);
    /// assert_eq!(cfg.jump_percent, 100);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// same errors as [`BodyConfig::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the extents.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when width or height is not a positive
    /// finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::Invalid("width must be positive and finite"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::Invalid("height must be positive and finite"));
        }
        Ok(())
    }

    /// Half the body height: the distance from centre to foot.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Half the body width.
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}
