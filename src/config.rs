//! Key formatting configuration.
//!
//! ```toml
//! # sigil.toml
//! [format]
//! hyphen = true
//! underline = false
//! dollar = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{KeyError, KeyResult};

/// File looked up in the working directory by [`FormatToggles::discover`].
pub const CONFIG_FILE: &str = "sigil.toml";

/// Which dividers the normalizer strips beyond its fixed rules.
///
/// Configure once at startup and hand a copy to each [`crate::normalize::KeyNormalizer`].
/// Changing the toggles while other threads normalize with an older copy
/// is allowed; those calls keep the rules they started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatToggles {
    /// Strip `-` from object and scalar keys.
    pub hyphen: bool,
    /// Strip `_` from all keys.
    pub underline: bool,
    /// Strip `$` from all keys.
    pub dollar: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    format: FormatToggles,
}

impl FormatToggles {
    pub fn all() -> Self {
        Self {
            hyphen: true,
            underline: true,
            dollar: true,
        }
    }

    pub fn with_hyphen(mut self, on: bool) -> Self {
        self.hyphen = on;
        self
    }

    pub fn with_underline(mut self, on: bool) -> Self {
        self.underline = on;
        self
    }

    pub fn with_dollar(mut self, on: bool) -> Self {
        self.dollar = on;
        self
    }

    /// Whether any divider toggle is on.
    pub fn any(&self) -> bool {
        self.hyphen || self.underline || self.dollar
    }

    /// Read the `[format]` table of a TOML document. Missing keys are off.
    pub fn from_toml_str(content: &str) -> KeyResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| KeyError::Config(e.to_string()))?;
        Ok(file.format)
    }

    pub fn load(path: impl AsRef<Path>) -> KeyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the first config found in [`config_paths`], or the defaults.
    pub fn discover() -> KeyResult<Self> {
        match config_paths().into_iter().find(|p| p.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading format toggles");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// `./sigil.toml`, then `<config dir>/sigil/config.toml`.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("sigil").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let toggles = FormatToggles::from_toml_str(
            r#"
            [format]
            hyphen = true
            dollar = true
            "#,
        )
        .unwrap();
        assert_eq!(
            toggles,
            FormatToggles::default().with_hyphen(true).with_dollar(true)
        );
        assert!(toggles.any());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(FormatToggles::from_toml_str("").unwrap(), FormatToggles::default());
        assert!(!FormatToggles::default().any());
    }

    #[test]
    fn test_bad_toml() {
        let err = FormatToggles::from_toml_str("[format]\nhyphen = \"yes\"").unwrap_err();
        assert!(matches!(err, KeyError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FormatToggles::load("/nonexistent/sigil.toml").unwrap_err();
        assert!(matches!(err, KeyError::Io(_)));
    }

    #[test]
    fn test_config_paths() {
        assert_eq!(config_paths()[0], PathBuf::from("sigil.toml"));
    }
}
