// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Codec configuration.

/// Most fraction digits an `f64` can carry meaningfully.
const MAX_FRACTION_DIGITS: usize = 15;

/// Configuration for the property codecs.
///
/// ```toml
/// geo_fraction_digits = 6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Fraction digits kept when writing GEO coordinates.
    pub geo_fraction_digits: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            geo_fraction_digits: 6,
        }
    }
}

impl CodecConfig {
    /// Load the configuration from a TOML document. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML, has unknown keys,
    /// or holds values out of range.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;
        tracing::debug!(?config, "codec configuration loaded");
        Ok(config)
    }

    /// Check the values are within range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geo_fraction_digits > MAX_FRACTION_DIGITS {
            return Err(ConfigError::Invalid(format!(
                "geo_fraction_digits must be at most {MAX_FRACTION_DIGITS}, got {}",
                self.geo_fraction_digits
            )));
        }
        Ok(())
    }
}

/// Errors from loading a [`CodecConfig`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be deserialized
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_and_overrides() {
        assert_eq!(CodecConfig::from_toml_str("").unwrap(), CodecConfig::default());

        let config = CodecConfig::from_toml_str("geo_fraction_digits = 2").unwrap();
        assert_eq!(config.geo_fraction_digits, 2);
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(
            CodecConfig::from_toml_str("geo_fraction_digits = 16"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CodecConfig::from_toml_str("geo_fraction_digits = \"six\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            CodecConfig::from_toml_str("unknown = 1"),
            Err(ConfigError::Toml(_))
        ));
    }
}
