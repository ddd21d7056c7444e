// src/error.rs - Load-time validation errors

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can reject a configuration document.
///
/// Validation variants name the offending entry and field so the author can
/// find it in the source document. The first failure aborts the load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize configuration TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid color value for `colors.{token}`: {value:?} (expected #RRGGBB)")]
    InvalidColorValue { token: String, value: String },
    #[error("Invalid color group `colors.{group}`: {reason}")]
    InvalidColorGroup { group: String, reason: String },
    #[error("Invalid font stack `fontFamily.{font}`: {reason}")]
    InvalidFontStack { font: String, reason: String },
    #[error("Invalid length for `borderWidth.{key}`: {value:?}")]
    InvalidLength { key: String, value: String },
    #[error("Invalid keyframe sequence `keyframes.{keyframe}`: {reason}")]
    InvalidKeyframeSequence { keyframe: String, reason: String },
    #[error("Invalid animation `animation.{animation}`: {reason}")]
    InvalidAnimation { animation: String, reason: String },
    #[error("Animation `animation.{animation}` references unknown keyframe `{keyframe}`")]
    DanglingAnimationReference { animation: String, keyframe: String },
    #[error("Invalid safelist pattern {pattern:?}: {reason}")]
    InvalidSafelistPattern { pattern: String, reason: String },
    #[error("Invalid safelist class {class:?}: class names must be non-empty and contain no whitespace")]
    InvalidSafelistClass { class: String },
    #[error("Invalid content glob {pattern:?}: {source}")]
    InvalidContentGlob {
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}

impl ConfigError {
    /// Name of the entry that failed validation, if the error is about one.
    pub fn entry(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidColorValue { token, .. } => Some(token.as_str()),
            ConfigError::InvalidColorGroup { group, .. } => Some(group.as_str()),
            ConfigError::InvalidFontStack { font, .. } => Some(font.as_str()),
            ConfigError::InvalidLength { key, .. } => Some(key.as_str()),
            ConfigError::InvalidKeyframeSequence { keyframe, .. } => Some(keyframe.as_str()),
            ConfigError::InvalidAnimation { animation, .. }
            | ConfigError::DanglingAnimationReference { animation, .. } => Some(animation.as_str()),
            ConfigError::InvalidSafelistPattern { pattern, .. }
            | ConfigError::InvalidContentGlob { pattern, .. } => Some(pattern.as_str()),
            ConfigError::InvalidSafelistClass { class } => Some(class.as_str()),
            ConfigError::Read { .. } | ConfigError::Parse(_) | ConfigError::Serialize(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_entry_and_field() {
        let err = ConfigError::InvalidColorValue {
            token: "winter.leaf1".to_string(),
            value: "#12345".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("colors.winter.leaf1"));
        assert!(message.contains("#12345"));
        assert_eq!(err.entry(), Some("winter.leaf1"));
    }

    #[test]
    fn test_parse_error_has_no_entry() {
        let err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        assert_eq!(ConfigError::from(err).entry(), None);
    }
}
