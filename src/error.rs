//! Error types for slitsim.
//!
//! The simulation step itself cannot fail. The only fallible surface is
//! loading and validating an [`ExperimentConfig`](crate::ExperimentConfig).

/// Errors that can occur when loading or validating an experiment config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON.
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value, or a pair of values, is outside its allowed range.
    #[error("invalid value for `{field}`: expected {min} <= value <= {max}")]
    InvalidRange {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let err = ConfigError::InvalidRange {
            field: "source.lifetime_min",
            min: 1.0,
            max: 300.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid value for `source.lifetime_min`: expected 1 <= value <= 300"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
