use std::io;

use thiserror::Error;

/// Library-wide error type for dagster-chart operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Values failed validation against the chart schema.
    #[error("Invalid values at '{path}': {reason}")]
    InvalidValues { path: String, reason: String },

    /// Values file could not be found.
    #[error("Values file not found: {0}")]
    ValuesFileNotFound(String),

    /// Chart directory could not be found.
    #[error("Chart directory not found: {0}")]
    ChartNotFound(String),

    /// Template missing from the chart.
    #[error("Template '{0}' not found in chart")]
    TemplateNotFound(String),

    /// Template registration or rendering failed.
    #[error("Failed to render template '{template}': {details}")]
    Template { template: String, details: String },

    /// Rendered manifest did not have the expected shape.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Helm execution failed.
    #[error("Helm error running '{command}': {details}")]
    HelmError { command: String, details: String },

    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn invalid_values<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        AppError::InvalidValues { path: path.into(), reason: reason.into() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::InvalidValues { .. }
            | AppError::Yaml(_)
            | AppError::Json(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::ValuesFileNotFound(_)
            | AppError::ChartNotFound(_)
            | AppError::TemplateNotFound(_) => io::ErrorKind::NotFound,
            AppError::Template { .. } | AppError::InvalidManifest(_) => io::ErrorKind::InvalidData,
            AppError::HelmError { .. } => io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_values_reports_path_and_reason() {
        let err = AppError::invalid_values("postgresql.service.port", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid values at 'postgresql.service.port': must be greater than 0"
        );
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let err = AppError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
