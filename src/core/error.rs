//! Error types for the planisphere generator
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, PlanisphereError>;

/// Errors that can occur while loading catalogs or rendering parts
#[derive(Error, Debug)]
pub enum PlanisphereError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Latitude inside the equatorial band, where a planisphere doesn't work
    #[error("Latitude {latitude} is inside the excluded equatorial band (|latitude| < {band})")]
    EquatorialLatitude { latitude: f64, band: f64 },

    /// Latitude outside [-90, 90] or not a number
    #[error("Latitude {latitude} is out of range (must be between -90 and 90)")]
    LatitudeOutOfRange { latitude: f64 },

    /// Malformed row in a catalog file
    #[error("{source_name}:{line}: {message}")]
    MalformedRow {
        source_name: String,
        line: usize,
        message: String,
    },

    /// Malformed sexagesimal coordinate
    #[error("Invalid coordinate '{value}': {message}")]
    InvalidCoordinate { value: String, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Theme name not known
    #[error("Unknown theme: {name}")]
    UnknownTheme { name: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// SVG writer misuse or write failure
    #[error("SVG error: {0}")]
    Svg(#[from] crate::formats::SvgError),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PlanisphereError>,
    },
}

impl PlanisphereError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PlanisphereError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        PlanisphereError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a malformed-row error
    pub fn malformed_row(source_name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        PlanisphereError::MalformedRow {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid-coordinate error
    pub fn invalid_coordinate(value: impl Into<String>, message: impl Into<String>) -> Self {
        PlanisphereError::InvalidCoordinate {
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equatorial_error_display() {
        let err = PlanisphereError::EquatorialLatitude {
            latitude: 5.0,
            band: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("5"));
        assert!(msg.contains("equatorial"));
    }

    #[test]
    fn test_malformed_row_names_source_and_line() {
        let err = PlanisphereError::malformed_row("bright_stars.dat", 42, "expected 4 columns");
        assert_eq!(err.to_string(), "bright_stars.dat:42: expected 4 columns");
        assert!(matches!(err, PlanisphereError::MalformedRow { line: 42, .. }));
    }

    #[test]
    fn test_error_with_context() {
        let err = PlanisphereError::invalid_config("bad value");
        let wrapped = err.with_context("loading config");
        assert!(wrapped.to_string().contains("loading config"));
        assert!(wrapped.to_string().contains("bad value"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlanisphereError = io_err.into();
        assert!(matches!(err, PlanisphereError::Io(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(PlanisphereError::invalid_config("test"));
        let with_ctx = result.context("during rendering");
        let err = with_ctx.unwrap_err();
        assert!(err.to_string().contains("during rendering"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: PlanisphereError = json_err.into();
        assert!(matches!(err, PlanisphereError::Json(_)));
    }

    #[test]
    fn test_unknown_theme() {
        let err = PlanisphereError::UnknownTheme {
            name: "neon".to_string(),
        };
        assert!(err.to_string().contains("neon"));
    }
}
