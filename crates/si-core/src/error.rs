//! Error types for selinf

use thiserror::Error;

/// selinf error type
#[derive(Error, Debug)]
pub enum Error {
    /// Two dimensions that must agree do not.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A scalar parameter is outside its domain (e.g. a non-positive scale).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let e = Error::ShapeMismatch("3 vs 4".into());
        assert_eq!(e.to_string(), "Shape mismatch: 3 vs 4");
        let e = Error::InvalidParameter("sigma must be > 0".into());
        assert_eq!(e.to_string(), "Invalid parameter: sigma must be > 0");
    }

    #[test]
    fn test_json_from() {
        let err: Error = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
