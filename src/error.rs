//! Error taxonomy: one `thiserror` enum per concern, `#[error(transparent)]`
//! for wrapped causes. `ServiceError` is the one variant that crosses the
//! transport boundary; it implements [`axum::response::IntoResponse`] to
//! carry out the status-code mapping at the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Key material that fails to decode, or decodes to the wrong role/algorithm.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("key bytes are malformed or not valid UTF-8/PEM")]
    Malformed,
    #[error("key bytes do not match the expected role or algorithm")]
    WrongAlgorithm,
}

/// Key generation or signing primitive failure.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Surfaced at the C4/C5 boundary; this is what handlers translate into
/// HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("device not found: {0}")]
    DeviceNotFound(String),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::DeviceNotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Crypto(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Config file missing or malformed at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse { path: String, source: serde_yaml::Error },
}
