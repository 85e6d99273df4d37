//! Request/response contracts (C5): the validated shapes the core
//! consumes and produces. Validation is a hard boundary — once a request
//! passes `validate`, the core trusts it completely.

use serde::{Deserialize, Serialize};

use crate::domain::{Algorithm, SignatureDevice};
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    pub id: String,
    pub algorithm: serde_json::Value,
    #[serde(default)]
    pub label: String,
}

impl CreateDeviceRequest {
    /// Validates the raw JSON shape and returns the parsed algorithm tag.
    /// The algorithm is accepted as a bare `Value` rather than
    /// `Algorithm` directly so that an unknown tag (including a
    /// lowercase one) produces a `ValidationError` here, rather than a
    /// generic "invalid JSON" rejection at the `Json` extractor.
    pub fn validate(&self) -> Result<Algorithm, ServiceError> {
        if self.id.is_empty() {
            return Err(ServiceError::Validation("id is required".to_string()));
        }
        match &self.algorithm {
            serde_json::Value::String(s) if s == "RSA" => Ok(Algorithm::Rsa),
            serde_json::Value::String(s) if s == "ECC" => Ok(Algorithm::Ecc),
            other => Err(ServiceError::Validation(format!(
                "invalid algorithm: must be \"RSA\" or \"ECC\", got {other}"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceResponse {
    pub id: String,
    pub algorithm: Algorithm,
    pub public_key: String,
    pub private_key: String,
    pub label: String,
    pub signature_counter: u64,
    pub last_signature: String,
}

impl From<SignatureDevice> for CreateDeviceResponse {
    fn from(device: SignatureDevice) -> Self {
        Self {
            id: device.id,
            algorithm: device.algorithm,
            public_key: String::from_utf8_lossy(&device.public_key).into_owned(),
            private_key: String::from_utf8_lossy(&device.private_key).into_owned(),
            label: device.label,
            signature_counter: device.signature_counter,
            last_signature: base64_encode(&device.last_signature),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionRequest {
    pub device_id: String,
    pub data: String,
}

impl SignTransactionRequest {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.device_id.is_empty() {
            return Err(ServiceError::Validation("deviceId is required".to_string()));
        }
        if self.data.is_empty() {
            return Err(ServiceError::Validation("data is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionResponse {
    pub signature: String,
    pub signed_data: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "pass", version: "v0" }
    }
}

fn base64_encode(bytes: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_id() {
        let req = CreateDeviceRequest {
            id: String::new(),
            algorithm: serde_json::json!("RSA"),
            label: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_lowercase_algorithm() {
        let req = CreateDeviceRequest {
            id: "D1".to_string(),
            algorithm: serde_json::json!("rsa"),
            label: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn accepts_known_algorithms() {
        let rsa = CreateDeviceRequest {
            id: "D1".to_string(),
            algorithm: serde_json::json!("RSA"),
            label: String::new(),
        };
        assert!(matches!(rsa.validate(), Ok(Algorithm::Rsa)));

        let ecc = CreateDeviceRequest {
            id: "D1".to_string(),
            algorithm: serde_json::json!("ECC"),
            label: String::new(),
        };
        assert!(matches!(ecc.validate(), Ok(Algorithm::Ecc)));
    }

    #[test]
    fn rejects_empty_sign_fields() {
        let req = SignTransactionRequest { device_id: String::new(), data: "x".to_string() };
        assert!(req.validate().is_err());

        let req = SignTransactionRequest { device_id: "D1".to_string(), data: String::new() };
        assert!(req.validate().is_err());
    }
}
