//! The signing core's data model: the algorithm tag and the signature
//! device record. These are the types the core (`service`)
//! operates on internally; the wire shapes callers actually send and
//! receive live in `api::types` and convert to/from these.

use serde::{Deserialize, Serialize};

/// Closed set of supported signing algorithms. Any other value is rejected
/// at the request boundary before it ever reaches this type — the
/// `Deserialize` impl below is case-sensitive by construction, so `"rsa"`
/// fails the same way an entirely unknown tag would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "ECC")]
    Ecc,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Rsa => "RSA",
            Algorithm::Ecc => "ECC",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The central entity: a per-client key pair plus the running state of its
/// signature chain.
#[derive(Debug, Clone)]
pub struct SignatureDevice {
    pub id: String,
    pub algorithm: Algorithm,
    pub public_key: Vec<u8>,
    pub private_key: Vec<u8>,
    pub label: String,
    pub signature_counter: u64,
    pub last_signature: Vec<u8>,
}

impl SignatureDevice {
    /// A brand-new device has an empty chain: counter at zero, no prior
    /// signature recorded.
    pub fn new(
        id: String,
        algorithm: Algorithm,
        public_key: Vec<u8>,
        private_key: Vec<u8>,
        label: String,
    ) -> Self {
        Self {
            id,
            algorithm,
            public_key,
            private_key,
            label,
            signature_counter: 0,
            last_signature: Vec::new(),
        }
    }
}
