//! Key-pair codec (C1): self-describing PEM framing for public/private key
//! material. Only the algorithm tag is needed to decode a given byte string;
//! the frame's type label makes decoding fail fast on a role/algorithm
//! mismatch instead of silently misinterpreting bytes.

use crate::domain::Algorithm;
use crate::error::EncodingError;

/// Which half of a key pair a frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Public,
    Private,
}

fn label(algorithm: Algorithm, role: KeyRole) -> &'static str {
    match (algorithm, role) {
        (Algorithm::Rsa, KeyRole::Public) => "RSA_PUBLIC_KEY",
        (Algorithm::Rsa, KeyRole::Private) => "RSA_PRIVATE_KEY",
        (Algorithm::Ecc, KeyRole::Public) => "PUBLIC_KEY",
        (Algorithm::Ecc, KeyRole::Private) => "PRIVATE_KEY",
    }
}

/// Wraps algorithm-specific DER bytes in the framed block.
pub fn encode(algorithm: Algorithm, role: KeyRole, der: &[u8]) -> Vec<u8> {
    let pem = pem::Pem::new(label(algorithm, role), der.to_vec());
    pem::encode(&pem).into_bytes()
}

/// Unwraps a framed block, checking that its `<TYPE>` label matches the
/// expected algorithm and role before returning the inner DER bytes.
pub fn decode(bytes: &[u8], algorithm: Algorithm, role: KeyRole) -> Result<Vec<u8>, EncodingError> {
    let text = std::str::from_utf8(bytes).map_err(|_| EncodingError::Malformed)?;
    let parsed = pem::parse(text).map_err(|_| EncodingError::Malformed)?;
    if parsed.tag() != label(algorithm, role) {
        return Err(EncodingError::WrongAlgorithm);
    }
    Ok(parsed.contents().to_vec())
}
