//! ECDSA over NIST P-384 key generation and signing.

use p384::ecdsa::signature::hazmat::PrehashSigner;
use p384::ecdsa::{Signature, SigningKey};
use p384::pkcs8::EncodePublicKey;
use p384::SecretKey;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use super::codec::{self, KeyRole};
use crate::domain::Algorithm;
use crate::error::CryptoError;

pub fn generate() -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key();

    let private_der = secret_key
        .to_sec1_der()
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_der = public_key
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;

    let private_pem = codec::encode(Algorithm::Ecc, KeyRole::Private, &private_der);
    let public_pem = codec::encode(Algorithm::Ecc, KeyRole::Public, public_der.as_bytes());
    Ok((public_pem, private_pem))
}

/// SHA-256 digest then ECDSA over P-384 via `sign_prehash` — P-384's native
/// digest is SHA-384, so the curve's own `Signer` would hash with the wrong
/// algorithm; signing the SHA-256 digest directly keeps the digest fixed at
/// SHA-256 regardless of curve. Output is the DER encoding of
/// `SEQUENCE { INTEGER r, INTEGER s }`.
pub fn sign(private_key_pem: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let der = codec::decode(private_key_pem, Algorithm::Ecc, KeyRole::Private)
        .map_err(CryptoError::Encoding)?;
    let secret_key =
        SecretKey::from_sec1_der(&der).map_err(|e| CryptoError::Signing(e.to_string()))?;
    let signing_key = SigningKey::from(secret_key);
    let digest = Sha256::digest(message);
    let signature: Signature = signing_key
        .sign_prehash(&digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(signature.to_der().as_bytes().to_vec())
}
