//! RSA key generation and signing. Modulus size is fixed at 2048 bits; the
//! source this service is modeled on also had an unused 512-bit path, which
//! is not carried forward (see DESIGN.md).

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use super::codec::{self, KeyRole};
use crate::domain::Algorithm;
use crate::error::CryptoError;

const MODULUS_BITS: usize = 2048;

pub fn generate() -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let private_key = RsaPrivateKey::new(&mut OsRng, MODULUS_BITS)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_der = private_key
        .to_pkcs1_der()
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_der = public_key
        .to_pkcs1_der()
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;

    let private_pem = codec::encode(Algorithm::Rsa, KeyRole::Private, private_der.as_bytes());
    let public_pem = codec::encode(Algorithm::Rsa, KeyRole::Public, public_der.as_bytes());
    Ok((public_pem, private_pem))
}

/// SHA-256 digest then PKCS#1 v1.5 signature; deterministic, so no RNG is
/// threaded through at sign time.
pub fn sign(private_key_pem: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let der = codec::decode(private_key_pem, Algorithm::Rsa, KeyRole::Private)
        .map_err(CryptoError::Encoding)?;
    let private_key =
        RsaPrivateKey::from_pkcs1_der(&der).map_err(|e| CryptoError::Signing(e.to_string()))?;
    let signing_key = SigningKey::<Sha256>::new(private_key);
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(signature.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1v15::VerifyingKey;
    use rsa::signature::Verifier;

    #[test]
    fn generates_and_signs_and_verifies() {
        let (public_pem, private_pem) = generate().unwrap();
        let signature = sign(&private_pem, b"hello").unwrap();

        let public_der = codec::decode(&public_pem, Algorithm::Rsa, KeyRole::Public).unwrap();
        let public_key = RsaPublicKey::from_pkcs1_der(&public_der).unwrap();
        let verifying_key = VerifyingKey::<Sha256>::new(public_key);
        let sig = rsa::pkcs1v15::Signature::try_from(signature.as_slice()).unwrap();
        verifying_key.verify(b"hello", &sig).unwrap();
    }
}
