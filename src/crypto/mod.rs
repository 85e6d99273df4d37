//! Algorithm-agnostic cryptographic provider (C2), built on top of the
//! key-pair codec (C1, [`codec`]) and the two algorithm implementations
//! ([`rsa_signer`], [`ecc_signer`]).
//!
//! Signing is deliberately stateless: `sign` decodes the caller-supplied
//! private key bytes fresh on every call instead of caching a signer
//! instance. The source this service is modeled on cached one signer per
//! algorithm, which meant two devices sharing an algorithm would silently
//! sign with whichever key was decoded first. Driving every call off the
//! key bytes removes that failure mode entirely, at the cost of re-parsing
//! the key each time — acceptable since signing is already dominated by
//! the RSA/ECDSA primitive itself.

pub mod codec;
mod ecc_signer;
mod rsa_signer;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::Algorithm;
use crate::error::CryptoError;

/// Produces a fresh (public, private) key pair, encoded per [`codec`].
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> Result<(Vec<u8>, Vec<u8>), CryptoError>;
}

struct RsaGenerator;
impl KeyGenerator for RsaGenerator {
    fn generate(&self) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        rsa_signer::generate()
    }
}

struct EccGenerator;
impl KeyGenerator for EccGenerator {
    fn generate(&self) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        ecc_signer::generate()
    }
}

/// Hands out key generators by algorithm and performs stateless signing.
/// Safe to share across threads; the only internal mutable state is the
/// generator cache, which holds no device-specific secrets.
pub struct CryptoProvider {
    generators: RwLock<HashMap<Algorithm, Arc<dyn KeyGenerator>>>,
}

impl CryptoProvider {
    pub fn new() -> Self {
        Self { generators: RwLock::new(HashMap::new()) }
    }

    /// Returns the (possibly cached) generator for `algorithm`.
    pub fn get_generator(&self, algorithm: Algorithm) -> Arc<dyn KeyGenerator> {
        if let Some(generator) = self.generators.read().get(&algorithm) {
            return generator.clone();
        }
        let generator: Arc<dyn KeyGenerator> = match algorithm {
            Algorithm::Rsa => Arc::new(RsaGenerator),
            Algorithm::Ecc => Arc::new(EccGenerator),
        };
        self.generators.write().entry(algorithm).or_insert(generator).clone()
    }

    /// Generates a fresh key pair for `algorithm`.
    pub fn generate_keys(&self, algorithm: Algorithm) -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
        self.get_generator(algorithm).generate()
    }

    /// Signs `message` with the private key given in `private_key`, decoded
    /// fresh for this call.
    pub fn sign(
        &self,
        algorithm: Algorithm,
        private_key: &[u8],
        message: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match algorithm {
            Algorithm::Rsa => rsa_signer::sign(private_key, message),
            Algorithm::Ecc => ecc_signer::sign(private_key, message),
        }
    }
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}
