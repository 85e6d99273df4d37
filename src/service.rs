//! Signing core (C4): orchestrates device creation and chained signing.
//! The only component that mutates device state; everything else
//! (registry, crypto provider) is a passive collaborator it drives.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::crypto::CryptoProvider;
use crate::domain::{Algorithm, SignatureDevice};
use crate::error::ServiceError;
use crate::registry::DeviceRegistry;

pub struct SignTransactionOutcome {
    pub signature: String,
    pub signed_data: String,
}

/// Orchestrates C2 (crypto) and C3 (registry) to implement the two core
/// operations. Cheaply cloneable: both collaborators are held by `Arc`, so
/// handing a clone to each axum request is just two refcount bumps.
#[derive(Clone)]
pub struct SigningCore {
    registry: Arc<DeviceRegistry>,
    crypto: Arc<CryptoProvider>,
}

impl SigningCore {
    pub fn new(registry: Arc<DeviceRegistry>, crypto: Arc<CryptoProvider>) -> Self {
        Self { registry, crypto }
    }

    /// Spec §4.4.1. Inputs are assumed already validated by the caller
    /// (C5); an id collision with an existing device replaces it.
    pub async fn create_device(
        &self,
        id: String,
        algorithm: Algorithm,
        label: String,
    ) -> Result<SignatureDevice, ServiceError> {
        let crypto = self.crypto.clone();
        let (public_key, private_key) =
            tokio::task::spawn_blocking(move || crypto.generate_keys(algorithm))
                .await
                .expect("key generation task panicked")?;

        let device = SignatureDevice::new(id, algorithm, public_key, private_key, label);
        self.registry.put(device.clone());
        Ok(device)
    }

    /// Spec §4.4.2, the chained-signing algorithm. Runs entirely under the
    /// device's critical section: any failure releases the lock without
    /// having advanced `signature_counter` or `last_signature`.
    pub async fn sign_transaction(
        &self,
        device_id: &str,
        data: &str,
    ) -> Result<SignTransactionOutcome, ServiceError> {
        let _guard = self.registry.acquire(device_id).await;

        let device = self
            .registry
            .get(device_id)
            .ok_or_else(|| ServiceError::DeviceNotFound(device_id.to_string()))?;

        let prev = if device.signature_counter == 0 {
            BASE64.encode(device.id.as_bytes())
        } else {
            BASE64.encode(&device.last_signature)
        };
        let signed_data = format!("{}_{}_{}", device.signature_counter, data, prev);

        let crypto = self.crypto.clone();
        let algorithm = device.algorithm;
        let private_key = device.private_key.clone();
        let tbs = signed_data.clone().into_bytes();
        let raw_signature =
            tokio::task::spawn_blocking(move || crypto.sign(algorithm, &private_key, &tbs))
                .await
                .expect("signing task panicked")?;

        let mut updated = device;
        updated.signature_counter += 1;
        updated.last_signature = raw_signature.clone();
        self.registry.put(updated);

        Ok(SignTransactionOutcome { signature: BASE64.encode(&raw_signature), signed_data })
    }
}
