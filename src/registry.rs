//! Device registry (C3): an id-keyed map plus a key-scoped mutual-exclusion
//! facility. The map and the per-id lock table are independent so the sign
//! path can hold a device's lock across reads, cryptographic work, and a
//! write without blocking unrelated devices.
//!
//! Per-id locks are `tokio::sync::Mutex`, not `std`/`parking_lot`, because
//! `acquire` is held across an `.await` (cryptographic work runs on a
//! blocking-pool task; see `service::SigningCore::sign_transaction`) and
//! holding a synchronous lock across an await point would be a correctness
//! hazard as well as a clippy lint.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::SignatureDevice;

/// RAII handle on a device's critical section. Dropping it releases the
/// lock; it can't be forgotten on an error exit path since Rust drops it
/// unconditionally when it goes out of scope.
pub struct DeviceGuard {
    _guard: OwnedMutexGuard<()>,
}

#[derive(Default)]
pub struct DeviceRegistry {
    devices: RwLock<HashMap<String, SignatureDevice>>,
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-replace. A create for an id that already exists replaces
    /// the prior record.
    pub fn put(&self, device: SignatureDevice) {
        self.devices.write().insert(device.id.clone(), device);
    }

    /// Returns a snapshot copy; callers cannot mutate the canonical record
    /// through it.
    pub fn get(&self, id: &str) -> Option<SignatureDevice> {
        self.devices.read().get(id).cloned()
    }

    /// Blocks until `id`'s critical section is free, then returns a guard
    /// holding it. The same lock object is reused for every call on a
    /// given id — locks are created once and never removed, which bounds
    /// worst-case memory by the number of distinct ids ever seen.
    pub async fn acquire(&self, id: &str) -> DeviceGuard {
        let lock = {
            let locks = self.locks.read();
            locks.get(id).cloned()
        };
        let lock = match lock {
            Some(lock) => lock,
            None => {
                let mut locks = self.locks.write();
                locks.entry(id.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
            }
        };
        let guard = lock.lock_owned().await;
        DeviceGuard { _guard: guard }
    }
}
