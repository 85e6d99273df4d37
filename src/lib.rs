//! Transaction signing service: issues per-client signature devices and
//! produces tamper-evident, chained digital signatures over a
//! caller-supplied payload.
//!
//! [`crypto`] is the key-pair codec and crypto provider (C1/C2),
//! [`registry`] is the device registry and per-device locking (C3),
//! [`service`] is the signing core (C4), and [`api::types`] holds the
//! request/response contracts (C5). [`api`] itself is the transport,
//! wired here only so the binary has somewhere to serve from.

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod registry;
pub mod service;
