//! axum handlers for the three transport endpoints. Each
//! handler's only job is to validate, call into the signing core, and
//! shape the response — identical in spirit to `anvil-server`'s
//! `handle`/`handle_call`, but over plain REST routes instead of a JSON-RPC
//! envelope, since that's the shape these routes describe.

use axum::extract::State;
use axum::Json;
use tracing::info;

use super::types::{
    CreateDeviceRequest, CreateDeviceResponse, HealthResponse, SignTransactionRequest,
    SignTransactionResponse,
};
use crate::error::ServiceError;
use crate::service::SigningCore;

pub async fn create_device(
    State(core): State<SigningCore>,
    Json(request): Json<CreateDeviceRequest>,
) -> Result<Json<CreateDeviceResponse>, ServiceError> {
    let algorithm = request.validate()?;
    let device = core.create_device(request.id, algorithm, request.label).await?;
    info!(device_id = %device.id, algorithm = %device.algorithm, "created signature device");
    Ok(Json(device.into()))
}

pub async fn sign_transaction(
    State(core): State<SigningCore>,
    Json(request): Json<SignTransactionRequest>,
) -> Result<Json<SignTransactionResponse>, ServiceError> {
    request.validate()?;
    let outcome = core.sign_transaction(&request.device_id, &request.data).await?;
    Ok(Json(SignTransactionResponse {
        signature: outcome.signature,
        signed_data: outcome.signed_data,
    }))
}

/// Liveness probe. Only registered for `GET`; axum's router answers any
/// other method on this path with `405` on its own, so this
/// handler only needs to cover the happy path.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
