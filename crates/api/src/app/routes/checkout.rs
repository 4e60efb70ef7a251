use axum::{body::Bytes, extract::Extension, Json};
use serde_json::Value;

use packstore_catalog::CheckoutReceipt;

use crate::app::AppState;
use crate::app::dto;
use crate::app::errors::{ApiError, PACK_NOT_FOUND};

/// Mock checkout: any existing pack is "paid for" successfully.
///
/// The body is read raw so that a missing or empty body behaves like one
/// without `packId` (404) while broken JSON is a 400.
pub async fn checkout(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<CheckoutReceipt>, ApiError> {
    let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|_| ApiError::BadRequest("Malformed request body"))?
    };

    let pack_id = dto::checkout_pack_id(&payload).ok_or(ApiError::NotFound(PACK_NOT_FOUND))?;
    let receipt = packstore_catalog::checkout(&*state.store, &*state.payments, pack_id)?;
    Ok(Json(receipt))
}
