use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use packstore_catalog::{SamplePack, ValidationErrors, ValidationIssue, sort_packs, validate_draft};
use packstore_core::PackId;

use crate::app::AppState;
use crate::app::dto::ListPacksQuery;
use crate::app::errors::{ApiError, NO_FEATURED_PACK, PACK_NOT_FOUND};

pub async fn list_packs(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListPacksQuery>,
) -> Result<Json<Vec<SamplePack>>, ApiError> {
    let mut packs = state.store.list()?;
    if let Some(by) = query.sort() {
        sort_packs(&mut packs, by);
    }
    Ok(Json(packs))
}

pub async fn get_featured_pack(Extension(state): Extension<AppState>) -> Result<Json<SamplePack>, ApiError> {
    state
        .store
        .featured()?
        .map(Json)
        .ok_or(ApiError::NotFound(NO_FEATURED_PACK))
}

pub async fn get_pack(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SamplePack>, ApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get(id)?
        .map(Json)
        .ok_or(ApiError::NotFound(PACK_NOT_FOUND))
}

pub async fn create_pack(
    Extension(state): Extension<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SamplePack>), ApiError> {
    let draft = validate_draft(&payload(body)?)?;
    let pack = state.store.create(draft)?;

    tracing::info!(pack_id = %pack.id, title = %pack.title, "pack created");
    Ok((StatusCode::CREATED, Json(pack)))
}

pub async fn update_pack(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SamplePack>, ApiError> {
    // Existence is checked before the body is looked at.
    let id = parse_id(&id)?;
    if state.store.get(id)?.is_none() {
        return Err(ApiError::NotFound(PACK_NOT_FOUND));
    }

    let draft = validate_draft(&payload(body)?)?;
    let pack = state
        .store
        .update(id, draft)?
        .ok_or(ApiError::NotFound(PACK_NOT_FOUND))?;

    tracing::info!(pack_id = %pack.id, "pack updated");
    Ok(Json(pack))
}

pub async fn delete_pack(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if !state.store.delete(id)? {
        return Err(ApiError::NotFound(PACK_NOT_FOUND));
    }

    tracing::info!(pack_id = %id, "pack deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// A path segment that is not a positive integer can never name a pack.
fn parse_id(raw: &str) -> Result<PackId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(PACK_NOT_FOUND))
}

/// An unreadable body is reported like any other invalid pack payload.
fn payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationErrors> {
    body.map(|Json(v)| v)
        .map_err(|rejection| ValidationErrors::single(ValidationIssue::invalid_payload(rejection.body_text())))
}
