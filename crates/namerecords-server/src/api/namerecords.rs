// ABOUTME: Name record API handlers for listing, creating, reading, deleting, and updating records.
// ABOUTME: Item routes share a lookup middleware that answers 404 before any verb handler runs.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use namerecords_core::{NameRecord, NameRecordFields, SerializedNameRecord, serialize, validate};

use crate::app_state::SharedState;
use crate::error::ApiError;

pub const COLLECTION_PATH: &str = "/api/namerecords";

/// Path of a single record, as sent in the Location header.
pub fn record_path(id: i64) -> String {
    format!("{COLLECTION_PATH}/{id}")
}

/// Middleware for `/api/namerecords/{namerecord_id}`: loads the record and
/// stores it in the request extensions, or answers 404.
pub async fn load_name_record(
    State(state): State<SharedState>,
    Path(namerecord_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let record = match namerecord_id.parse::<i64>() {
        Ok(id) => state.store.lock().await.get_by_id(id)?,
        Err(_) => None,
    };

    let Some(record) = record else {
        tracing::warn!(id = %namerecord_id, "request for unknown name record");
        return Err(ApiError::NotFound(namerecord_id));
    };

    req.extensions_mut().insert(record);
    Ok(next.run(req).await)
}

/// GET /api/namerecords - List all records.
pub async fn list_name_records(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SerializedNameRecord>>, ApiError> {
    let records = state.store.lock().await.list_all()?;
    Ok(Json(records.iter().map(serialize).collect()))
}

/// POST /api/namerecords - Create a record.
pub async fn create_name_record(
    State(state): State<SharedState>,
    payload: Result<Json<NameRecordFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(fields) = payload?;

    let candidate = fields.require_all().inspect_err(|e| {
        tracing::warn!(error = %e, "rejected name record without required field");
    })?;
    validate(&NameRecordFields::from(&candidate))?;

    let record = state.store.lock().await.insert(&candidate)?;
    tracing::info!(id = record.id, name = %record.name, "created name record");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, record_path(record.id))],
        Json(serialize(&record)),
    ))
}

/// GET /api/namerecords/{namerecord_id} - Read one record.
pub async fn get_name_record(Extension(record): Extension<NameRecord>) -> Json<SerializedNameRecord> {
    Json(serialize(&record))
}

/// DELETE /api/namerecords/{namerecord_id} - Remove one record.
pub async fn delete_name_record(
    State(state): State<SharedState>,
    Extension(record): Extension<NameRecord>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.lock().await.delete_by_id(record.id)?;
    tracing::info!(id = record.id, removed, "deleted name record");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/namerecords/{namerecord_id} - Update the supplied fields of one record.
pub async fn update_name_record(
    State(state): State<SharedState>,
    Extension(record): Extension<NameRecord>,
    payload: Result<Json<NameRecordFields>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(fields) = payload?;

    if !fields.has_update() {
        tracing::warn!(id = record.id, "update request carried no values");
        return Err(ApiError::NoUpdateFields);
    }
    validate(&fields)?;

    let affected = state
        .store
        .lock()
        .await
        .update(record.id, &fields.into_patch())?;
    if affected == 0 {
        // Deleted between the lookup and this update.
        tracing::warn!(id = record.id, "update matched no rows");
    } else {
        tracing::info!(id = record.id, "updated name record");
    }
    Ok(StatusCode::NO_CONTENT)
}
