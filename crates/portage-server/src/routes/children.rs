use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use portage_core::models::Child;
use portage_storage::CollectionStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SaveResponse {
    success: bool,
}

/// `GET /api/children`: the stored collection, `[]` on a fresh store.
pub async fn list_children(State(state): State<AppState>) -> Result<Json<Vec<Child>>, ApiError> {
    let children = state.store.load().await.map_err(ApiError::ReadFailed)?;
    Ok(Json(children))
}

/// `PUT`/`POST /api/children`: replace the whole collection.
pub async fn replace_children(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Child>>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(children) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state
        .store
        .save(&children)
        .await
        .map_err(ApiError::SaveFailed)?;
    tracing::info!(children = children.len(), "collection replaced");
    Ok(Json(SaveResponse { success: true }))
}
