//! JSON handlers for the corpus API.
//!
//! Every data route first makes sure the corpus is loaded (reloading when the
//! TTL has elapsed), then answers from that one snapshot.

use anyhow::Context;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;

use super::error::ApiError;
use super::SharedStore;
use crate::derive::Publication;
use crate::store::CorpusSnapshot;

#[derive(Serialize)]
struct PublicationList<'a> {
    publications: &'a [Publication],
}

async fn loaded(store: &SharedStore) -> Result<Arc<CorpusSnapshot>, ApiError> {
    let store = store.clone();
    let snapshot = tokio::task::spawn_blocking(move || store.ensure_loaded(false))
        .await
        .context("Corpus reload task failed")??;
    Ok(snapshot)
}

/// GET /api/data - raw corpus keyed by file name
pub async fn all_data(State(store): State<SharedStore>) -> Result<Response, ApiError> {
    let snapshot = loaded(&store).await?;
    Ok(Json(snapshot.all_data()).into_response())
}

/// GET /api/dashboard - dashboard metrics keyed by file name
pub async fn dashboard(State(store): State<SharedStore>) -> Result<Response, ApiError> {
    let snapshot = loaded(&store).await?;
    Ok(Json(snapshot.dashboards()).into_response())
}

/// GET /api/inspector - inspector data keyed by file name
pub async fn inspector(State(store): State<SharedStore>) -> Result<Response, ApiError> {
    let snapshot = loaded(&store).await?;
    Ok(Json(snapshot.inspector()).into_response())
}

/// GET /api/inspector/{id}
pub async fn inspector_record(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let snapshot = loaded(&store).await?;
    let record = snapshot
        .find_record(&id)
        .ok_or_else(|| ApiError::not_found("Record", &id))?;
    Ok(Json(record).into_response())
}

/// GET /api/publications
pub async fn publications(State(store): State<SharedStore>) -> Result<Response, ApiError> {
    let snapshot = loaded(&store).await?;
    Ok(Json(PublicationList {
        publications: snapshot.publications(),
    })
    .into_response())
}

/// GET /api/publications/{pub_id}
pub async fn publication(
    State(store): State<SharedStore>,
    Path(pub_id): Path<String>,
) -> Result<Response, ApiError> {
    let snapshot = loaded(&store).await?;
    let envelope = CorpusSnapshot::publication_envelope(snapshot.find_publication_by_id(&pub_id))
        .ok_or_else(|| ApiError::not_found("Publication", &pub_id))?;
    Ok(Json(envelope).into_response())
}

/// GET /api/health - store status, never triggers a reload
pub async fn health(State(store): State<SharedStore>) -> Json<serde_json::Value> {
    let snapshot = store.snapshot();
    Json(json!({
        "status": "ok",
        "generation": snapshot.generation(),
        "files": snapshot.all_data().len(),
        "publications": snapshot.publications().len(),
        "loadedAt": store.loaded_at_utc().and_then(|at| at.format(&Rfc3339).ok()),
        "stale": store.is_stale(),
    }))
}
