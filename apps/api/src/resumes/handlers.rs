use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::HtmlExport;
use crate::models::resume::StoredResume;
use crate::models::user::UserIdentity;
use crate::resumes::ResumeSummary;
use crate::state::AppState;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let docs = state.store.list_by_owner(&user.uid).await?;
    let now = Utc::now();
    Ok(Json(
        docs.iter()
            .map(|doc| ResumeSummary::from_stored(doc, now))
            .collect(),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredResume>, AppError> {
    Ok(Json(state.store.get_by_id(&user.uid, id).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_by_id(&user.uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id/download
pub async fn handle_download_resume(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<HtmlExport, AppError> {
    let doc = state.store.get_by_id(&user.uid, id).await?;
    Ok(HtmlExport::from_record(&doc.record).with_resume_id(doc.id))
}
