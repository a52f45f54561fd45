use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::HtmlExport;
use crate::models::resume::{RepeatableSection, ResumeRecord};
use crate::models::user::UserIdentity;
use crate::state::AppState;
use crate::suggestions::ExampleTarget;
use crate::wizard::fields::FieldEdit;
use crate::wizard::manager::FormStateManager;
use crate::wizard::steps::{WizardStep, STEP_COUNT};
use crate::wizard::validation::ValidationErrors;

/// Snapshot of one wizard as the client sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub id: Uuid,
    pub current_step: WizardStep,
    pub step_title: &'static str,
    pub total_steps: u8,
    pub is_final_step: bool,
    pub record: ResumeRecord,
    pub errors: ValidationErrors,
    pub suggestions: Vec<String>,
}

impl WizardView {
    fn of(id: Uuid, manager: &FormStateManager) -> Self {
        let step = manager.current_step();
        Self {
            id,
            current_step: step,
            step_title: step.title(),
            total_steps: STEP_COUNT,
            is_final_step: step == WizardStep::LAST,
            record: manager.record().clone(),
            errors: manager.errors().clone(),
            suggestions: manager.suggestions().to_vec(),
        }
    }
}

#[derive(Deserialize)]
pub struct AddEntryRequest {
    pub section: RepeatableSection,
}

#[derive(Deserialize)]
pub struct GoToStepRequest {
    pub step: u8,
}

#[derive(Deserialize)]
pub struct ApplyExampleRequest {
    pub target: ExampleTarget,
    pub index: Option<usize>,
    pub example: usize,
}

/// Runs `f` on the caller's session and returns the resulting view.
async fn mutate<E, F>(
    state: &AppState,
    user: &UserIdentity,
    id: Uuid,
    f: F,
) -> Result<Json<WizardView>, AppError>
where
    F: FnOnce(&mut FormStateManager) -> Result<(), E>,
    AppError: From<E>,
{
    state
        .sessions
        .with_session(id, &user.uid, |m| -> Result<WizardView, AppError> {
            f(m)?;
            Ok(WizardView::of(id, m))
        })
        .await?
        .map(Json)
}

/// POST /api/v1/wizard
pub async fn handle_open_wizard(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let id = state
        .sessions
        .open(&user.uid, state.vocabulary.clone())
        .await;
    let view = state
        .sessions
        .view(id, &user.uid, |m| WizardView::of(id, m))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/wizard/:id
pub async fn handle_get_wizard(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let view = state
        .sessions
        .view(id, &user.uid, |m| WizardView::of(id, m))
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/wizard/:id
pub async fn handle_close_wizard(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.close(id, &user.uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/wizard/:id/fields
pub async fn handle_set_field(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(edit): Json<FieldEdit>,
) -> Result<Json<WizardView>, AppError> {
    mutate(&state, &user, id, |m| m.set_field(&edit)).await
}

/// POST /api/v1/wizard/:id/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddEntryRequest>,
) -> Result<Json<WizardView>, AppError> {
    mutate::<AppError, _>(&state, &user, id, |m| {
        m.add_entry(req.section);
        Ok(())
    })
    .await
}

/// DELETE /api/v1/wizard/:id/entries/:section/:index
///
/// An index past the end is ignored and the unchanged view is returned.
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((id, section, index)): Path<(Uuid, RepeatableSection, usize)>,
) -> Result<Json<WizardView>, AppError> {
    mutate::<AppError, _>(&state, &user, id, |m| {
        m.remove_entry(section, index);
        Ok(())
    })
    .await
}

/// POST /api/v1/wizard/:id/step
pub async fn handle_go_to_step(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<GoToStepRequest>,
) -> Result<Json<WizardView>, AppError> {
    mutate(&state, &user, id, |m| m.go_to_step(req.step).map(|_| ())).await
}

/// POST /api/v1/wizard/:id/next
pub async fn handle_advance(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    mutate(&state, &user, id, |m| m.advance().map(|_| ())).await
}

/// POST /api/v1/wizard/:id/previous
pub async fn handle_retreat(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    mutate::<AppError, _>(&state, &user, id, |m| {
        m.retreat();
        Ok(())
    })
    .await
}

/// POST /api/v1/wizard/:id/examples
pub async fn handle_apply_example(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApplyExampleRequest>,
) -> Result<Json<WizardView>, AppError> {
    mutate(&state, &user, id, |m| {
        m.apply_example(req.target, req.index, req.example)
    })
    .await
}

/// POST /api/v1/wizard/:id/submit
///
/// Stores the record and answers with the rendered attachment. While the
/// store call is in flight the session refuses edits and further submits; it
/// is closed once the store accepts the record and reopened if it does not.
pub async fn handle_submit(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, HtmlExport), AppError> {
    let record = state.sessions.begin_submit(id, &user.uid).await??;

    let resume_id = match state.store.create(&user.uid, &record).await {
        Ok(resume_id) => resume_id,
        Err(e) => {
            state.sessions.abort_submit(id).await;
            warn!("Saving wizard {id} failed, session kept: {e}");
            return Err(e.into());
        }
    };

    state.sessions.finish_submit(id).await;
    info!("Wizard {id} submitted as resume {resume_id}");

    Ok((
        StatusCode::CREATED,
        HtmlExport::from_record(&record).with_resume_id(resume_id),
    ))
}
