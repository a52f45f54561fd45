use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestions::{critique_as, examples_for, fill_placeholders, CritiqueKind, ExampleTarget};

#[derive(Deserialize)]
pub struct CritiqueRequest {
    pub text: String,
    #[serde(default)]
    pub kind: CritiqueKind,
}

#[derive(Serialize)]
pub struct CritiqueResponse {
    pub suggestions: Vec<String>,
}

#[derive(Deserialize)]
pub struct ExamplesQuery {
    pub role: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleStatement {
    pub index: usize,
    pub template: &'static str,
    pub filled: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleList {
    pub target: ExampleTarget,
    /// Whether applying an example needs an entry index.
    pub per_entry: bool,
    pub examples: Vec<ExampleStatement>,
}

/// POST /api/v1/suggestions/critique
pub async fn handle_critique(
    State(state): State<AppState>,
    Json(req): Json<CritiqueRequest>,
) -> Result<Json<CritiqueResponse>, AppError> {
    Ok(Json(CritiqueResponse {
        suggestions: critique_as(req.kind, &state.vocabulary, &req.text),
    }))
}

/// GET /api/v1/suggestions/examples/:target
pub async fn handle_list_examples(
    Path(target): Path<ExampleTarget>,
    Query(params): Query<ExamplesQuery>,
) -> Result<Json<ExampleList>, AppError> {
    let examples = examples_for(target)
        .iter()
        .enumerate()
        .map(|(index, template)| ExampleStatement {
            index,
            template,
            filled: fill_placeholders(template, params.role.as_deref()),
        })
        .collect();

    Ok(Json(ExampleList {
        target,
        per_entry: target.is_per_entry(),
        examples,
    }))
}
