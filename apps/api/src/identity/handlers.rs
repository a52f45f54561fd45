use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::identity::{Credentials, FederatedCredential};
use crate::models::user::UserIdentity;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserIdentity,
    pub greeting: String,
}

/// Sign-in answer. `idToken` is the bearer token for every protected route.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    #[serde(flatten)]
    pub user: UserIdentity,
    pub id_token: String,
}

impl From<UserIdentity> for SignedIn {
    fn from(user: UserIdentity) -> Self {
        let id_token = user.id_token.clone();
        Self { user, id_token }
    }
}

/// POST /api/v1/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<SignedIn>), AppError> {
    let user = state.identity.sign_up(&credentials).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SignedIn>, AppError> {
    Ok(Json(state.identity.sign_in(&credentials).await?.into()))
}

/// POST /api/v1/auth/federated
pub async fn handle_federated_sign_in(
    State(state): State<AppState>,
    Json(credential): Json<FederatedCredential>,
) -> Result<Json<SignedIn>, AppError> {
    Ok(Json(state.identity.sign_in_federated(&credential).await?.into()))
}

/// POST /api/v1/auth/sign-out
pub async fn handle_sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.identity.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(Extension(user): Extension<UserIdentity>) -> Json<MeResponse> {
    let greeting = format!("Welcome back, {}", user.greeting_name());
    Json(MeResponse { user, greeting })
}
