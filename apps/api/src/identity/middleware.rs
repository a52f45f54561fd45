use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects the request unless someone is signed in and the request carries
/// that user's id token as `Authorization: Bearer <token>`. The identity is
/// handed to handlers as an `Extension<UserIdentity>`.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = state.identity.current_user().ok_or(AppError::Unauthorized)?;
    match bearer_token(request.headers()) {
        Some(token) if token == user.id_token => {}
        _ => return Err(AppError::Unauthorized),
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
