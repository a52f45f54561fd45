use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::identity::AuthError;
use crate::store::StoreError;
use crate::wizard::fields::EditError;
use crate::wizard::validation::ValidationErrors;
use crate::wizard::{NavigationError, SessionError, SubmitError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: ValidationErrors,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditError> for AppError {
    fn from(e: EditError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<NavigationError> for AppError {
    fn from(e: NavigationError) -> Self {
        match e {
            NavigationError::OutOfRange(_) => AppError::BadRequest(e.to_string()),
            NavigationError::SkipAhead { .. } => AppError::Conflict(e.to_string()),
            NavigationError::Blocked { step, errors } => AppError::Validation {
                message: format!("Step {step} ({}) is incomplete", step.title()),
                fields: errors,
            },
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => AppError::NotFound(e.to_string()),
            SessionError::Submitting(_) => AppError::Conflict(e.to_string()),
        }
    }
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::NotOnFinalStep(_) => AppError::Conflict(e.to_string()),
            SubmitError::Invalid { step, errors } => AppError::Validation {
                message: format!("Step {step} ({}) is incomplete", step.title()),
                fields: errors,
            },
        }
    }
}

fn auth_status(e: &AuthError) -> (StatusCode, &'static str) {
    match e {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        AuthError::NotSignedIn => (StatusCode::UNAUTHORIZED, "NOT_SIGNED_IN"),
        AuthError::EmailInUse => (StatusCode::CONFLICT, "EMAIL_IN_USE"),
        AuthError::WeakPassword(_) => (StatusCode::BAD_REQUEST, "WEAK_PASSWORD"),
        AuthError::InvalidEmail => (StatusCode::BAD_REQUEST, "INVALID_EMAIL"),
        AuthError::MissingFederatedToken => (StatusCode::BAD_REQUEST, "MISSING_TOKEN"),
        AuthError::UserDisabled => (StatusCode::FORBIDDEN, "USER_DISABLED"),
        AuthError::TooManyAttempts => (StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_ATTEMPTS"),
        AuthError::Provider { .. } | AuthError::Http(_) => {
            (StatusCode::BAD_GATEWAY, "IDENTITY_PROVIDER_ERROR")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = None;
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            AppError::Validation {
                message,
                fields: errors,
            } => {
                fields = Some(errors);
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Auth(e) => {
                let (status, code) = auth_status(&e);
                if status.is_server_error() {
                    tracing::error!("Identity provider error: {e}");
                    (status, code, "The identity provider could not be reached".to_string())
                } else {
                    (status, code, e.to_string())
                }
            }
            AppError::Store(StoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Resume {id} not found"),
            ),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::steps::WizardStep;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_blocked_navigation_is_422_with_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert("summary", "Summary is required");
        let response = AppError::from(NavigationError::Blocked {
            step: WizardStep::Summary,
            errors,
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"]["summary"], "Summary is required");
    }

    #[tokio::test]
    async fn test_store_internals_are_not_leaked() {
        let response =
            AppError::from(StoreError::Database(sqlx::Error::PoolTimedOut)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "A storage error occurred");
        assert!(body["error"].get("fields").is_none());
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(
            AppError::from(AuthError::EmailInUse).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials)
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::TooManyAttempts).into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_session_errors() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            AppError::from(SessionError::NotFound(id)).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(SessionError::Submitting(id)).into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_store_not_found_is_404() {
        let response = AppError::from(StoreError::NotFound(uuid::Uuid::nil())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
