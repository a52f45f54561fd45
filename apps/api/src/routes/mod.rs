pub mod health;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::export::RESUME_ID_HEADER;
use crate::identity::{handlers as auth, middleware::require_user};
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::suggestions::handlers as suggestions;
use crate::wizard::handlers as wizard;

/// CORS for the single front-end origin. Any other origin gets no
/// `Access-Control-Allow-Origin` and the browser withholds the response.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            HeaderName::from_static(RESUME_ID_HEADER),
        ])
}

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/v1/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/v1/auth/federated", post(auth::handle_federated_sign_in));

    let protected = Router::new()
        .route("/api/v1/auth/sign-out", post(auth::handle_sign_out))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Wizard
        .route("/api/v1/wizard", post(wizard::handle_open_wizard))
        .route(
            "/api/v1/wizard/:id",
            get(wizard::handle_get_wizard).delete(wizard::handle_close_wizard),
        )
        .route("/api/v1/wizard/:id/fields", patch(wizard::handle_set_field))
        .route("/api/v1/wizard/:id/entries", post(wizard::handle_add_entry))
        .route(
            "/api/v1/wizard/:id/entries/:section/:index",
            delete(wizard::handle_remove_entry),
        )
        .route("/api/v1/wizard/:id/step", post(wizard::handle_go_to_step))
        .route("/api/v1/wizard/:id/next", post(wizard::handle_advance))
        .route("/api/v1/wizard/:id/previous", post(wizard::handle_retreat))
        .route(
            "/api/v1/wizard/:id/examples",
            post(wizard::handle_apply_example),
        )
        .route("/api/v1/wizard/:id/submit", post(wizard::handle_submit))
        // Suggestions
        .route(
            "/api/v1/suggestions/examples/:target",
            get(suggestions::handle_list_examples),
        )
        .route(
            "/api/v1/suggestions/critique",
            post(suggestions::handle_critique),
        )
        // Saved resumes
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(resumes::handle_download_resume),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    public.merge(protected).with_state(state)
}
