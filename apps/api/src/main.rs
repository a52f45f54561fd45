mod config;
mod db;
mod errors;
mod export;
mod identity;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod store;
mod suggestions;
mod wizard;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use axum::http::HeaderValue;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::identity::{FirebaseIdentity, IdentityProvider};
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::store::PgDocumentStore;
use crate::suggestions::SuggestionVocabulary;
use crate::wizard::{discard_on_identity_change, WizardSessions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeVault API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgDocumentStore::new(db));

    // Initialize identity provider
    let identity = Arc::new(
        FirebaseIdentity::new(
            config.firebase_api_key.clone(),
            config.firebase_auth_url.clone(),
        )
        .context("Failed to build identity provider client")?,
    );
    info!("Identity provider: {}", config.firebase_auth_url);

    // Load suggestion vocabulary (built-in lists unless overridden)
    let vocabulary = match &config.suggestions_path {
        Some(path) => {
            info!("Loading suggestion vocabulary from {}", path.display());
            SuggestionVocabulary::from_json_file(path)?
        }
        None => SuggestionVocabulary::default(),
    };

    // Wizard sessions are dropped whenever the signed-in user changes
    let sessions = WizardSessions::new();
    tokio::spawn(discard_on_identity_change(
        sessions.clone(),
        identity.subscribe(),
    ));

    // Build app state
    let state = AppState {
        store,
        identity,
        sessions,
        vocabulary: Arc::new(vocabulary),
    };

    // Build router; only the configured front end may call it from a browser
    let origin = HeaderValue::from_str(&config.allowed_origin)
        .context("ALLOWED_ORIGIN must be a valid origin")?;
    info!("Allowed origin: {}", config.allowed_origin);
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origin));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST and PORT must form a valid socket address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
