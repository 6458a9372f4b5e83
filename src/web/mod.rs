//! HTTP surface: router, session handling and the HTML handlers.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::warn;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, LogService, TagService};
use crate::state::SharedState;

mod assets;
pub mod auth;
mod error;
pub mod forms;
mod logs;
pub mod messages;
mod observability;
mod search;
mod tags;
pub mod views;

pub use error::WebError;
pub use messages::Locale;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub locale: Locale,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn log_service(&self) -> &Arc<dyn LogService> {
        &self.shared.log_service
    }

    #[must_use]
    pub fn tag_service(&self) -> &Arc<dyn TagService> {
        &self.shared.tag_service
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    let locale = Locale::from_code(&shared.config.read().await.general.locale);
    Arc::new(AppState { shared, locale })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared).await)
}

/// Signing key for the session cookie. Keys shorter than 64 bytes are
/// rejected in favour of a random one, which invalidates sessions on restart.
fn session_key(secret: Option<&str>) -> Key {
    match secret.map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            warn!("server.secret_key is shorter than 64 bytes; using a random session key");
            Key::generate()
        }
        None => {
            warn!("No server.secret_key configured; sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let server = state.shared.config.read().await.server.clone();

    let session_store = SqliteStore::new(state.store().conn.get_sqlite_connection_pool().clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )))
        .with_signed(session_key(server.secret_key.as_deref()));

    let protected_routes = create_protected_router(state.clone());

    Ok(Router::new()
        .merge(protected_routes)
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/logged_out", get(auth::logged_out))
        .route("/static/{*path}", get(assets::serve_asset))
        .layer(session_layer)
        .with_state(state)
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http()))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(logs::index).post(logs::create))
        .route("/edit/{id}", get(logs::edit))
        .route("/update/{id}", post(logs::update))
        .route("/delete/{id}", post(logs::delete))
        .route("/search", get(search::search))
        .route("/tags", get(tags::list))
        .route("/tags/add", post(tags::add))
        .route("/tags/delete/{id}", post(tags::delete))
        .route("/tags/move/{id}/{direction}", post(tags::move_tag))
        .route_layer(middleware::from_fn_with_state(state, auth::require_login))
}
