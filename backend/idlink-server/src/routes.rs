use crate::api::oauth::oauth;
use crate::{AppState, health};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Email/password auth
        .route("/api/auth/signup", post(crate::signup))
        .route("/api/auth/signin", post(crate::signin))
        .route("/api/auth/me", get(crate::me))
        .route("/api/auth/logout", post(crate::logout))
        // OAuth
        .route("/api/auth/{provider}/start", get(oauth::start))
        .route("/api/auth/{provider}/callback", get(oauth::callback))
        // Authenticated profile
        .route(
            "/api/user/profile",
            get(crate::get_profile).put(crate::update_profile),
        )
        .route("/api/user/password", put(crate::change_password))
        .route("/api/user/account", delete(crate::delete_account))
        .route("/api/user/stats", get(crate::stats))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        // Bearer tokens, no cookies: any origin may call
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
