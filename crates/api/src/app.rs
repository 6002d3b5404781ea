use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::SessionTokenConfig;

use crate::config::Config;
use crate::middleware::auth::{require_admin, require_registerer};
use crate::routes::{auth, candidates, checkin, health, institutes, invitations};
use crate::services::email::EmailService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub session_tokens: Arc<SessionTokenConfig>,
    pub email: EmailService,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let session_tokens = Arc::new(SessionTokenConfig::with_leeway(
        &config.auth.jwt_secret,
        config.auth.session_ttl_secs,
        config.auth.leeway_secs,
    ));

    let email = EmailService::new(config.email.clone());

    let state = AppState {
        pool,
        config: config.clone(),
        session_tokens,
        email,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes: login, guest pages reached from email links, the
    // institute self-registration lookup, and health probes.
    let public_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/invitations/confirm", get(invitations::confirm))
        .route("/api/invitations/decline", get(invitations::decline))
        .route("/api/invitations/show-qrcode", get(invitations::show_qrcode))
        .route(
            "/api/candidates/register/:token",
            get(candidates::get_institute_by_token),
        )
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::liveness));

    // Admin routes: account, candidate, institute and invitation management.
    let admin_routes = Router::new()
        .route("/api/auth/registerer", post(auth::create_registerer))
        .route("/api/auth/registerers", get(auth::list_registerers))
        .route("/api/auth/registerer/:id/status", put(auth::update_status))
        .route("/api/auth/registerer/:id", delete(auth::delete_registerer))
        .route("/api/invitations/send-emails", post(invitations::send_invitations))
        .route("/api/candidates", post(candidates::create_candidate))
        .route("/api/candidates", get(candidates::list_candidates))
        .route("/api/candidates/:id", delete(candidates::delete_candidate))
        .route("/api/institutes", get(institutes::list_institutes))
        .route("/api/institutes", post(institutes::create_institute))
        .route("/api/institutes/:id", delete(institutes::delete_institute))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Check-in gate routes: registerers and admins, with a live suspension
    // check on every request.
    let checkin_routes = Router::new()
        .route("/api/checkin/:invitation_id", get(checkin::get_checkin_details))
        .route("/api/checkin/:invitation_id", post(checkin::check_in))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_registerer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(checkin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
