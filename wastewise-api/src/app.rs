/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use wastewise_api::{app::AppState, config::Config};
/// use wastewise_shared::db::MemoryDb;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(MemoryDb::seeded(), config);
/// let app = wastewise_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::jwt_auth_layer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use wastewise_shared::db::MemoryDb;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Both
/// fields are cheap to clone and share the same underlying data.
#[derive(Clone)]
pub struct AppState {
    /// In-memory collections
    pub db: MemoryDb,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: MemoryDb, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /login       # public
///     │   ├── POST /register    # public
///     │   └── GET  /user        # bearer
///     ├── /users                # bearer, admin
///     │   ├── GET, POST /
///     │   └── GET, PUT, DELETE /:id
///     ├── /schedule             # bearer
///     │   ├── GET /
///     │   └── GET, PUT /:id     # PUT: collector or admin
///     └── /invoices             # bearer
///         ├── GET, POST /       # GET ?userId= & ?id=; POST: admin
///         └── GET, PUT /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let public_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register));

    let protected_routes = Router::new()
        .route("/auth/user", get(routes::auth::current_user))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/schedule", get(routes::schedule::list_schedule))
        .route(
            "/schedule/:id",
            get(routes::schedule::get_schedule).put(routes::schedule::update_schedule),
        )
        .route(
            "/invoices",
            get(routes::invoices::list_invoices).post(routes::invoices::create_invoice),
        )
        .route(
            "/invoices/:id",
            get(routes::invoices::get_invoice).put(routes::invoices::update_invoice),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = public_routes.merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
