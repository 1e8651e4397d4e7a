/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use hunt_api::{app::{build_router, AppState}, config::Config};
/// use hunt_shared::db::InMemoryStore;
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(InMemoryStore::new()), config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use hunt_shared::db::DocumentStore;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding hunts and tasks
    pub store: Arc<dyn DocumentStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check
/// └── /api/
///     ├── /hunts
///     │   ├── GET    /            # List hunts
///     │   ├── POST   /            # Create hunt
///     │   ├── GET    /:id         # Get hunt
///     │   └── DELETE /:id         # Delete hunt
///     └── /tasks
///         ├── GET    /            # List tasks
///         ├── POST   /            # Create task
///         ├── PUT    /            # Create task
///         ├── GET    /:id         # Get task
///         ├── DELETE /:id         # Delete task
///         └── POST   /:id/done    # Mark task done
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let hunt_routes = Router::new()
        .route(
            "/",
            get(routes::hunts::list_hunts).post(routes::hunts::create_hunt),
        )
        .route(
            "/:id",
            get(routes::hunts::get_hunt).delete(routes::hunts::delete_hunt),
        );

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks)
                .post(routes::tasks::create_task)
                .put(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task).delete(routes::tasks::delete_task),
        )
        .route("/:id/done", post(routes::tasks::mark_task_done));

    let api_routes = Router::new()
        .nest("/hunts", hunt_routes)
        .nest("/tasks", task_routes);

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

/// Configures CORS from the allowed origins
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
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
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
