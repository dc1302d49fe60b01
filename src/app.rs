use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::auth::{HeaderIdentityProvider, IdentityProvider};
use crate::config::{AppConfig, ForbiddenDeletePolicy, SecurityConfig, StoreBackend};
use crate::database::{ItemStore, MemoryItemStore, PgItemStore, StoreError};
use crate::handlers::{public, todo_item};
use crate::middleware::identity_middleware;
use crate::services::TodoService;

/// Shared per-process handles. Cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TodoService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub forbidden_delete: ForbiddenDeletePolicy,
}

impl AppState {
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn ItemStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(MemoryItemStore::new()),
            StoreBackend::Postgres => Arc::new(PgItemStore::connect(&config.store).await?),
        };
        info!("Using {} item store", store.name());

        Ok(Self {
            service: Arc::new(TodoService::new(store, config.policy.upsert)),
            identity: Arc::new(HeaderIdentityProvider::from_config(&config.identity)),
            forbidden_delete: config.policy.forbidden_delete,
        })
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let todo = todo_routes(state.clone());

    let prefix = config.server.route_prefix.trim_matches('/');
    let router = if prefix.is_empty() {
        Router::new().merge(todo)
    } else {
        Router::new().nest(&format!("/{}", prefix), todo)
    };

    router
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Global middleware
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn todo_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/todoitem", get(todo_item::list).post(todo_item::add))
        .route("/todoitem/:id", delete(todo_item::delete))
        .route_layer(middleware::from_fn_with_state(state, identity_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origin = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            security
                .cors_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
