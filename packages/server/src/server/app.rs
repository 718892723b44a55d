//! Application setup and router configuration.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domains::{auth, chef, identity};
use crate::domains::identity::types::Role;
use crate::kernel::ServerDeps;
use crate::server::middleware::{require_auth, require_roles};
use crate::server::routes::health_handler;

const CHEF_ONLY: &[Role] = &[Role::Chef];

/// Default request body cap for menu item uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
    /// Present in production; in-memory setups run without one
    pub db_pool: Option<PgPool>,
}

impl AxumAppState {
    pub fn new(deps: ServerDeps, db_pool: Option<PgPool>) -> Self {
        Self {
            deps: Arc::new(deps),
            db_pool,
        }
    }
}

/// Router options that are not part of the domain wiring.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    /// Serve stored images from this directory under `/uploads`
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            upload_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// Public: `/health`, `/auth/*`, `/chef/register`.
/// Bearer: `/user/profile` (any role), `/chef/menu-items` (role `chef`).
pub fn build_app(state: AxumAppState, options: &AppOptions) -> Router {
    // Clone jwt_service for middleware closures
    let jwt_for_chef = state.deps.jwt_service.clone();
    let jwt_for_user = state.deps.jwt_service.clone();

    // Layers run bottom-up: authenticate, then check the role
    let chef_routes = Router::new()
        .route("/chef/menu-items", post(chef::edges::create_menu_item))
        .route_layer(middleware::from_fn(|req, next| {
            require_roles(CHEF_ONLY, req, next)
        }))
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(jwt_for_chef.clone(), req, next)
        }))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes));

    let user_routes = Router::new()
        .route("/user/profile", get(identity::edges::get_profile))
        .route_layer(middleware::from_fn(move |req, next| {
            require_auth(jwt_for_user.clone(), req, next)
        }));

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/auth/signup", post(auth::edges::signup))
        .route("/auth/request-otp", post(auth::edges::request_otp))
        .route("/auth/verify-otp", post(auth::edges::verify_otp))
        .route("/chef/register", post(chef::edges::register))
        .merge(chef_routes)
        .merge(user_routes);

    if let Some(dir) = &options.upload_dir {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
