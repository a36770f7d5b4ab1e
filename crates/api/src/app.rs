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

use domain::services::access_cache::ReadAccessCache;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, security_headers_middleware,
    trace_id, user_auth::require_user_auth, RateLimiterState,
};
use crate::routes::{auth, campaigns, characters, health, invites, locations, maps, search};
use crate::services::AccessResolver;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub access: AccessResolver,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let cache = Arc::new(ReadAccessCache::new(config.access_cache.ttl_secs));
    let access = AccessResolver::new(pool.clone(), cache);

    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        access,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
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

    // Auth routes: no bearer token required (login/register/refresh/logout)
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout));

    // Protected routes (require JWT user authentication)
    // Middleware order: auth runs first, then rate limiting (per user)
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        // Campaigns
        .route("/api/v1/campaigns", post(campaigns::create_campaign))
        .route("/api/v1/campaigns", get(campaigns::list_campaigns))
        .route("/api/v1/campaigns/:campaign_id", get(campaigns::get_campaign))
        .route(
            "/api/v1/campaigns/:campaign_id",
            put(campaigns::update_campaign),
        )
        .route(
            "/api/v1/campaigns/:campaign_id",
            delete(campaigns::delete_campaign),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/invite-code",
            post(invites::rotate_invite_code),
        )
        // Characters
        .route("/api/v1/characters", post(characters::create_character))
        .route("/api/v1/characters", get(characters::list_characters))
        .route(
            "/api/v1/campaigns/:campaign_id/characters",
            get(characters::list_campaign_characters),
        )
        .route(
            "/api/v1/characters/:character_id",
            get(characters::get_character),
        )
        .route(
            "/api/v1/characters/:character_id",
            put(characters::update_character),
        )
        .route(
            "/api/v1/characters/:character_id",
            delete(characters::delete_character),
        )
        // Join / leave workflow
        .route(
            "/api/v1/characters/:character_id/join",
            post(invites::join_campaign),
        )
        .route(
            "/api/v1/characters/:character_id/leave",
            post(invites::leave_campaign),
        )
        // Maps
        .route(
            "/api/v1/campaigns/:campaign_id/maps",
            post(maps::create_map).get(maps::list_maps),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/maps/:map_id",
            get(maps::get_map).put(maps::update_map).delete(maps::delete_map),
        )
        // Locations
        .route(
            "/api/v1/campaigns/:campaign_id/maps/:map_id/locations",
            post(locations::create_location).get(locations::list_locations),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/maps/:map_id/locations/:location_id",
            get(locations::get_location)
                .put(locations::update_location)
                .delete(locations::delete_location),
        )
        // Search
        .route("/api/v1/search", get(search::search))
        // Rate limiting runs after auth (needs the authenticated user)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness))
        .route("/health/live", get(health::liveness))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
