//! Expedlog REST API
//!
//! The entry point for all external API requests.
//! Handles:
//! - Authentication and authorization
//! - Rate limiting
//! - Request routing
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{
    routing::{get, post, put},
    Router,
};
use expedlog_common::{
    auth::JwtManager,
    config::AppConfig,
    db::DbPool,
    metrics,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub jwt: JwtManager,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting Expedlog API v{}", expedlog_common::VERSION);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        PrometheusBuilder::new()
            .with_http_listener(SocketAddr::from((
                [0, 0, 0, 0],
                config.observability.metrics_port,
            )))
            .install()?;
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    let jwt = JwtManager::new(&config.auth.jwt_secret, config.auth.jwt_expiration_secs);

    let config = Arc::new(config);

    // Create app state
    let state = AppState {
        config: config.clone(),
        db: db.clone(),
        jwt,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Open routes: health probes and authentication
    let open_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    // Every resource sits behind the bearer-token gate, expeditions included
    let resource_routes = Router::new()
        // Expedition aggregate
        .route(
            "/expeditions",
            get(handlers::expeditions::list_expeditions).post(handlers::expeditions::create_expedition),
        )
        .route("/expeditions/stats", get(handlers::expeditions::expedition_stats))
        .route(
            "/expeditions/{id}",
            get(handlers::expeditions::get_expedition)
                .put(handlers::expeditions::update_expedition)
                .delete(handlers::expeditions::delete_expedition),
        )
        .route(
            "/expeditions/{id}/quality-control",
            put(handlers::expeditions::update_quality_control),
        )
        .route(
            "/expeditions/{id}/rejection",
            put(handlers::expeditions::update_rejection),
        )
        // Reference data
        .route(
            "/drivers",
            get(handlers::drivers::list_drivers).post(handlers::drivers::create_driver),
        )
        .route(
            "/drivers/{id}",
            get(handlers::drivers::get_driver)
                .put(handlers::drivers::update_driver)
                .delete(handlers::drivers::delete_driver),
        )
        .route(
            "/trucks",
            get(handlers::trucks::list_trucks).post(handlers::trucks::create_truck),
        )
        .route(
            "/trucks/{id}",
            get(handlers::trucks::get_truck)
                .put(handlers::trucks::update_truck)
                .delete(handlers::trucks::delete_truck),
        )
        .route(
            "/transport-companies",
            get(handlers::transport_companies::list_transport_companies)
                .post(handlers::transport_companies::create_transport_company),
        )
        .route(
            "/transport-companies/{id}",
            get(handlers::transport_companies::get_transport_company)
                .put(handlers::transport_companies::update_transport_company)
                .delete(handlers::transport_companies::delete_transport_company),
        )
        .route(
            "/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/suppliers/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route(
            "/product-catalog",
            get(handlers::catalog::list_catalog_items).post(handlers::catalog::create_catalog_item),
        )
        .route(
            "/product-catalog/{id}",
            get(handlers::catalog::get_catalog_item)
                .put(handlers::catalog::update_catalog_item)
                .delete(handlers::catalog::delete_catalog_item),
        )
        .route(
            "/expedition-responsibles",
            get(handlers::responsibles::list_expedition_responsibles)
                .post(handlers::responsibles::create_expedition_responsible),
        )
        .route(
            "/expedition-responsibles/{id}",
            get(handlers::responsibles::get_expedition_responsible)
                .put(handlers::responsibles::update_expedition_responsible)
                .delete(handlers::responsibles::delete_expedition_responsible),
        )
        .route(
            "/quality-responsibles",
            get(handlers::responsibles::list_quality_responsibles)
                .post(handlers::responsibles::create_quality_responsible),
        )
        .route(
            "/quality-responsibles/{id}",
            get(handlers::responsibles::get_quality_responsible)
                .put(handlers::responsibles::update_quality_responsible)
                .delete(handlers::responsibles::delete_quality_responsible),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let api_routes = open_routes.merge(resource_routes);

    let mut app = Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id);

    if state.config.rate_limit.enabled {
        let limiter = middleware::rate_limit::create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        app = app.layer(axum::middleware::from_fn(move |request, next| {
            let limiter = limiter.clone();
            async move { middleware::rate_limit::rate_limit_middleware(request, next, limiter).await }
        }));
    }

    app.with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
