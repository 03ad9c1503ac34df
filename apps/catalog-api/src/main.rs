use axum::http::{header, HeaderName, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use catalog_api::config::MiddlewareConfig;
use catalog_api::constants::{
    CATALOG_API_PORT, DATABASE_CONNECT_RETRIES, DATABASE_URL, DEFAULT_PORT, ENV, LOCAL_ENV, SERVICE,
};
use catalog_api::shutdown::{shutdown_signal, with_drain_deadline};
use catalog_api::state::AppState;
use catalog_lib::util::connect_with_retry;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }

    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    // Setup database pool
    let database_url: SecretString = std::env::var(DATABASE_URL)
        .map(SecretString::new)
        .map_err(|_| format!("{} environment variable must be set", DATABASE_URL))?;

    let pool = connect_with_retry(database_url.expose_secret(), DATABASE_CONNECT_RETRIES).await?;

    let app_state = AppState::from_pool(pool, env.clone());
    let mut app = catalog_api::app(app_state);

    // ============================================
    // Middleware stack (applied inner to outer)
    // Order: Request → Rate Limit → Timeout → CORS → Body Limit → Request ID → Trace → Handler
    // ============================================

    // 1. Trace layer (innermost - closest to handler)
    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    // 2. Request ID layers
    let x_request_id = HeaderName::from_static("x-request-id");
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    // 3. Body limit layer
    app = app.layer(RequestBodyLimitLayer::new(middleware_config.max_body_size));

    // 4. CORS layer
    let allow_origin = if middleware_config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<_> = middleware_config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };
    app = app.layer(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id])
            .expose_headers([header::LOCATION]),
    );

    // 5. Timeout layer (returns 408 Request Timeout)
    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        middleware_config.request_timeout,
    ));

    // 6. Rate limiting layer (outermost)
    // Milliseconds between replenished requests: 60000ms / requests_per_minute
    let replenish_interval_ms = 60_000 / middleware_config.rate_limit_per_minute as u64;
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_interval_ms.max(1))
        .burst_size(middleware_config.rate_limit_burst)
        .finish()
        .ok_or("invalid rate limit configuration")?;
    app = app.layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let port: u16 = std::env::var(CATALOG_API_PORT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let public_url = format!("http://127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("catalog-api is ready to accept requests at: {}", public_url);
    tracing::info!("API docs available at: {}/docs", public_url);

    // Serve with graceful shutdown, bounded by the drain timeout once signalled
    let shutdown_timeout = middleware_config.shutdown_timeout;
    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal(shutdown_timeout).await;
        let _ = signalled_tx.send(());
    })
    .into_future();

    with_drain_deadline(server, signalled_rx, shutdown_timeout)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
