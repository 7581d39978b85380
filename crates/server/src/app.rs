use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Router,
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request, header},
    middleware::{self, Next},
    response::Response,
};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    AppState,
    auth::JwtSessionProvider,
    config::ServerConfig,
    db,
    routes,
};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub struct Server;

impl Server {
    pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(config.database.acquire_timeout)
            .connect(config.database.url.expose_secret())
            .await
            .context("failed to connect to database")?;

        db::run_migrations(&pool)
            .await
            .context("failed to run database migrations")?;

        let sessions = JwtSessionProvider::new(&config.auth)
            .context("failed to initialise session verification")?;
        let state = AppState::new(pool, Arc::new(sessions));

        let app = build_app(state, config.cors_origin.as_deref())?;

        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.listen_addr))?;
        tracing::info!(addr = %config.listen_addr, "deskdrop server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        tracing::info!("deskdrop server stopped");
        Ok(())
    }
}

/// The full HTTP application: API routes plus request-id, tracing, version and CORS layers.
pub fn build_app(state: AppState, cors_origin: Option<&str>) -> anyhow::Result<Router> {
    let mut app = routes::router(state)
        .layer(middleware::from_fn(add_version_headers))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid));

    if let Some(origin) = cors_origin {
        let origin = HeaderValue::from_str(origin).context("invalid CORS origin")?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true),
        );
    }

    Ok(app)
}

async fn add_version_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        "X-Server-Version",
        HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
    );

    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(?error, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(?error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
