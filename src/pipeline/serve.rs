// src/pipeline/serve.rs

//! Continuous mode: refresh the snapshot on a fixed interval while serving the
//! most recently published report over HTTP.
//!
//! Refresh cycles run one at a time in a single background task. A failed
//! cycle is logged and the previous report keeps being served.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{AppError, Result};
use crate::models::ServeConfig;
use crate::pipeline::snapshot::{SnapshotOptions, run_snapshot};
use crate::services::SubmissionSource;
use crate::storage::ReportStorage;

const AUTH_REALM: &str = r#"Basic realm="snapshot""#;

/// Shared state for the report server.
#[derive(Clone)]
pub struct ServeState {
    storage: Arc<dyn ReportStorage>,
    credentials: Option<Arc<(String, String)>>,
}

impl ServeState {
    pub fn new(storage: Arc<dyn ReportStorage>, config: &ServeConfig) -> Self {
        Self {
            storage,
            credentials: config
                .credentials()
                .map(|(user, password)| Arc::new((user.to_string(), password.to_string()))),
        }
    }
}

/// Build the report router.
pub fn router(state: ServeState) -> Router {
    Router::new()
        .route("/", get(serve_report))
        .route("/index.html", get(serve_report))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ))
        .with_state(state)
}

/// Refresh the report forever and serve it on `host:port`.
pub async fn run_serve(
    source: Arc<dyn SubmissionSource>,
    storage: Arc<dyn ReportStorage>,
    options: SnapshotOptions,
    config: &ServeConfig,
) -> Result<()> {
    // Initial snapshot; the server starts even when it fails.
    refresh(source.as_ref(), storage.as_ref(), &options).await;

    let period = Duration::from_secs(config.refresh_interval_secs.max(1));
    let refresh_source = Arc::clone(&source);
    let refresh_storage = Arc::clone(&storage);
    let refresher: JoinHandle<()> = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            refresh(refresh_source.as_ref(), refresh_storage.as_ref(), &options).await;
        }
    });

    let state = ServeState::new(storage, config);
    if state.credentials.is_none() {
        log::warn!("Serving report without basic auth");
    }

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    log::info!(
        "Serving report on http://{}:{} (refresh every {}s)",
        config.host,
        config.port,
        period.as_secs()
    );

    supervise(axum::serve(listener, router(state)).into_future(), refresher).await
}

/// Drive the server until it stops or the refresh task dies.
async fn supervise<F>(server: F, refresher: JoinHandle<()>) -> Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        served = server => {
            served?;
            Ok(())
        }
        stopped = refresher => {
            let reason = match stopped {
                Ok(()) => "snapshot refresher exited".to_string(),
                Err(e) => format!("snapshot refresher stopped: {e}"),
            };
            log::error!("{}", reason);
            Err(AppError::Task(reason))
        }
    }
}

async fn refresh(
    source: &dyn SubmissionSource,
    storage: &dyn ReportStorage,
    options: &SnapshotOptions,
) {
    log::info!("Refreshing snapshot...");
    match run_snapshot(source, storage, options).await {
        Ok(summary) => log::info!(
            "Snapshot refreshed: {} submissions, {} submitters",
            summary.submission_count,
            summary.submitter_count
        ),
        Err(e) => log::error!(
            "Snapshot refresh failed, keeping previous report: {}",
            e
        ),
    }
}

/// GET / - Serve the published report
async fn serve_report(State(state): State<ServeState>) -> Response {
    match state.storage.load_current().await {
        Ok(Some(document)) => Html(document).into_response(),
        Ok(None) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Snapshot has not been generated yet",
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to read report: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read report").into_response()
        }
    }
}

/// Basic auth middleware; a no-op when no credentials are configured.
async fn basic_auth_middleware(
    State(state): State<ServeState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(credentials) = &state.credentials else {
        return next.run(request).await;
    };

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if check_basic_auth(header_value, &credentials.0, &credentials.1) {
        next.run(request).await
    } else {
        log::debug!("Rejected request to {}", request.uri().path());
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, AUTH_REALM)],
            "Unauthorized",
        )
            .into_response()
    }
}

/// Check an `Authorization` header value against the expected credentials.
fn check_basic_auth(header_value: Option<&str>, username: &str, password: &str) -> bool {
    let Some(encoded) = header_value.and_then(|v| v.strip_prefix("Basic ")) else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };

    match decoded.split_once(':') {
        Some((user, pass)) => user == username && pass == password,
        None => false,
    }
}
