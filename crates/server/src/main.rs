// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use complaint_desk_api::{
    ApiError, AuthorizationService, Caller, ComplaintListResponse, ComplaintListing,
    ComplaintResponse, ComplaintService, ComplaintStore, DELETED_MESSAGE, HealthResponse,
    IdentityProvider, ListComplaintsQuery, MessageResponse, Role, SUBMITTED_MESSAGE,
    StaticTokenProvider, Submitted, UPDATED_MESSAGE, Updated,
};
use complaint_desk_domain::{Complaint, ComplaintDraft};
use complaint_desk_notify::{MailConfig, Notifier};
use complaint_desk_persistence::DatabaseLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::session::SessionCaller;

/// Complaint Desk Server - HTTP server for complaint intake and triage
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// JSON file mapping bearer tokens to caller claims
    #[arg(long, env = "IDENTITIES_FILE")]
    identities: Option<PathBuf>,

    /// SMTP relay host
    #[arg(long, env = "EMAIL_HOST")]
    smtp_host: Option<String>,

    /// SMTP relay port. 465 uses implicit TLS, anything else STARTTLS.
    #[arg(long, env = "EMAIL_PORT")]
    smtp_port: Option<u16>,

    /// SMTP username
    #[arg(long, env = "EMAIL_USER")]
    smtp_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    smtp_password: Option<String>,

    /// Sender address. Defaults to the SMTP username.
    #[arg(long, env = "EMAIL_FROM")]
    mail_from: Option<String>,

    /// Recipient of new-complaint notifications
    #[arg(long, env = "ADMIN_EMAIL")]
    admin_email: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Complaint operations over the lazily opened store.
    service: ComplaintService,
    /// Resolves bearer tokens into callers.
    identities: Arc<dyn IdentityProvider>,
}

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field-level messages for validation failures.
    details: Option<Vec<String>>,
}

impl HttpError {
    fn validation(details: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: String::from("Validation failed"),
            details: Some(details),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: String::from("Unauthorized"),
                details: None,
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: String::from("Forbidden"),
                details: None,
            },
            ApiError::ValidationFailed { details } => Self::validation(details),
            ApiError::ResourceNotFound { message, .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                details: None,
            },
            ApiError::StorageFailure { message } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message,
                details: None,
            },
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                    details: None,
                }
            }
        }
    }
}

/// Unwraps a decoded JSON body.
///
/// A body that fails to decode is reported as a validation failure, unless
/// the caller would have been refused anyway.
fn require_body<T>(
    caller: Option<&Caller>,
    required: Role,
    action: &str,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, HttpError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            AuthorizationService::authorize(caller, required, action).map_err(ApiError::from)?;
            warn!(action, error = %rejection.body_text(), "Rejected malformed request body");
            Err(HttpError::validation(vec![rejection.body_text()]))
        }
    }
}

/// Handler for POST `/complaints`.
async fn handle_submit_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionCaller(caller): SessionCaller,
    body: Result<Json<ComplaintDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ComplaintResponse>), HttpError> {
    info!(caller = ?caller.as_ref().map(|c| &c.id), "Handling submit complaint request");

    let draft: ComplaintDraft = require_body(caller.as_ref(), Role::User, "submit", body)?;
    let submitted: Submitted = app_state.service.submit(caller.as_ref(), &draft).await?;

    // The notification runs detached; its handle is not awaited.
    drop(submitted.notification);

    Ok((
        StatusCode::CREATED,
        Json(ComplaintResponse::with_message(
            submitted.complaint,
            SUBMITTED_MESSAGE,
        )),
    ))
}

/// Handler for GET `/complaints`.
async fn handle_list_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionCaller(caller): SessionCaller,
    query: Result<Query<ListComplaintsQuery>, QueryRejection>,
) -> Result<Json<ComplaintListResponse>, HttpError> {
    info!(caller = ?caller.as_ref().map(|c| &c.id), "Handling list complaints request");

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            AuthorizationService::authorize(caller.as_ref(), Role::Admin, "list")
                .map_err(ApiError::from)?;
            return Err(HttpError::validation(vec![rejection.body_text()]));
        }
    };

    let listing: ComplaintListing = app_state.service.list(caller.as_ref(), &query).await?;
    Ok(Json(ComplaintListResponse::from(listing)))
}

/// Handler for GET `/complaints/{id}`.
async fn handle_get_complaint(
    AxumState(app_state): AxumState<AppState>,
    Path(complaint_id): Path<String>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    info!(complaint_id = %complaint_id, "Handling get complaint request");

    let complaint: Complaint = app_state.service.get(&complaint_id).await?;
    Ok(Json(ComplaintResponse::new(complaint)))
}

/// Handler for PATCH `/complaints/{id}`.
async fn handle_update_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionCaller(caller): SessionCaller,
    Path(complaint_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ComplaintResponse>, HttpError> {
    info!(
        complaint_id = %complaint_id,
        caller = ?caller.as_ref().map(|c| &c.id),
        "Handling update complaint request"
    );

    let body: Value = require_body(caller.as_ref(), Role::Admin, "update", body)?;
    let updated: Updated = app_state
        .service
        .update(caller.as_ref(), &complaint_id, &body)
        .await?;

    drop(updated.notification);

    Ok(Json(ComplaintResponse::with_message(
        updated.complaint,
        UPDATED_MESSAGE,
    )))
}

/// Handler for DELETE `/complaints/{id}`.
async fn handle_delete_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionCaller(caller): SessionCaller,
    Path(complaint_id): Path<String>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(
        complaint_id = %complaint_id,
        caller = ?caller.as_ref().map(|c| &c.id),
        "Handling delete complaint request"
    );

    app_state
        .service
        .delete(caller.as_ref(), &complaint_id)
        .await?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

/// Handler for GET `/health`.
async fn handle_health(
    AxumState(app_state): AxumState<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let health: HealthResponse = app_state.service.health().await;
    if health.ok {
        (StatusCode::OK, Json(health))
    } else {
        error!(error = ?health.error, "Health check failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(health))
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/complaints",
            get(handle_list_complaints).post(handle_submit_complaint),
        )
        .route(
            "/complaints/{id}",
            get(handle_get_complaint)
                .patch(handle_update_complaint)
                .delete(handle_delete_complaint),
        )
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Completes when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Complaint Desk Server");

    // The store opens on first use
    let location: DatabaseLocation = args
        .database
        .clone()
        .map_or(DatabaseLocation::InMemory, DatabaseLocation::File);
    info!(location = %location, "Complaint store configured");

    let identities: Arc<dyn IdentityProvider> = if let Some(path) = &args.identities {
        let provider: StaticTokenProvider = StaticTokenProvider::from_json_file(path)?;
        info!(path = %path.display(), tokens = provider.len(), "Loaded identities");
        Arc::new(provider)
    } else {
        warn!("No identities file configured; every request is anonymous");
        Arc::new(StaticTokenProvider::default())
    };

    let mail: Option<MailConfig> = MailConfig::from_parts(
        args.smtp_host,
        args.smtp_port,
        args.smtp_user,
        args.smtp_password,
        args.mail_from,
    );
    let notifier: Notifier = Notifier::from_config(mail.as_ref(), args.admin_email)?;

    let app_state: AppState = AppState {
        service: ComplaintService::new(ComplaintStore::new(location), notifier),
        identities,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
