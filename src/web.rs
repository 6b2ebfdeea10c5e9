//! HTTP surface of the access policy engine.
//!
//! Resolves permission sets for identities handed over by the identity
//! provider, keeps one set per session, and answers view checks with status
//! codes a route layer can forward as-is: 401 without a session, 403 for a
//! denied view, 404 for an unknown view, 422 for a malformed identity.
//!
//! Identities in request bodies are trusted as given. This surface must only
//! be reachable through the identity provider that validated the credential.
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use miette::IntoDiagnostic;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::access::errors::AccessError;
use crate::access::menu::{self, NavEntry};
use crate::access::types::{PermissionSet, View};
use crate::access::{Identity, Resolution};
use crate::errors::AppError;
use crate::session::{PermissionCache, SessionCookie};
use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub cache: PermissionCache,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let cache = PermissionCache::from_settings(&settings);
        Self {
            settings: Arc::new(settings),
            cache,
        }
    }
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    changed: bool,
    permissions: PermissionSet,
}

async fn security_headers(request: Request<Body>, next: Next) -> impl IntoResponse {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    // JSON only, nothing to load
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/v1/resolve", post(resolve))
        .route("/v1/sessions", post(create_session))
        .route(
            "/v1/sessions/current",
            axum::routing::put(refresh_session).delete(end_session),
        )
        .route("/v1/sessions/current/permissions", get(current_permissions))
        .route("/v1/sessions/current/navigation", get(current_navigation))
        .route("/v1/sessions/current/views/{view}", get(check_view))
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings) -> miette::Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .map_err(|e| AppError::Other(format!("bad listen addr: {e}")))?;
    let state = AppState::new(settings);

    tracing::info!(
        %addr,
        public_url = %state.settings.public_url(),
        session_ttl_secs = state.settings.session.ttl_secs,
        "Access policy API listening"
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .into_diagnostic()?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// POST /v1/resolve - stateless resolution for one identity
async fn resolve(Json(identity): Json<Identity>) -> Json<Resolution> {
    Json(Resolution::for_identity(&identity))
}

fn current_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(SessionCookie, Arc<PermissionSet>), AccessError> {
    let cookie = SessionCookie::from_headers(headers).ok_or(AccessError::MissingSession)?;
    let permissions = state
        .cache
        .get(&cookie.session_id)
        .ok_or(AccessError::MissingSession)?;
    Ok((cookie, permissions))
}

/// POST /v1/sessions - resolve once and cache for the session lifetime
async fn create_session(
    State(state): State<AppState>,
    Json(identity): Json<Identity>,
) -> Response {
    let attrs = identity.attributes.clone();
    let (session_id, permissions) = state.cache.establish(identity);
    let cookie = SessionCookie::new(session_id);
    let body = Resolution::from_permissions(permissions.as_ref().clone(), &attrs);

    (
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie.to_cookie_header(&state.settings))],
        Json(body),
    )
        .into_response()
}

/// PUT /v1/sessions/current - re-derive after a role or attribute change
async fn refresh_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(identity): Json<Identity>,
) -> Result<Json<RefreshResponse>, AccessError> {
    let cookie = SessionCookie::from_headers(&headers).ok_or(AccessError::MissingSession)?;
    let (changed, permissions) = state
        .cache
        .refresh(&cookie.session_id, identity)
        .ok_or(AccessError::MissingSession)?;
    Ok(Json(RefreshResponse {
        changed,
        permissions: permissions.as_ref().clone(),
    }))
}

/// DELETE /v1/sessions/current
async fn end_session(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(cookie) = SessionCookie::from_headers(&headers) {
        if state.cache.end(&cookie.session_id) {
            tracing::debug!("Session ended");
        }
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, SessionCookie::delete_cookie_header())],
    )
}

async fn current_permissions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PermissionSet>, AccessError> {
    let (_, permissions) = current_session(&state, &headers)?;
    Ok(Json(permissions.as_ref().clone()))
}

async fn current_navigation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<NavEntry>>, AccessError> {
    let (_, permissions) = current_session(&state, &headers)?;
    Ok(Json(menu::navigation_for(&permissions.menu_items)))
}

/// GET /v1/sessions/current/views/{view} - 204 when granted
async fn check_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(view): Path<String>,
) -> Result<StatusCode, AccessError> {
    let (_, permissions) = current_session(&state, &headers)?;
    let view = View::parse(&view).ok_or(AccessError::UnknownView(view))?;
    if let Err(e) = permissions.require(view) {
        tracing::info!(%view, "View denied");
        return Err(e);
    }
    Ok(StatusCode::NO_CONTENT)
}
