use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use miette::Diagnostic;
use serde_json::json;
use thiserror::Error;

use crate::access::types::View;

#[derive(Debug, Error, Diagnostic)]
pub enum AccessError {
    #[error("Access to view `{view}` is not granted")]
    #[diagnostic(
        code(eventpass::access::forbidden),
        help("The permission set resolved for this session does not include this view")
    )]
    Forbidden { view: View },

    #[error("Unknown view `{0}`")]
    #[diagnostic(
        code(eventpass::access::unknown_view),
        help("Valid views: agenda, exhibitors, speakers, registrations, map, networking, profile, my_registrations, qr, exhibitor_panel, speaker_panel, staff_panel")
    )]
    UnknownView(String),

    #[error("Invalid attendance day {0}")]
    #[diagnostic(
        code(eventpass::access::invalid_day),
        help("Attendance days are numbered 1 to 4")
    )]
    InvalidDay(u8),

    #[error("No active session")]
    #[diagnostic(
        code(eventpass::access::missing_session),
        help("Create a session with POST /v1/sessions first")
    )]
    MissingSession,
}

impl AccessError {
    fn code(&self) -> &'static str {
        match self {
            AccessError::Forbidden { .. } => "forbidden",
            AccessError::UnknownView(_) => "not_found",
            AccessError::InvalidDay(_) => "invalid_request",
            AccessError::MissingSession => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AccessError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AccessError::UnknownView(_) => StatusCode::NOT_FOUND,
            AccessError::InvalidDay(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AccessError::MissingSession => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.code(),
            "error_description": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
