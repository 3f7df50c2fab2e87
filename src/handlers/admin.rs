//! ==============================================================================
//! admin.rs - Token-gated administrator routes
//! ==============================================================================
//!
//! purpose:
//!     static administrator endpoints behind a bearer-token middleware.
//!     the token comes from `[admin]` in the config file; when none is
//!     configured the gate stays closed and every request gets 403.
//!
//! ==============================================================================

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::AdminConfig;

/// Middleware restricting access to administrators.
pub async fn require_admin(
    State(admin): State<AdminConfig>,
    req: Request,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let authorized = match admin.token.as_deref() {
        Some(token) => presented == Some(token),
        None => false,
    };

    if !authorized {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    next.run(req).await
}

pub async fn index() -> &'static str {
    "admin: index"
}

pub async fn accounts() -> &'static str {
    "admin: list accounts.."
}

pub async fn user(Path(user_id): Path<String>) -> String {
    format!("admin: view user id {user_id}")
}
