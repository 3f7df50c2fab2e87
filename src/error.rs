//! ==============================================================================
//! error.rs - Wire Error Shapes
//! ==============================================================================
//!
//! purpose:
//!     the API admits exactly two error kinds: an unbindable request body
//!     (400) and a missing resource (404). Everything else is left to the
//!     panic-recovery layer, which answers a bare 500.
//!
//! wire shape:
//!     {"status": "Invalid request.", "error": "<bind failure detail>"}
//!     {"status": "Resource not found."}
//!
//! ==============================================================================

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Invalid(String),
}

impl ApiError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Invalid(detail.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, body) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    status: "Resource not found.",
                    error: None,
                },
            ),
            ApiError::Invalid(detail) => {
                tracing::debug!(%detail, "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        status: "Invalid request.",
                        error: Some(detail),
                    },
                )
            }
        };
        (code, Json(body)).into_response()
    }
}

/// JSON body extractor that maps every bind failure to a 400.
///
/// axum's stock `Json` rejection splits into 400/415/422 depending on what
/// went wrong; this API promises a single 400 for anything unbindable.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::invalid(rejection.body_text())),
        }
    }
}
