use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response}
};
use media_fetch::{Error as FetchError, ProcessError};

#[derive(Debug)]
pub struct AppError {
    pub message: String,
    pub status: StatusCode
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("handler error: {}", self.message);
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let status = match &err {
            FetchError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            FetchError::FetchFailed(ProcessError::TimedOut { .. })
            | FetchError::ConvertFailed(ProcessError::TimedOut { .. }) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            FetchError::FetchFailed(ProcessError::Spawn { .. })
            | FetchError::ConvertFailed(ProcessError::Spawn { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            FetchError::FetchFailed(_) | FetchError::OutputNotFound { .. } => StatusCode::BAD_GATEWAY,
            FetchError::ConvertFailed(_) | FetchError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}
