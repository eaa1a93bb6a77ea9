use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::MessageBody;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("film not found")]
    NotFound,
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl AppError {
    /// A store failure reported to the client with a fixed message.
    pub fn store(message: &'static str) -> impl FnOnce(sea_orm::DbErr) -> Self {
        move |source| Self::Store { message: message.to_string(), source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A store failure whose own text is reported to the client.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Store { message: err.to_string(), source: err }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let AppError::Store { source, .. } = &self {
            tracing::error!(error = %source, "store operation failed");
        }
        (status, Json(MessageBody::new(self.to_string()))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
