use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Car with ID {0} not found")]
    NotFound(u64),

    #[error("{}", .messages.join(" "))]
    Validation { messages: Vec<String> },

    #[error("Inventory file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Inventory data error: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Io { .. } | AppError::Corrupt { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
