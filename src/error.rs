use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned when the request carries no usable article
pub const MISSING_ARTICLE: &str = "No article provided";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(String),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from the model hub and hosted inference endpoint
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to inference service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no pretrained model named {model}")]
    ModelNotFound { model: String },

    #[error("inference with {model} failed ({status}): {message}")]
    Inference {
        model: String,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {model}: {message}")]
    UnexpectedResponse { model: String, message: String },
}

/// Raised when the detector cannot name a language for the input
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("no language could be detected from input of {chars} characters")]
    Undetectable { chars: usize },
}

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", MISSING_ARTICLE)]
    MissingArticle,

    /// Any collaborator failure; the cause is logged, never returned to the caller
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingArticle => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": MISSING_ARTICLE })),
            )
                .into_response(),
            AppError::Collaborator(err) => {
                error!("Request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
