// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.
//!
//! Two kinds reach clients: validation failures answer 400 with the
//! field-level reasons, everything else answers 500 with a generic body.
//! Details of 500s are logged server-side only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid query parameters")]
    Validation(Vec<ValidationIssue>),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("malformed record: {0}")]
    Record(#[from] mongodb::bson::de::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal server error: {0}")]
    Internal(String),
}

/// Body for validation failures.
#[derive(Debug, Serialize)]
struct ValidationBody {
    errors: Vec<ValidationIssue>,
}

/// Body for every non-validation failure.
#[derive(Debug, Serialize)]
struct InternalBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalBody {
                        error: "Internal Server Error",
                    }),
                )
                    .into_response()
            }
        }
    }
}
