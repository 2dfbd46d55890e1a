use crate::models::target::{ContentId, ContentTypeId};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use leptos::logging;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("No content object of type {content_type_id} with id {content_id}")]
    NotFound {
        content_type_id: ContentTypeId,
        content_id: ContentId,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResponseError for ReviewError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReviewError::Database(_) | ReviewError::Render(_) | ReviewError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ReviewError::NotFound { .. } => HttpResponse::NotFound().body(self.to_string()),
            _ => {
                logging::error!("[REVIEWS] Request failed: {}", self);
                HttpResponse::InternalServerError().body("Internal server error")
            }
        }
    }
}
