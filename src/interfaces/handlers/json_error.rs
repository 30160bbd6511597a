use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::errors::AppError;

pub fn json_error(status: StatusCode, error: &str, details: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": error,
        "details": details
    }))
}

/// Error body that also tells the client which screen to return to.
pub fn json_error_with_redirect(err: &AppError, redirect_to: &str) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(serde_json::json!({
        "error": err.to_string(),
        "redirect_to": redirect_to
    }))
}
