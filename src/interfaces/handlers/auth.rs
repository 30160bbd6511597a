use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

use crate::{entities::token::LoginRequest, errors::AuthError, AppState};

/// Password sign-in, forwarded to the hosted auth service. The returned
/// access token is what the `/admin` routes expect as a bearer token.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<impl Responder, AuthError> {
    credentials.validate()?;

    let session = state.sign_in.sign_in(&credentials).await.map_err(|e| {
        tracing::warn!("Sign-in failed for {}: {}", credentials.email, e);
        AuthError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(session))
}
