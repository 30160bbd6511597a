use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Extractor for admin claims, ensuring the caller is a site administrator.
/// Returns 401 if the caller is not authenticated.
/// Returns 403 if the verified identity is not on the admin list.
/// Usage: Add `admin: AdminClaims` as a parameter to your handler function.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let Some(claims) = req.extensions().get::<Claims>().cloned() else {
            return ready(Err(AuthError::MissingCredentials.into()));
        };

        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState missing in AdminClaims extractor");
            return ready(Err(AuthError::MissingJwtService.into()));
        };

        if state.jwt_service.is_admin(&claims) {
            ready(Ok(AdminClaims(claims)))
        } else {
            ready(Err(AuthError::Forbidden("Admin access required".into()).into()))
        }
    }
}
