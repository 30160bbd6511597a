use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact_me::{ContactMeForm, ContactMeResponse, ContactStatus},
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// Relays a contact message. A relay failure answers 502 with an `error`
/// status the client shows for `dismiss_after_secs`.
#[instrument(skip(req, state, form))]
pub async fn create_contact_me(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactMeForm>,
) -> Result<impl Responder, AppError> {
    let client_ip = get_client_ip(&req, state.trust_x_forwarded_for);

    if let Err(retry_after) = state.contact_limiter.check(&client_ip) {
        tracing::warn!(client_ip = %client_ip, "Contact rate limit exceeded");
        return Err(AppError::TooManyRequests(format!(
            "Too many messages. Please try again in {} seconds.",
            retry_after
        )));
    }

    let status = state.contact_handler.send(form.into_inner()).await?;

    let response = match &status {
        ContactStatus::Sent => HttpResponse::Ok(),
        ContactStatus::Failed { .. } => HttpResponse::BadGateway(),
    }
    .json(ContactMeResponse::from(status));

    Ok(response)
}
