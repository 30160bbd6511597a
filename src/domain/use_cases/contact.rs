use validator::Validate;

use crate::{
    entities::contact_me::{ContactMeForm, ContactStatus},
    errors::AppError,
    repositories::contact_me::ContactRelay,
};

pub struct ContactHandler<C>
where
    C: ContactRelay,
{
    pub relay: C,
}

impl<C> ContactHandler<C>
where
    C: ContactRelay,
{
    pub fn new(relay: C) -> Self {
        ContactHandler { relay }
    }

    /// Relays a visitor's message in a single request.
    ///
    /// An invalid form is an error and is never sent. A relay failure is a
    /// normal outcome that the client shows and then dismisses.
    pub async fn send(&self, form: ContactMeForm) -> Result<ContactStatus, AppError> {
        let form = form.trimmed();
        form.validate()?;

        match self.relay.submit(&form).await {
            Ok(()) => {
                tracing::info!("Contact message relayed");
                Ok(ContactStatus::Sent)
            }
            Err(e) => {
                tracing::warn!("Contact relay failed: {}", e);
                Ok(ContactStatus::failed("Failed to send message. Please try again."))
            }
        }
    }
}
