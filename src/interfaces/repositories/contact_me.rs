use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::{
    entities::contact_me::ContactMeForm,
    errors::RemoteError,
    repositories::supabase_repo::FormRelayClient,
    supabase::client::SupabaseClient,
};

/// Outbound delivery of contact messages to a third-party form endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn submit(&self, form: &ContactMeForm) -> Result<(), RemoteError>;
}

impl FormRelayClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        FormRelayClient { http, endpoint: endpoint.into() }
    }
}

#[async_trait]
impl ContactRelay for FormRelayClient {
    async fn submit(&self, form: &ContactMeForm) -> Result<(), RemoteError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(form)
            .send()
            .await?;

        SupabaseClient::check_status(response).await
    }
}
