use serde_json::json;

use crate::{
    entities::token::{AuthResponse, LoginRequest},
    errors::RemoteError,
    supabase::client::SupabaseClient,
};

/// Password sign-in against the hosted auth service. The service owns the
/// user accounts; this only forwards credentials and hands back its session.
#[derive(Clone, Debug)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseAuth { client }
    }

    pub async fn sign_in(&self, credentials: &LoginRequest) -> Result<AuthResponse, RemoteError> {
        let request = self
            .client
            .http()
            .post(self.client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }));

        let response = self.client.authorize(request, false).send().await?;
        SupabaseClient::read_json(response).await
    }
}
