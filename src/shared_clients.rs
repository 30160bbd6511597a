use crate::{
    repositories::supabase_repo::{FormRelayClient, SupabaseProjectRepo, SupabaseStorage},
    settings::AppConfig,
    supabase::{auth::SupabaseAuth, client::SupabaseClient},
};

/// Outbound clients built once at startup and handed to every component
/// that needs them. All of them share one connection pool.
#[derive(Clone, Debug)]
pub struct SharedClients {
    pub project_repo: SupabaseProjectRepo,
    pub storage: SupabaseStorage,
    pub auth: SupabaseAuth,
    pub contact_relay: FormRelayClient,
}

impl SharedClients {
    pub fn new(config: &AppConfig, http: reqwest::Client) -> Result<Self, url::ParseError> {
        let supabase = SupabaseClient::new(
            http.clone(),
            &config.supabase_url,
            &config.supabase_anon_key,
            config.supabase_service_key.as_deref(),
        )?;

        let project_repo = SupabaseProjectRepo::new(supabase.clone());
        let storage = SupabaseStorage::new(supabase.clone(), config.storage_bucket.clone());
        let auth = SupabaseAuth::new(supabase);
        let contact_relay = FormRelayClient::new(http, config.contact_endpoint.clone());

        Ok(SharedClients {
            project_repo,
            storage,
            auth,
            contact_relay,
        })
    }
}
