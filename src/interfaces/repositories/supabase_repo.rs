use crate::supabase::client::SupabaseClient;

pub const PROJECTS_TABLE: &str = "projects";

#[derive(Clone, Debug)]
pub struct SupabaseProjectRepo {
    pub client: SupabaseClient,
}

#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    pub client: SupabaseClient,
    pub bucket: String,
}

#[derive(Clone, Debug)]
pub struct FormRelayClient {
    pub http: reqwest::Client,
    pub endpoint: String,
}
