//! Thin HTTP plumbing shared by every hosted-backend call: base URL,
//! API keys and response checking.

use std::fmt;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;
use zeroize::Zeroizing;

use crate::errors::RemoteError;

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: Zeroizing<String>,
    service_key: Option<Zeroizing<String>>,
}

impl SupabaseClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        anon_key: &str,
        service_key: Option<&str>,
    ) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url)?;

        Ok(SupabaseClient {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            anon_key: Zeroizing::new(anon_key.to_string()),
            service_key: service_key
                .filter(|key| !key.trim().is_empty())
                .map(|key| Zeroizing::new(key.to_string())),
        })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn storage_object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, encode_path(path))
    }

    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, encode_path(path))
    }

    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    /// Attaches the API key headers. Writes use the service-role key when
    /// one is configured, everything else goes out with the anon key.
    pub fn authorize(&self, request: RequestBuilder, elevated: bool) -> RequestBuilder {
        let bearer = match (&self.service_key, elevated) {
            (Some(service_key), true) => service_key.as_str(),
            _ => self.anon_key.as_str(),
        };

        request
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(bearer)
    }

    /// Returns the response unchanged on a 2xx status, otherwise a
    /// [`RemoteError::Service`] holding the service's own message.
    pub async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        Err(RemoteError::Service {
            status: status.as_u16(),
            message: service_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
        })
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn check_status(response: Response) -> Result<(), RemoteError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .field("service_key", &self.service_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Pulls the human-readable message out of an error body. The row service,
/// storage and auth each use a different field for it.
fn service_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    ["message", "error_description", "msg", "error"]
        .iter()
        .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .or_else(|| Some(trimmed.to_string()))
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(reqwest::Client::new(), "https://abc.supabase.co/", "anon", None).unwrap()
    }

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let client = client();
        assert_eq!(client.rest_url("projects"), "https://abc.supabase.co/rest/v1/projects");
        assert_eq!(
            client.public_object_url("portfolio", "resume.pdf"),
            "https://abc.supabase.co/storage/v1/object/public/portfolio/resume.pdf"
        );
        assert_eq!(
            client.storage_object_url("portfolio", "projects/my shot.png"),
            "https://abc.supabase.co/storage/v1/object/portfolio/projects/my%20shot.png"
        );
    }

    #[test]
    fn service_message_prefers_known_fields() {
        assert_eq!(
            service_message(r#"{"code":"23505","message":"duplicate key value"}"#).as_deref(),
            Some("duplicate key value")
        );
        assert_eq!(
            service_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#).as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(service_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(service_message("  "), None);
    }

    #[test]
    fn blank_service_key_is_ignored() {
        let client = SupabaseClient::new(reqwest::Client::new(), "https://abc.supabase.co", "anon", Some(" ")).unwrap();
        assert!(client.service_key.is_none());
    }
}
