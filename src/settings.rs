use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::DecodingKey;
use std::{env, fmt, str::FromStr};
use url::Url;
use zeroize::Zeroizing;

use crate::use_cases::content::FallbackPolicy;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub supabase_url: String,

    #[serde(default)]
    pub supabase_anon_key: String,

    /// Elevated key for admin writes. Without it writes go out under the
    /// anon key and depend on the service's row policies.
    #[serde(default)]
    pub supabase_service_key: Option<String>,

    /// Secret the hosted auth service signs access tokens with.
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,

    /// When non-empty, only these addresses may use the admin routes.
    #[serde(default)]
    pub admin_emails: Vec<String>,

    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,

    #[serde(default = "default_contact_endpoint")]
    pub contact_endpoint: String,

    #[serde(default = "default_contact_limit")]
    pub contact_rate_limit: u64,

    #[serde(default = "default_contact_window_secs")]
    pub contact_rate_window_secs: u64,

    #[serde(default)]
    pub trust_x_forwarded_for: bool,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default)]
    pub fallback_policy: FallbackPolicy,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Site".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_audience() -> String {
    "authenticated".to_string()
}
fn default_storage_bucket() -> String {
    "portfolio".to_string()
}
fn default_contact_endpoint() -> String {
    "https://formspree.io/f/xeodykpd".to_string()
}
fn default_contact_limit() -> u64 {
    5
}
fn default_contact_window_secs() -> u64 {
    3600
}
fn default_site_url() -> String {
    "https://jerrystudios.vercel.app".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .with_list_parse_key("admin_emails")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.supabase_url = fill_or_env(config.supabase_url, "APP_SUPABASE_URL")?;
        config.supabase_anon_key = fill_or_env(config.supabase_anon_key, "APP_SUPABASE_ANON_KEY")?;
        config.jwt_secret = fill_or_env(config.jwt_secret, "APP_JWT_SECRET")?;

        if config.supabase_service_key.is_none() {
            config.supabase_service_key = env::var("APP_SUPABASE_SERVICE_KEY").ok();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.supabase_url.trim().is_empty() {
            errors.push("SUPABASE_URL cannot be empty");
        } else if Url::parse(&self.supabase_url).is_err() {
            errors.push("SUPABASE_URL must be an absolute URL");
        }
        if self.supabase_anon_key.trim().is_empty() {
            errors.push("SUPABASE_ANON_KEY cannot be empty");
        }
        if self.jwt_secret.len() < 32 {
            errors.push("JWT_SECRET must be at least 32 characters");
        }
        if Url::parse(&self.contact_endpoint).is_err() {
            errors.push("CONTACT_ENDPOINT must be an absolute URL");
        }
        if self.contact_rate_limit == 0 || self.contact_rate_window_secs == 0 {
            errors.push("Contact rate limit and window must be positive");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Admin addresses, lower-cased for comparison.
    pub fn admin_emails(&self) -> Vec<String> {
        self.admin_emails
            .iter()
            .flat_map(|email| email.split(','))
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn site_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &self.supabase_anon_key.redact())
            .field("supabase_service_key", &self.supabase_service_key.as_ref().map(|k| k.redact()))
            .field("jwt_secret", &self.jwt_secret.redact())
            .field("jwt_audience", &self.jwt_audience)
            .field("admin_emails", &self.admin_emails)
            .field("storage_bucket", &self.storage_bucket)
            .field("contact_endpoint", &self.contact_endpoint)
            .field("contact_rate_limit", &self.contact_rate_limit)
            .field("contact_rate_window_secs", &self.contact_rate_window_secs)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("site_url", &self.site_url)
            .field("fallback_policy", &self.fallback_policy)
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let jwt_secret = Zeroizing::new(config.jwt_secret.clone());

        JwtKeys {
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: default_name(),
            port: 0,
            host: default_host(),
            worker_count: 1,
            cors_allowed_origins: default_cors_origins(),
            supabase_url: "https://demo.supabase.co".into(),
            supabase_anon_key: "anon-key".into(),
            supabase_service_key: None,
            jwt_secret: "a-test-secret-that-is-at-least-32-chars".into(),
            jwt_audience: default_jwt_audience(),
            admin_emails: vec![],
            storage_bucket: default_storage_bucket(),
            contact_endpoint: default_contact_endpoint(),
            contact_rate_limit: default_contact_limit(),
            contact_rate_window_secs: default_contact_window_secs(),
            trust_x_forwarded_for: false,
            site_url: default_site_url(),
            fallback_policy: FallbackPolicy::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn short_secret_and_bad_url_are_reported_together() {
        let config = AppConfig {
            supabase_url: "not a url".into(),
            jwt_secret: "short".into(),
            ..test_config()
        };

        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("SUPABASE_URL"));
        assert!(message.contains("JWT_SECRET"));
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let config = AppConfig { env: AppEnvironment::Production, ..test_config() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn admin_emails_are_split_and_lowercased() {
        let config = AppConfig {
            admin_emails: vec!["Jerry@Example.com, ops@example.com".into()],
            ..test_config()
        };
        assert_eq!(config.admin_emails(), vec!["jerry@example.com", "ops@example.com"]);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("a-test-secret"));
        assert!(!rendered.contains("anon-key"));
    }
}
