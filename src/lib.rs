use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_clients;

pub use domain::{catalog, entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, limiter, supabase, utils};

use auth::jwt::JwtService;
use limiter::rate_limiter::ContactRateLimiter;
use repositories::supabase_repo::{FormRelayClient, SupabaseProjectRepo, SupabaseStorage};
use settings::AppConfig;
use shared_clients::SharedClients;
use supabase::auth::SupabaseAuth;
use use_cases::{admin::AdminHandler, contact::ContactHandler, content::ContentLoader};

pub struct AppState {
    pub content_loader: AppContentLoader,
    pub admin_handler: AppAdminHandler,
    pub contact_handler: AppContactHandler,
    pub sign_in: SupabaseAuth,
    pub jwt_service: JwtService,
    pub contact_limiter: ContactRateLimiter,
    pub trust_x_forwarded_for: bool,
    pub site_url: String,
}

pub type AppContentLoader = ContentLoader<SupabaseProjectRepo>;
pub type AppAdminHandler = AdminHandler<SupabaseProjectRepo, SupabaseStorage>;
pub type AppContactHandler = ContactHandler<FormRelayClient>;

impl AppState {
    pub fn new(config: &AppConfig, clients: SharedClients) -> Self {
        let content_loader = ContentLoader::new(clients.project_repo.clone(), config.fallback_policy);
        let admin_handler = AdminHandler::new(clients.project_repo, clients.storage);
        let contact_handler = ContactHandler::new(clients.contact_relay);

        let contact_limiter = ContactRateLimiter::new(
            config.contact_rate_limit,
            Duration::from_secs(config.contact_rate_window_secs),
        );

        AppState {
            content_loader,
            admin_handler,
            contact_handler,
            sign_in: clients.auth,
            jwt_service: JwtService::new(config),
            contact_limiter,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
            site_url: config.site_url().to_string(),
        }
    }
}
