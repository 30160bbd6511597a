use actix_web::web;

use crate::handlers::{home, site, system::health_check};

mod auth;
mod admin;
mod projects;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(home::about)
        .service(site::resume)
        .service(site::sitemap)
        .service(health_check);

    cfg.configure(projects::config_routes)
        .configure(auth::config_routes)
        .configure(admin::config_routes);

    cfg.configure(json_error::config_routes);
}
