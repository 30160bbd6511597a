use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::{constants::MAX_UPLOAD_BYTES, errors::AppError, handlers::admin};

/// Room for the largest file plus the form fields around it.
const MAX_ADMIN_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .app_data(web::PayloadConfig::new(MAX_ADMIN_BODY_BYTES))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(MAX_ADMIN_BODY_BYTES)
                    .memory_limit(MAX_ADMIN_BODY_BYTES)
                    .error_handler(|err, _req| AppError::from(err).into()),
            )
            .service(
                web::resource("/projects")
                    .route(web::get().to(admin::list_projects))
                    .route(web::post().to(admin::create_project))
            )
            .service(
                web::resource("/projects/{id}")
                    .route(web::get().to(admin::get_project))
                    .route(web::put().to(admin::update_project))
                    .route(web::delete().to(admin::delete_project))
            )
            .service(
                web::resource("/uploads/image")
                    .route(web::post().to(admin::upload_image))
            )
            .service(
                web::resource("/uploads/resume")
                    .route(web::post().to(admin::upload_resume))
            )
    );
}
