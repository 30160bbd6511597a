use actix_web::web;

use crate::handlers::{contact_me, projects};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::list_projects))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(projects::get_project))
            )
    );

    cfg.service(
        web::resource("/contact")
            .route(web::post().to(contact_me::create_contact_me))
    );
}
