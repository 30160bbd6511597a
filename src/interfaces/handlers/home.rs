use actix_web::{get, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    catalog::{EXPERIENCES, PROFILE, SKILLS},
    entities::profile::{AboutResponse, HomeResponse},
    AppState,
};

/// Landing page data: who the site belongs to and the featured work.
#[get("/")]
#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let featured = state.content_loader.featured_projects().await;

    HttpResponse::Ok().json(HomeResponse {
        profile: &PROFILE,
        skills: &SKILLS,
        source: featured.origin(),
        featured_projects: featured.into_projects(),
    })
}

#[get("/about")]
pub async fn about() -> impl Responder {
    HttpResponse::Ok().json(AboutResponse {
        profile: &PROFILE,
        experiences: &EXPERIENCES,
        skills: &SKILLS,
    })
}
