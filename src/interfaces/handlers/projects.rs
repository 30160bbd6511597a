use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::project::ProjectListResponse,
    handlers::json_error::json_error,
    use_cases::content::SlugLookup,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub q: Option<String>,
}

/// Public project listing. Never fails: a broken backend yields the
/// static catalog, tagged as such in `source`.
#[instrument(skip(state))]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectQuery>,
) -> impl Responder {
    let feed = state.content_loader.search_projects(query.q.as_deref()).await;
    HttpResponse::Ok().json(ProjectListResponse::from(feed))
}

#[instrument(skip(state))]
pub async fn get_project(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> impl Responder {
    match state.content_loader.get_project_by_slug(&slug).await {
        SlugLookup::Found { project, origin } => {
            HttpResponse::Ok().json(project.to_detail_response(origin))
        }
        SlugLookup::NotFound => json_error(
            StatusCode::NOT_FOUND,
            "Project not found",
            &format!("No project with slug '{}'", slug),
        ),
    }
}
