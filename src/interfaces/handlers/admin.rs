use actix_multipart::form::MultipartForm;
use actix_web::{http::StatusCode, web, Either, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::{
        asset::{AssetUpload, SelectedFile},
        project::{ProjectEditResponse, ProjectForm, ProjectUpload},
    },
    errors::AppError,
    handlers::json_error::{json_error, json_error_with_redirect},
    use_cases::{
        admin::{DeleteOutcome, ADMIN_LIST_PATH},
        editor::ProjectEditor,
        extractors::AdminClaims,
    },
    AppState,
};

type ProjectInput = Result<Either<MultipartForm<ProjectUpload>, web::Json<ProjectForm>>, actix_web::Error>;

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[instrument(skip(_claims, state))]
pub async fn list_projects(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.admin_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total": projects.len(),
        "projects": projects
    })))
}

#[instrument(skip(claims, state, input), fields(admin = %claims.0.sub))]
pub async fn create_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    input: ProjectInput,
) -> Result<HttpResponse, AppError> {
    let (form, image) = match read_project_input(input) {
        Ok(parts) => parts,
        Err(response) => return Ok(response),
    };

    let mut editor = ProjectEditor::create(&state.admin_handler, form);
    let outcome = editor.save_with_image(image).await?;

    Ok(HttpResponse::Created().json(outcome))
}

/// Loads a project into the edit form. On failure the client is sent back
/// to the list.
#[instrument(skip(_claims, state))]
pub async fn get_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> impl Responder {
    match state.admin_handler.load_project(&id).await {
        Ok(project) => HttpResponse::Ok().json(ProjectEditResponse {
            id: project.id.clone(),
            featured: project.featured,
            form: ProjectForm::from(&project),
        }),
        Err(e) => json_error_with_redirect(&e, ADMIN_LIST_PATH),
    }
}

#[instrument(skip(claims, state, input), fields(admin = %claims.0.sub))]
pub async fn update_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
    input: ProjectInput,
) -> Result<HttpResponse, AppError> {
    let (form, image) = match read_project_input(input) {
        Ok(parts) => parts,
        Err(response) => return Ok(response),
    };

    let mut editor = ProjectEditor::edit_with(&state.admin_handler, &id, form);
    let outcome = editor.save_with_image(image).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Deletes only with `?confirm=true`; otherwise nothing is sent upstream.
#[instrument(skip(claims, state), fields(admin = %claims.0.sub))]
pub async fn delete_project(
    claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> Result<impl Responder, AppError> {
    let response = match state.admin_handler.delete_project(&id, query.confirm).await? {
        DeleteOutcome::Cancelled => HttpResponse::Ok().json(serde_json::json!({
            "deleted": false,
            "message": "Deletion not confirmed. Repeat the request with ?confirm=true."
        })),
        DeleteOutcome::Deleted { remaining: Some(remaining) } => HttpResponse::Ok().json(serde_json::json!({
            "deleted": true,
            "total": remaining.len(),
            "projects": remaining
        })),
        DeleteOutcome::Deleted { remaining: None } => HttpResponse::Ok().json(serde_json::json!({
            "deleted": true,
            "message": "Project deleted, but the list could not be refreshed."
        })),
    };

    Ok(response)
}

#[instrument(skip(_claims, state, form))]
pub async fn upload_image(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<AssetUpload>,
) -> Result<impl Responder, AppError> {
    let asset = state
        .admin_handler
        .upload_project_image(SelectedFile::from(form.into_inner().file))
        .await?;

    Ok(HttpResponse::Created().json(asset))
}

#[instrument(skip(_claims, state, form))]
pub async fn upload_resume(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<AssetUpload>,
) -> Result<impl Responder, AppError> {
    let asset = state
        .admin_handler
        .upload_resume(SelectedFile::from(form.into_inner().file))
        .await?;

    Ok(HttpResponse::Created().json(asset))
}

/// Splits either body shape into the form and an optional image.
fn read_project_input(input: ProjectInput) -> Result<(ProjectForm, Option<SelectedFile>), HttpResponse> {
    match input {
        Ok(Either::Left(upload)) => {
            let upload = upload.into_inner();
            Ok((upload.project.into_inner(), upload.image.map(SelectedFile::from)))
        }
        Ok(Either::Right(json)) => Ok((json.into_inner(), None)),
        Err(e) => Err(json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Request must be either application/json or multipart/form-data",
            &e.to_string(),
        )),
    }
}
