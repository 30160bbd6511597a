use serde::Serialize;
use validator::Validate;

use crate::{
    entities::{
        asset::{AssetKind, SelectedFile, UploadedAsset, RESUME_PATH},
        project::{Project, ProjectForm},
    },
    errors::AppError,
    repositories::{project::ProjectRepository, storage::ObjectStorage},
};

/// Where the admin UI goes after a successful save.
pub const ADMIN_LIST_PATH: &str = "/admin/projects";

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationOutcome {
    pub id: Option<String>,
    /// The slug as stored, i.e. the key of the public detail view.
    pub slug: String,
    pub redirect_to: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The admin did not confirm; nothing was sent.
    Cancelled,
    /// Deleted. `remaining` is the list as re-read afterwards, or `None`
    /// when that re-read failed.
    Deleted { remaining: Option<Vec<Project>> },
}

/// Create, update, delete and upload operations behind the admin screens.
pub struct AdminHandler<R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub project_repo: R,
    pub storage: S,
}

impl<R, S> AdminHandler<R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub fn new(project_repo: R, storage: S) -> Self {
        AdminHandler { project_repo, storage }
    }

    /// Live listing for the dashboard. Unlike the public views there is no
    /// static fallback here: the admin must see what is really stored.
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await.map_err(|e| {
            tracing::error!("Error fetching projects: {}", e);
            AppError::Upstream(format!("Failed to fetch projects: {}", e))
        })
    }

    /// Loads a project for editing.
    pub async fn load_project(&self, id: &str) -> Result<Project, AppError> {
        let id = required_id(id)?;

        match self.project_repo.find_by_id(id).await {
            Ok(Some(project)) => Ok(project),
            Ok(None) => Err(AppError::NotFound("Project not found".to_string())),
            Err(e) => {
                tracing::error!("Error fetching project {}: {}", id, e);
                Err(AppError::Upstream(format!("Error fetching project details: {}", e)))
            }
        }
    }

    /// Validates the form and inserts a new, non-featured project.
    /// Nothing is sent when validation fails.
    pub async fn create_project(&self, form: &ProjectForm) -> Result<MutationOutcome, AppError> {
        form.validate()?;

        let payload = form.to_new_project();
        let created = self.project_repo.insert_project(&payload).await.map_err(|e| {
            tracing::error!("Error creating project: {}", e);
            AppError::Upstream(format!("Failed to create project: {}", e))
        })?;

        tracing::info!(slug = %payload.slug, "Project created");

        Ok(MutationOutcome {
            id: created.map(|p| p.id),
            slug: payload.slug,
            redirect_to: ADMIN_LIST_PATH,
        })
    }

    pub async fn update_project(&self, id: &str, form: &ProjectForm) -> Result<MutationOutcome, AppError> {
        let id = required_id(id)?;
        form.validate()?;

        let changes = form.to_changes();
        let updated = self.project_repo.update_project(id, &changes).await.map_err(|e| {
            tracing::error!("Error updating project {}: {}", id, e);
            AppError::Upstream(format!("Failed to update project: {}", e))
        })?;

        match updated {
            Some(project) => {
                tracing::info!(id = %project.id, "Project updated");
                Ok(MutationOutcome {
                    id: Some(project.id),
                    slug: project.slug,
                    redirect_to: ADMIN_LIST_PATH,
                })
            }
            None => Err(AppError::NotFound("Project not found".to_string())),
        }
    }

    /// Deletes after explicit confirmation, then re-reads the list. Nothing
    /// is removed locally ahead of the service. Only a failed delete is an
    /// error; a failed re-read is logged and leaves `remaining` empty.
    pub async fn delete_project(&self, id: &str, confirmed: bool) -> Result<DeleteOutcome, AppError> {
        let id = required_id(id)?;

        if !confirmed {
            tracing::debug!("Delete of project {} not confirmed", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.project_repo.delete_project(id).await.map_err(|e| {
            tracing::error!("Error deleting project {}: {}", id, e);
            AppError::Upstream(format!("Failed to delete project: {}", e))
        })?;

        tracing::info!(id = %id, "Project deleted");

        let remaining = match self.project_repo.list_projects().await {
            Ok(projects) => Some(projects),
            Err(e) => {
                tracing::warn!("Project {} deleted but the list could not be refreshed: {}", id, e);
                None
            }
        };

        Ok(DeleteOutcome::Deleted { remaining })
    }

    pub async fn upload_project_image(&self, file: SelectedFile) -> Result<UploadedAsset, AppError> {
        self.upload_asset(AssetKind::ProjectImage, file).await
    }

    /// Stores the resume under its fixed key, replacing any earlier upload.
    pub async fn upload_resume(&self, file: SelectedFile) -> Result<UploadedAsset, AppError> {
        self.upload_asset(AssetKind::Resume, file).await
    }

    pub fn resume_url(&self) -> String {
        self.storage.public_url(RESUME_PATH)
    }

    async fn upload_asset(&self, kind: AssetKind, file: SelectedFile) -> Result<UploadedAsset, AppError> {
        let content_type = sniff_content_type(kind, &file)?;
        let path = kind.destination(&file.file_name);

        self.storage
            .upload(&path, file.bytes, &content_type, kind.upsert())
            .await
            .map_err(|e| {
                tracing::error!("Error uploading {} to {}: {}", kind.label(), path, e);
                AppError::Upstream(format!(
                    "Error uploading {}: {}. Make sure the storage bucket exists and is public.",
                    kind.label(),
                    e
                ))
            })?;

        tracing::info!(path = %path, "Uploaded {}", kind.label());

        Ok(UploadedAsset {
            public_url: self.storage.public_url(&path),
            path,
        })
    }
}

fn required_id(id: &str) -> Result<&str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidInput("Project id is required".to_string()));
    }
    Ok(id)
}

/// Checks the bytes really are what the upload claims to be and returns the
/// MIME type to store them under.
fn sniff_content_type(kind: AssetKind, file: &SelectedFile) -> Result<String, AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::InvalidInput("No file selected".to_string()));
    }

    let detected = infer::get(&file.bytes);
    match kind {
        AssetKind::ProjectImage => match detected {
            Some(t) if t.matcher_type() == infer::MatcherType::Image => Ok(t.mime_type().to_string()),
            _ => Err(AppError::InvalidInput("Selected file is not an image".to_string())),
        },
        AssetKind::Resume => match detected {
            Some(t) if t.mime_type() == PDF_MIME => Ok(PDF_MIME.to_string()),
            _ => Err(AppError::InvalidInput("Resume must be a PDF file".to_string())),
        },
    }
}
