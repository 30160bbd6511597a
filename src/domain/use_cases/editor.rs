use validator::Validate;

use crate::{
    entities::{
        asset::{SelectedFile, UploadedAsset},
        project::ProjectForm,
    },
    errors::AppError,
    repositories::{project::ProjectRepository, storage::ObjectStorage},
    use_cases::admin::{AdminHandler, MutationOutcome},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Saved,
}

/// Image upload state, tracked apart from the save phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    NoUpload,
    Uploading,
    Uploaded(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

/// One admin create/edit form instance.
///
/// Saving is refused while an image upload is in flight so a record never
/// points at a half-uploaded asset. A finished upload only fills in
/// `image_url`; the admin still has to submit.
pub struct ProjectEditor<'a, R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    handler: &'a AdminHandler<R, S>,
    mode: EditorMode,
    form: ProjectForm,
    phase: FormPhase,
    upload: UploadState,
}

impl<'a, R, S> ProjectEditor<'a, R, S>
where
    R: ProjectRepository,
    S: ObjectStorage,
{
    pub fn create(handler: &'a AdminHandler<R, S>, form: ProjectForm) -> Self {
        Self::with_mode(handler, EditorMode::Create, form)
    }

    /// Opens an existing project. Failing to load it is an error for the
    /// caller to show before leaving the edit screen.
    pub async fn edit(handler: &'a AdminHandler<R, S>, id: &str) -> Result<Self, AppError> {
        let project = handler.load_project(id).await?;
        let form = ProjectForm::from(&project);

        Ok(Self::with_mode(handler, EditorMode::Edit { id: project.id }, form))
    }

    /// Edits `id` with a form already filled in by the client.
    pub fn edit_with(handler: &'a AdminHandler<R, S>, id: &str, form: ProjectForm) -> Self {
        Self::with_mode(handler, EditorMode::Edit { id: id.to_string() }, form)
    }

    fn with_mode(handler: &'a AdminHandler<R, S>, mode: EditorMode, form: ProjectForm) -> Self {
        ProjectEditor {
            handler,
            mode,
            form,
            phase: FormPhase::Idle,
            upload: UploadState::NoUpload,
        }
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    pub fn into_form(self) -> ProjectForm {
        self.form
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn upload_state(&self) -> &UploadState {
        &self.upload
    }

    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Idle && self.upload != UploadState::Uploading
    }

    /// Uploads a project image and writes its public URL into the form.
    /// On failure the previous `image_url` and upload state are kept.
    pub async fn upload_image(&mut self, file: SelectedFile) -> Result<UploadedAsset, AppError> {
        if self.upload == UploadState::Uploading {
            return Err(AppError::Conflict("An image upload is already in progress".to_string()));
        }
        if self.phase != FormPhase::Idle {
            return Err(AppError::Conflict("The form is being saved".to_string()));
        }

        let previous = std::mem::replace(&mut self.upload, UploadState::Uploading);

        match self.handler.upload_project_image(file).await {
            Ok(asset) => {
                self.form.image_url = asset.public_url.clone();
                self.upload = UploadState::Uploaded(asset.public_url.clone());
                Ok(asset)
            }
            Err(e) => {
                self.upload = previous;
                Err(e)
            }
        }
    }

    /// Clears an upload that was abandoned mid-flight.
    pub fn discard_upload(&mut self) {
        if self.upload == UploadState::Uploading {
            self.upload = UploadState::NoUpload;
        }
    }

    /// Saves the form. On error the editor returns to `Idle` with every
    /// field as the admin left it.
    pub async fn submit(&mut self) -> Result<MutationOutcome, AppError> {
        match (&self.phase, &self.upload) {
            (_, UploadState::Uploading) => {
                return Err(AppError::Conflict("Wait for the image upload to finish before saving".to_string()));
            }
            (FormPhase::Submitting, _) => {
                return Err(AppError::Conflict("A save is already in progress".to_string()));
            }
            (FormPhase::Saved, _) => {
                return Err(AppError::Conflict("This form has already been saved".to_string()));
            }
            (FormPhase::Idle, _) => {}
        }

        self.phase = FormPhase::Submitting;

        let result = match &self.mode {
            EditorMode::Create => self.handler.create_project(&self.form).await,
            EditorMode::Edit { id } => self.handler.update_project(id, &self.form).await,
        };

        self.phase = match result {
            Ok(_) => FormPhase::Saved,
            Err(_) => FormPhase::Idle,
        };

        result
    }

    /// Uploads `image`, if any, then saves. The form is validated before
    /// anything is sent, so an invalid form leaves no stray object behind.
    pub async fn save_with_image(&mut self, image: Option<SelectedFile>) -> Result<MutationOutcome, AppError> {
        self.form.validate()?;

        if let Some(image) = image {
            self.upload_image(image).await?;
        }

        self.submit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::RemoteError,
        repositories::{project::MockProjectRepository, storage::MockObjectStorage},
        use_cases::admin::{
            tests::{stored, valid_form, PNG_BYTES},
            ADMIN_LIST_PATH,
        },
    };

    fn png() -> SelectedFile {
        SelectedFile {
            file_name: "hero.png".into(),
            content_type: "image/png".into(),
            bytes: PNG_BYTES.to_vec(),
        }
    }

    #[tokio::test]
    async fn submit_is_refused_while_upload_in_flight() {
        let mut repo = MockProjectRepository::new();
        repo.expect_insert_project().never();
        let handler = AdminHandler::new(repo, MockObjectStorage::new());

        let mut editor = ProjectEditor::create(&handler, valid_form());
        editor.upload = UploadState::Uploading;

        assert!(!editor.can_submit());
        assert!(matches!(editor.submit().await, Err(AppError::Conflict(_))));
        assert_eq!(editor.phase(), &FormPhase::Idle);

        editor.discard_upload();
        assert_eq!(editor.upload_state(), &UploadState::NoUpload);
        assert!(editor.can_submit());
    }

    #[tokio::test]
    async fn uploaded_image_fills_form_without_saving() {
        let mut repo = MockProjectRepository::new();
        repo.expect_insert_project().never();

        let mut storage = MockObjectStorage::new();
        storage.expect_upload().times(1).returning(|_, _, _, _| Ok(()));
        storage
            .expect_public_url()
            .returning(|path: &str| format!("https://cdn.example.com/{path}"));

        let handler = AdminHandler::new(repo, storage);
        let mut editor = ProjectEditor::create(&handler, valid_form());

        let asset = editor.upload_image(png()).await.unwrap();

        assert_eq!(editor.form().image_url, asset.public_url);
        assert_eq!(editor.upload_state(), &UploadState::Uploaded(asset.public_url.clone()));
        assert_eq!(editor.phase(), &FormPhase::Idle);
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_image() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_upload()
            .returning(|_, _, _, _| Err(RemoteError::Service { status: 404, message: "Bucket not found".into() }));

        let handler = AdminHandler::new(MockProjectRepository::new(), storage);
        let form = ProjectForm { image_url: "https://cdn.example.com/old.png".into(), ..valid_form() };
        let mut editor = ProjectEditor::create(&handler, form);

        assert!(editor.upload_image(png()).await.is_err());
        assert_eq!(editor.form().image_url, "https://cdn.example.com/old.png");
        assert_eq!(editor.upload_state(), &UploadState::NoUpload);
    }

    #[tokio::test]
    async fn successful_save_redirects_once_and_locks_the_form() {
        let mut repo = MockProjectRepository::new();
        repo.expect_insert_project()
            .times(1)
            .returning(|_| Ok(Some(stored("10", "starfield"))));

        let handler = AdminHandler::new(repo, MockObjectStorage::new());
        let mut editor = ProjectEditor::create(&handler, valid_form());

        let outcome = editor.submit().await.unwrap();
        assert_eq!(outcome.redirect_to, ADMIN_LIST_PATH);
        assert_eq!(editor.phase(), &FormPhase::Saved);

        assert!(matches!(editor.submit().await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn failed_save_returns_to_idle_with_fields_intact() {
        let mut repo = MockProjectRepository::new();
        repo.expect_update_project()
            .times(1)
            .returning(|_, _| Err(RemoteError::Service { status: 400, message: "invalid input syntax".into() }));

        let handler = AdminHandler::new(repo, MockObjectStorage::new());
        let mut editor = ProjectEditor::edit_with(&handler, "5", valid_form());

        let err = editor.submit().await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref msg) if msg.contains("invalid input syntax")));
        assert_eq!(editor.phase(), &FormPhase::Idle);
        assert_eq!(editor.form(), &valid_form());
    }

    #[tokio::test]
    async fn invalid_form_with_image_sends_nothing() {
        let mut repo = MockProjectRepository::new();
        repo.expect_insert_project().never();
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().never();

        let handler = AdminHandler::new(repo, storage);
        let form = ProjectForm { title: String::new(), slug: " ".into(), ..valid_form() };
        let mut editor = ProjectEditor::create(&handler, form);

        let err = editor.save_with_image(Some(png())).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(ref fields) if fields.len() == 2));
        assert_eq!(editor.upload_state(), &UploadState::NoUpload);
        assert_eq!(editor.phase(), &FormPhase::Idle);
    }

    #[tokio::test]
    async fn valid_form_uploads_image_then_saves_its_url() {
        let mut storage = MockObjectStorage::new();
        storage.expect_upload().times(1).returning(|_, _, _, _| Ok(()));
        storage
            .expect_public_url()
            .returning(|path: &str| format!("https://cdn.example.com/{path}"));

        let mut repo = MockProjectRepository::new();
        repo.expect_insert_project()
            .withf(|p| p.image_url.starts_with("https://cdn.example.com/projects/"))
            .times(1)
            .returning(|_| Ok(Some(stored("11", "starfield"))));

        let handler = AdminHandler::new(repo, storage);
        let mut editor = ProjectEditor::create(&handler, valid_form());

        let outcome = editor.save_with_image(Some(png())).await.unwrap();
        assert_eq!(outcome.slug, "starfield");
        assert_eq!(editor.phase(), &FormPhase::Saved);
    }

    #[tokio::test]
    async fn edit_loads_existing_record_into_form() {
        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_id()
            .withf(|id: &str| id == "5")
            .returning(|_| {
                let mut project = stored("5", "orb");
                project.technologies = vec!["GSAP".into(), "Canvas".into()];
                Ok(Some(project))
            });

        let handler = AdminHandler::new(repo, MockObjectStorage::new());
        let editor = ProjectEditor::edit(&handler, "5").await.unwrap();

        assert_eq!(editor.mode(), &EditorMode::Edit { id: "5".into() });
        assert_eq!(editor.form().technologies, "GSAP, Canvas");
    }
}
