use async_trait::async_trait;

use crate::{
    entities::project::{NewProject, Project, ProjectChanges},
    errors::RemoteError,
    repositories::supabase_repo::{SupabaseProjectRepo, PROJECTS_TABLE},
    supabase::client::SupabaseClient,
};

/// Row-level access to the hosted `projects` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All rows, newest first by `created_at`.
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, RemoteError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, RemoteError>;
    /// Returns the stored row when the service echoes it back.
    async fn insert_project(&self, project: &NewProject) -> Result<Option<Project>, RemoteError>;
    /// `Ok(None)` when no row has that id.
    async fn update_project(&self, id: &str, changes: &ProjectChanges) -> Result<Option<Project>, RemoteError>;
    async fn delete_project(&self, id: &str) -> Result<(), RemoteError>;
    async fn check_connection(&self) -> Result<(), RemoteError>;
}

impl SupabaseProjectRepo {
    pub fn new(client: SupabaseClient) -> Self {
        SupabaseProjectRepo { client }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Project>, RemoteError> {
        let filter = format!("eq.{}", value);
        let request = self
            .client
            .http()
            .get(self.client.rest_url(PROJECTS_TABLE))
            .query(&[("select", "*"), (column, filter.as_str()), ("limit", "1")]);

        let response = self.client.authorize(request, false).send().await?;
        let rows: Vec<Project> = SupabaseClient::read_json(response).await?;

        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ProjectRepository for SupabaseProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let request = self
            .client
            .http()
            .get(self.client.rest_url(PROJECTS_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let response = self.client.authorize(request, false).send().await?;
        SupabaseClient::read_json(response).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, RemoteError> {
        self.find_one("slug", slug).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, RemoteError> {
        self.find_one("id", id).await
    }

    async fn insert_project(&self, project: &NewProject) -> Result<Option<Project>, RemoteError> {
        let request = self
            .client
            .http()
            .post(self.client.rest_url(PROJECTS_TABLE))
            .header("Prefer", "return=representation")
            .json(&[project]);

        let response = self.client.authorize(request, true).send().await?;
        let rows: Vec<Project> = SupabaseClient::read_json(response).await?;

        Ok(rows.into_iter().next())
    }

    async fn update_project(&self, id: &str, changes: &ProjectChanges) -> Result<Option<Project>, RemoteError> {
        let filter = format!("eq.{}", id);
        let request = self
            .client
            .http()
            .patch(self.client.rest_url(PROJECTS_TABLE))
            .query(&[("id", filter.as_str())])
            .header("Prefer", "return=representation")
            .json(changes);

        let response = self.client.authorize(request, true).send().await?;
        let rows: Vec<Project> = SupabaseClient::read_json(response).await?;

        Ok(rows.into_iter().next())
    }

    async fn delete_project(&self, id: &str) -> Result<(), RemoteError> {
        let filter = format!("eq.{}", id);
        let request = self
            .client
            .http()
            .delete(self.client.rest_url(PROJECTS_TABLE))
            .query(&[("id", filter.as_str())]);

        let response = self.client.authorize(request, true).send().await?;
        SupabaseClient::check_status(response).await
    }

    async fn check_connection(&self) -> Result<(), RemoteError> {
        let request = self
            .client
            .http()
            .get(self.client.rest_url(PROJECTS_TABLE))
            .query(&[("select", "id"), ("limit", "1")]);

        let response = self.client.authorize(request, false).send().await?;
        SupabaseClient::check_status(response).await
    }
}
