use std::str::FromStr;

use serde::Deserialize;

use crate::{
    catalog,
    entities::project::{Project, ProjectListResponse, ProjectOrigin},
    repositories::project::ProjectRepository,
};

/// Whether an empty-but-successful live read should be replaced by the
/// static catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    OnErrorOnly,
    #[default]
    OnErrorOrEmpty,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on_error_only" => Ok(FallbackPolicy::OnErrorOnly),
            "on_error_or_empty" => Ok(FallbackPolicy::OnErrorOrEmpty),
            other => Err(format!("Invalid fallback policy: {}", other)),
        }
    }
}

/// Projects for a public view, tagged with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectFeed {
    Live(Vec<Project>),
    Fallback(Vec<Project>),
}

impl ProjectFeed {
    pub fn origin(&self) -> ProjectOrigin {
        match self {
            ProjectFeed::Live(_) => ProjectOrigin::Live,
            ProjectFeed::Fallback(_) => ProjectOrigin::Fallback,
        }
    }

    pub fn projects(&self) -> &[Project] {
        match self {
            ProjectFeed::Live(projects) | ProjectFeed::Fallback(projects) => projects,
        }
    }

    pub fn into_projects(self) -> Vec<Project> {
        match self {
            ProjectFeed::Live(projects) | ProjectFeed::Fallback(projects) => projects,
        }
    }

    /// Keeps only the projects accepted by `keep`, preserving the origin.
    pub fn retain<F: FnMut(&Project) -> bool>(self, keep: F) -> Self {
        let origin = self.origin();
        let mut projects = self.into_projects();
        projects.retain(keep);

        match origin {
            ProjectOrigin::Live => ProjectFeed::Live(projects),
            ProjectOrigin::Fallback => ProjectFeed::Fallback(projects),
        }
    }
}

impl From<ProjectFeed> for ProjectListResponse {
    fn from(feed: ProjectFeed) -> Self {
        let source = feed.origin();
        let projects = feed.into_projects();
        ProjectListResponse {
            source,
            total: projects.len(),
            projects,
        }
    }
}

/// Outcome of a single-project lookup. A miss is a normal answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SlugLookup {
    Found { project: Project, origin: ProjectOrigin },
    NotFound,
}

/// Read-with-fallback loader behind every public project view.
///
/// Every call goes to the hosted service; nothing is cached between views.
pub struct ContentLoader<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
    pub policy: FallbackPolicy,
}

impl<R> ContentLoader<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R, policy: FallbackPolicy) -> Self {
        ContentLoader { project_repo, policy }
    }

    /// Newest-first projects from the hosted service, or the static catalog
    /// when the read fails (or comes back empty, per policy).
    pub async fn load_projects(&self) -> ProjectFeed {
        match self.project_repo.list_projects().await {
            Ok(projects) if projects.is_empty() && self.policy == FallbackPolicy::OnErrorOrEmpty => {
                tracing::info!("No live projects, serving static catalog");
                ProjectFeed::Fallback(catalog::fallback_projects())
            }
            Ok(projects) => ProjectFeed::Live(projects),
            Err(e) => {
                tracing::warn!("Project listing failed, serving static catalog: {}", e);
                ProjectFeed::Fallback(catalog::fallback_projects())
            }
        }
    }

    /// Projects whose title or technologies contain `query`, ignoring case.
    pub async fn search_projects(&self, query: Option<&str>) -> ProjectFeed {
        let feed = self.load_projects().await;
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => feed.retain(|project| project.matches(q)),
            None => feed,
        }
    }

    pub async fn featured_projects(&self) -> ProjectFeed {
        self.load_projects().await.retain(|project| project.featured)
    }

    pub async fn get_project_by_slug(&self, slug: &str) -> SlugLookup {
        match self.project_repo.find_by_slug(slug).await {
            Ok(Some(project)) => {
                return SlugLookup::Found { project, origin: ProjectOrigin::Live };
            }
            Ok(None) => tracing::debug!("No live project for slug '{}'", slug),
            Err(e) => tracing::warn!("Project lookup for '{}' failed, checking static catalog: {}", slug, e),
        }

        match catalog::find_fallback_by_slug(slug) {
            Some(project) => SlugLookup::Found { project, origin: ProjectOrigin::Fallback },
            None => SlugLookup::NotFound,
        }
    }
}
