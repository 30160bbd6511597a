use std::borrow::Cow;

use actix_multipart::form::{bytes::Bytes as MpBytes, json::Json as MpJson, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::markdown::safe_markdown_to_html;

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 120;
const MAX_SLUG_LENGTH: u64 = 80;
const MAX_DESCRIPTION_LENGTH: u64 = 2_000;
const TECHNOLOGY_SEPARATOR: char = ',';
const PARAGRAPH_BREAK: &str = "\n\n";
const SLUG_FORBIDDEN: [char; 5] = ['/', '?', '#', '%', '\\'];

// ───── Remote Row Model ─────────────────────────────────────────────

/// A row of the hosted `projects` collection.
///
/// Field names on the wire follow the remote schema (`imageUrl`, `liveUrl`,
/// `githubUrl`, `created_at`), so the same shape is read from the hosted
/// service, from the static catalog and written back out to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,

    pub title: String,

    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,

    #[serde(rename = "imageUrl", default, deserialize_with = "blank_as_none")]
    pub image_url: Option<String>,

    #[serde(rename = "liveUrl", default, deserialize_with = "blank_as_none")]
    pub live_url: Option<String>,

    #[serde(rename = "githubUrl", default, deserialize_with = "blank_as_none")]
    pub github_url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Long-form content split on blank lines, ready to render one block each.
    pub fn paragraphs(&self) -> Vec<String> {
        self.content
            .as_deref()
            .map(|content| {
                content
                    .split(PARAGRAPH_BREAK)
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Case-insensitive match against the title or any technology label.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&needle)
            || self
                .technologies
                .iter()
                .any(|tech| tech.to_lowercase().contains(&needle))
    }

    pub fn to_detail_response(&self, source: ProjectOrigin) -> ProjectDetailResponse {
        ProjectDetailResponse {
            source,
            paragraphs: self.paragraphs(),
            content_html: self.content.as_deref().map(safe_markdown_to_html),
            project: self.clone(),
        }
    }
}

/// Where a piece of project data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectOrigin {
    Live,
    Fallback,
}

// ───── Insert / Update Payloads ─────────────────────────────────────

/// Insert payload. `featured` is always written as `false` on creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "liveUrl")]
    pub live_url: String,
    #[serde(rename = "githubUrl")]
    pub github_url: String,
    pub featured: bool,
}

/// Update payload. Leaves `featured`, `id` and `created_at` as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectChanges {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "liveUrl")]
    pub live_url: String,
    #[serde(rename = "githubUrl")]
    pub github_url: String,
}

// ───── Admin Form ───────────────────────────────────────────────────

/// The admin create/edit form, one typed field per input.
///
/// `technologies` stays the comma-separated string the admin typed; it is
/// parsed only when the form is turned into a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectForm {
    #[validate(
        length(max = MAX_TITLE_LENGTH, message = "Title is too long"),
        custom(function = "validate_required")
    )]
    pub title: String,

    #[validate(
        length(max = MAX_SLUG_LENGTH, message = "Slug is too long"),
        custom(function = "validate_slug")
    )]
    pub slug: String,

    #[validate(
        length(max = MAX_DESCRIPTION_LENGTH, message = "Description is too long"),
        custom(function = "validate_required")
    )]
    pub description: String,

    pub technologies: String,

    #[serde(alias = "imageUrl")]
    #[validate(custom(function = "validate_optional_url"))]
    pub image_url: String,

    #[serde(alias = "liveUrl")]
    #[validate(custom(function = "validate_optional_url"))]
    pub live_url: String,

    #[serde(alias = "githubUrl")]
    #[validate(custom(function = "validate_optional_url"))]
    pub github_url: String,
}

impl ProjectForm {
    pub fn technology_list(&self) -> Vec<String> {
        parse_technologies(&self.technologies)
    }

    /// Slug as it will be stored: exactly what the admin typed, trimmed.
    pub fn stored_slug(&self) -> String {
        self.slug.trim().to_string()
    }

    pub fn to_new_project(&self) -> NewProject {
        NewProject {
            title: self.title.trim().to_string(),
            slug: self.stored_slug(),
            description: self.description.trim().to_string(),
            technologies: self.technology_list(),
            image_url: self.image_url.trim().to_string(),
            live_url: self.live_url.trim().to_string(),
            github_url: self.github_url.trim().to_string(),
            featured: false,
        }
    }

    pub fn to_changes(&self) -> ProjectChanges {
        ProjectChanges {
            title: self.title.trim().to_string(),
            slug: self.stored_slug(),
            description: self.description.trim().to_string(),
            technologies: self.technology_list(),
            image_url: self.image_url.trim().to_string(),
            live_url: self.live_url.trim().to_string(),
            github_url: self.github_url.trim().to_string(),
        }
    }
}

impl From<&Project> for ProjectForm {
    fn from(project: &Project) -> Self {
        ProjectForm {
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            technologies: project.technologies.join(", "),
            image_url: project.image_url.clone().unwrap_or_default(),
            live_url: project.live_url.clone().unwrap_or_default(),
            github_url: project.github_url.clone().unwrap_or_default(),
        }
    }
}

/// Splits a comma-separated technologies string, trimming each entry and
/// dropping empty ones. Order is preserved.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    raw.split(TECHNOLOGY_SEPARATOR)
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .map(str::to_string)
        .collect()
}

/// Multipart variant of the create/update body: the form as a JSON part
/// plus an optional image uploaded before the record is saved.
#[derive(Debug, MultipartForm)]
pub struct ProjectUpload {
    #[multipart(rename = "project")]
    pub project: MpJson<ProjectForm>,

    #[multipart(rename = "image", limit = "10MB")]
    pub image: Option<MpBytes>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub source: ProjectOrigin,
    pub total: usize,
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub source: ProjectOrigin,
    pub project: Project,
    pub paragraphs: Vec<String>,
    pub content_html: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectEditResponse {
    pub id: String,
    pub featured: bool,
    pub form: ProjectForm,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", "This field is required"));
    }
    Ok(())
}

/// A slug is stored as typed, so it must already be a single URL path
/// segment. The error suggests a slugified alternative.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;

    let value = value.trim();
    if value.chars().any(|c| c.is_whitespace() || SLUG_FORBIDDEN.contains(&c)) {
        let mut err = ValidationError::new("invalid_slug");
        err.message = Some(Cow::Owned(format!(
            "Slug must be a single URL path segment, e.g. \"{}\"",
            slug::slugify(value)
        )));
        return Err(err);
    }
    Ok(())
}

pub fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    match url::Url::parse(value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        Ok(_) => Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://")),
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

// ───── Serde Helpers ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn technologies_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(
            parse_technologies(" React, Next.js ,  ,TypeScript"),
            vec!["React", "Next.js", "TypeScript"]
        );
        assert!(parse_technologies(" , ,").is_empty());
    }

    #[test]
    fn blank_required_fields_fail_validation() {
        let form = ProjectForm {
            title: "   ".into(),
            slug: "".into(),
            description: "Something".into(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("slug"));
        assert!(!fields.contains_key("description"));
    }

    #[test]
    fn slugs_that_are_not_one_path_segment_are_rejected() {
        let form = ProjectForm {
            title: "Task Manager".into(),
            slug: "Task Manager/v2".into(),
            description: "Drag and drop".into(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        let slug_errors = fields["slug"];
        assert_eq!(slug_errors[0].code, "invalid_slug");
        assert!(slug_errors[0].message.as_deref().unwrap().contains("task-manager-v2"));

        let form = ProjectForm { slug: "Next.js-app".into(), ..form };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn optional_urls_must_be_http() {
        let mut form = ProjectForm {
            title: "Site".into(),
            slug: "site".into(),
            description: "A site".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.live_url = "ftp://example.com".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn new_project_is_never_featured_and_slug_is_kept_verbatim() {
        let form = ProjectForm {
            title: " Task Manager ".into(),
            slug: " Next.js-App ".into(),
            description: "Drag and drop".into(),
            technologies: "React,  Firebase".into(),
            ..Default::default()
        };

        let payload = form.to_new_project();
        assert!(!payload.featured);
        assert_eq!(payload.title, "Task Manager");
        assert_eq!(payload.slug, "Next.js-App");
        assert_eq!(form.to_changes().slug, "Next.js-App");
        assert_eq!(payload.technologies, vec!["React", "Firebase"]);
    }

    #[test]
    fn remote_rows_with_numeric_ids_and_nulls_deserialize() {
        let row: Project = serde_json::from_value(json!({
            "id": 42,
            "title": "Orb",
            "slug": "orb",
            "description": null,
            "technologies": null,
            "imageUrl": "",
            "liveUrl": "https://example.com",
            "githubUrl": null,
            "featured": null,
            "created_at": "2025-01-02T03:04:05+00:00"
        }))
        .unwrap();

        assert_eq!(row.id, "42");
        assert_eq!(row.description, "");
        assert!(row.technologies.is_empty());
        assert_eq!(row.image_url, None);
        assert_eq!(row.live_url.as_deref(), Some("https://example.com"));
        assert!(!row.featured);
        assert!(row.created_at.is_some());
    }

    #[test]
    fn content_splits_on_blank_lines() {
        let project = Project {
            id: "1".into(),
            title: "T".into(),
            slug: "t".into(),
            description: String::new(),
            content: Some("First.\n\nSecond line\nstill second.\n\n\n\nThird.".into()),
            technologies: vec![],
            image_url: None,
            live_url: None,
            github_url: None,
            featured: false,
            created_at: None,
        };

        assert_eq!(
            project.paragraphs(),
            vec!["First.", "Second line\nstill second.", "Third."]
        );
    }

    #[test]
    fn edit_form_joins_technologies() {
        let project = Project {
            id: "9".into(),
            title: "Dash".into(),
            slug: "dash".into(),
            description: "d".into(),
            content: None,
            technologies: vec!["Rust".into(), "Actix".into()],
            image_url: Some("https://cdn.example.com/a.png".into()),
            live_url: None,
            github_url: None,
            featured: true,
            created_at: None,
        };

        let form = ProjectForm::from(&project);
        assert_eq!(form.technologies, "Rust, Actix");
        assert_eq!(form.image_url, "https://cdn.example.com/a.png");
        assert_eq!(form.live_url, "");
    }
}
