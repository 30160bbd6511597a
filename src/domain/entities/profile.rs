use serde::Serialize;

use crate::entities::project::{Project, ProjectOrigin};

/// The site owner, as shown on the home and about pages.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub bio: &'static str,
    pub email: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
    pub avatar: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Experience {
    pub id: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub profile: &'static Profile,
    pub skills: &'static [Skill],
    pub source: ProjectOrigin,
    pub featured_projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub profile: &'static Profile,
    pub experiences: &'static [Experience],
    pub skills: &'static [Skill],
}
