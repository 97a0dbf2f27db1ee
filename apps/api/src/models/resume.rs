//! Caller-facing résumé record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::{
    Certificate, Education, Experience, Language, ProfileDocument, Project, Skill, SocialLink,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumePayload {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub fullname: String,
    #[serde(default)]
    pub professional_title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub location: String,
    pub phone: String,
    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub languages: Vec<Language>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ResumePayload> for ProfileDocument {
    fn from(resume: ResumePayload) -> Self {
        ProfileDocument {
            fullname: resume.fullname,
            professional_title: resume.professional_title,
            location: resume.location,
            phone: resume.phone,
            summary: resume.summary,
            experiences: resume.experiences,
            education: resume.education,
            skills: resume.skills,
            projects: resume.projects,
            certificates: resume.certificates,
            languages: resume.languages,
            social_links: resume.social_links,
        }
    }
}
