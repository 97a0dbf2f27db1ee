//! Tailoring: rewrites a résumé towards a job posting with three concurrent model calls.
//!
//! The calls cover experience/education, skills/projects/certificates, and the summary. The
//! merged profile is built only when all three succeed. Identity, social links and languages
//! always come from the résumé untouched.

pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument};

use crate::llm_client::{prompts::system_prompt, LlmClient, LlmError};
use crate::models::job_posting::JobPosting;
use crate::models::profile::ProfileDocument;
use crate::models::resume::ResumePayload;
use crate::models::tailored::{
    TailoredExperienceEducation, TailoredSkillsProjectsCertificates, TailoredSummary,
};

#[derive(Debug, Error)]
pub enum TailoringError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("could not build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("{0}")]
    Service(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The tailoring backend. Carried in `AppState` as `Arc<dyn TailoringService>`.
#[async_trait]
pub trait TailoringService: Send + Sync {
    async fn experience_education(
        &self,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<TailoredExperienceEducation, TailoringError>;

    async fn skills_projects_certificates(
        &self,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<TailoredSkillsProjectsCertificates, TailoringError>;

    async fn summary(
        &self,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<TailoredSummary, TailoringError>;
}

/// Runs the three calls concurrently and merges their results with the résumé's identity.
#[instrument(skip_all, fields(fullname = %resume.fullname))]
pub async fn build_profile(
    service: &dyn TailoringService,
    job: &JobPosting,
    resume: &ResumePayload,
) -> Result<ProfileDocument, TailoringError> {
    let (exp_edu, skills_etc, summary) = tokio::try_join!(
        service.experience_education(job, resume),
        service.skills_projects_certificates(job, resume),
        service.summary(job, resume),
    )?;

    info!(
        experiences = exp_edu.experiences.len(),
        projects = skills_etc.projects.len(),
        "tailored profile assembled"
    );

    Ok(ProfileDocument {
        fullname: resume.fullname.clone(),
        professional_title: resume.professional_title.clone(),
        location: resume.location.clone(),
        phone: resume.phone.clone(),
        summary: Some(summary.summary),
        experiences: exp_edu.experiences,
        education: exp_edu.education,
        skills: skills_etc.skills,
        projects: skills_etc.projects,
        certificates: skills_etc.certificates,
        languages: resume.languages.clone(),
        social_links: resume.social_links.clone(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmTailoringService {
    llm: LlmClient,
    system: String,
}

impl LlmTailoringService {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: system_prompt(prompts::RECRUITER_ROLE),
        }
    }

    async fn ask<T: serde::de::DeserializeOwned>(
        &self,
        guide: &str,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<T, TailoringError> {
        let prompt = prompts::user_prompt(guide, job, resume)?;
        Ok(self.llm.call_json(&prompt, &self.system).await?)
    }
}

#[async_trait]
impl TailoringService for LlmTailoringService {
    async fn experience_education(
        &self,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<TailoredExperienceEducation, TailoringError> {
        self.ask(prompts::EXPERIENCE_EDUCATION_GUIDE, job, resume)
            .await
    }

    async fn skills_projects_certificates(
        &self,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<TailoredSkillsProjectsCertificates, TailoringError> {
        self.ask(prompts::SKILLS_PROJECTS_CERTIFICATES_GUIDE, job, resume)
            .await
    }

    async fn summary(
        &self,
        job: &JobPosting,
        resume: &ResumePayload,
    ) -> Result<TailoredSummary, TailoringError> {
        self.ask(prompts::SUMMARY_GUIDE, job, resume).await
    }
}
