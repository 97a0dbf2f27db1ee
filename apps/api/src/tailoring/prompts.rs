//! Prompts for the three tailoring calls.

use serde::Serialize;

use crate::models::job_posting::JobPosting;
use crate::models::resume::ResumePayload;

pub const RECRUITER_ROLE: &str =
    "You are a senior technical recruiter who optimizes résumés for a specific job posting.";

pub const EXPERIENCE_EDUCATION_GUIDE: &str = "\
Return ONLY a JSON object {\"experiences\": [...], \"education\": [...]}.
Each experience keeps job_title, company, location, start_date, end_date (YYYY-MM-DD or null),
description and challenge from USER_PROFILE. Each education entry keeps degree, school,
field_of_study, location, start_date, end_date and description.
- Order experiences by relevance to JOB_POSTING, then by recency.
- Rewrite descriptions with action verbs and the posting's vocabulary where the profile
  supports it. Prefer qualitative phrasing over numbers that the profile does not state.
- Keep companies, roles and dates exactly as given.
- Education: keep only relevant entries, highest degree first.";

pub const SKILLS_PROJECTS_CERTIFICATES_GUIDE: &str = "\
Return ONLY a JSON object {\"skills\": [...], \"projects\": [...], \"certificates\": [...]}.
Skills are {name, level}; projects are {name, description, link, tech_stack}; certificates
are {issuer, name, date_issued (YYYY-MM-DD), description, link}.
- Skills: taken from USER_PROFILE, deduplicated case-insensitively, most relevant first.
- Projects: at most 3, the most relevant to JOB_POSTING, descriptions of 20 words or less.
- Certificates: only those present in USER_PROFILE.";

pub const SUMMARY_GUIDE: &str = "\
Return ONLY a JSON object {\"summary\": \"...\"}.
Write two sentences, 60 to 100 words, tailored to JOB_POSTING. The first names role,
seniority, domain and the core stack the user shares with the posting. The second states
the most relevant evidence of impact. Rewrite USER_PROFILE.summary when present, otherwise
synthesize one from profile facts only.";

/// Guide, then the posting and the profile as pretty JSON.
pub fn user_prompt(
    guide: &str,
    job: &JobPosting,
    resume: &ResumePayload,
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "{guide}\n\nJOB_POSTING:\n{}\n\nUSER_PROFILE:\n{}",
        pretty(job)?,
        pretty(resume)?
    ))
}

fn pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
