//! Fragments returned by the three tailoring calls.

use serde::{Deserialize, Serialize};

use super::profile::{Certificate, Education, Experience, Project, Skill};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TailoredExperienceEducation {
    #[serde(default, alias = "experience")]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TailoredSkillsProjectsCertificates {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TailoredSummary {
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_alias_is_accepted() {
        let parsed: TailoredExperienceEducation = serde_json::from_str(
            r#"{"experience": [{"job_title": "Engineer", "company": "Acme",
                "start_date": "2021-03-01", "description": "Did things."}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.experiences.len(), 1);
        assert!(parsed.education.is_empty());
    }

    #[test]
    fn test_empty_object_gives_empty_lists() {
        let parsed: TailoredSkillsProjectsCertificates = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TailoredSkillsProjectsCertificates::default());
    }
}
