use serde::{Deserialize, Serialize};

/// The job a profile is tailored towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub tech_tags: Vec<String>,
}
