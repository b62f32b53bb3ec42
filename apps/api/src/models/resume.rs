use serde::{Deserialize, Serialize};

/// Structured resume as handed over by the parsing layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub full_text: String,
}

/// One position on the resume. Dates stay as the parser produced them
/// (`YYYY-MM-DD`, or `Present` for the end date); duration is derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
    pub technologies: Vec<String>,
}

impl ExperienceEntry {
    /// Text used when comparing this entry against a job description.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

impl ProjectEntry {
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A project with its relevance to a job description attached.
/// `relevance_score` is the cosine similarity scaled to -100..=100, and
/// stays `None` when no embedding model was available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProject {
    #[serde(flatten)]
    pub project: ProjectEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<i32>,
}

impl From<ProjectEntry> for ScoredProject {
    fn from(project: ProjectEntry) -> Self {
        Self {
            project,
            relevance_score: None,
        }
    }
}
