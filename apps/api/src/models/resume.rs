use serde::{Deserialize, Serialize};

/// Structured résumé produced by the parser. Built once per parse and never
/// mutated afterwards; `raw_content` keeps the source text for re-extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub contact: ContactInfo,
    pub raw_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Contact fields. Missing values are empty strings, never errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// Where the user's uploaded résumé file lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResumeRef {
    S3 { key: String },
    Local { path: String },
}

impl ResumeRef {
    /// File name used to sniff the document format.
    pub fn file_name(&self) -> &str {
        let full = match self {
            ResumeRef::S3 { key } => key.as_str(),
            ResumeRef::Local { path } => path.as_str(),
        };
        full.rsplit(['/', '\\']).next().unwrap_or(full)
    }
}
