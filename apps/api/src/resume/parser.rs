//! Résumé parser: classify lines into sections, then extract skills,
//! experience, education and contact fields.
//!
//! Flow: classify each line → route it to the current section → per-section
//! extraction. Contact fields are read from the whole document.

use std::collections::HashSet;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::extract::StructuredExtractor;
use crate::models::resume::Resume;
use crate::resume::classifier::{SectionClassifier, SectionLabel};
use crate::resume::extractors::{
    split_blocks, ContactExtractor, EducationBlockExtractor, ExperienceBlockExtractor,
};

/// Exact-match skill allow-list. Vocabulary outside it is not extracted.
static KNOWN_SKILLS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "javascript", "typescript", "react", "node", "python", "java", "c++", "sql", "aws",
        "docker", "kubernetes", "git", "agile", "scrum", "ci/cd", "rest", "graphql",
    ]
    .into_iter()
    .collect()
});

/// What happens to a line the classifier labels `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLinePolicy {
    /// Appended to the section the cursor currently names (blank lines,
    /// dates and free-form description lines stay with their block).
    #[default]
    Inherit,
    /// Discarded.
    Drop,
}

impl FromStr for UnknownLinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inherit" => Ok(UnknownLinePolicy::Inherit),
            "drop" => Ok(UnknownLinePolicy::Drop),
            other => Err(format!("unknown line policy '{other}' (expected inherit|drop)")),
        }
    }
}

/// Lines routed to each section, in document order.
#[derive(Debug, Default, PartialEq)]
pub struct Sections {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
}

impl Sections {
    fn section_mut(&mut self, label: SectionLabel) -> Option<&mut Vec<String>> {
        match label {
            SectionLabel::Skills => Some(&mut self.skills),
            SectionLabel::Experience => Some(&mut self.experience),
            SectionLabel::Education => Some(&mut self.education),
            SectionLabel::Unknown => None,
        }
    }
}

pub struct ResumeParser {
    classifier: SectionClassifier,
    policy: UnknownLinePolicy,
}

impl ResumeParser {
    pub fn new(policy: UnknownLinePolicy) -> Self {
        Self {
            classifier: SectionClassifier::default(),
            policy,
        }
    }

    pub fn parse(&self, raw_text: &str) -> Resume {
        let sections = self.split_into_sections(raw_text);

        Resume {
            skills: extract_skills(&sections.skills.join("\n")),
            experience: split_blocks(&sections.experience.join("\n"))
                .filter_map(|block| ExperienceBlockExtractor.extract(block))
                .collect(),
            education: split_blocks(&sections.education.join("\n"))
                .filter_map(|block| EducationBlockExtractor.extract(block))
                .collect(),
            contact: ContactExtractor.extract(raw_text),
            raw_content: raw_text.to_string(),
        }
    }

    /// Routes every line to a section. A labelled line moves the cursor;
    /// unknown lines follow `self.policy`. Lines before the first labelled
    /// line have no section and are skipped.
    pub fn split_into_sections(&self, raw_text: &str) -> Sections {
        let mut sections = Sections::default();
        let mut cursor = SectionLabel::Unknown;

        for line in raw_text.lines() {
            let label = self.classifier.classify(line);
            if label != SectionLabel::Unknown {
                cursor = label;
            } else if self.policy == UnknownLinePolicy::Drop {
                continue;
            }

            if let Some(section) = sections.section_mut(cursor) {
                section.push(line.to_string());
            }
        }

        sections
    }
}

/// Tokens kept by the allow-list, deduplicated in first-seen order.
fn extract_skills(section: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    section
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '/')))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| KNOWN_SKILLS.contains(t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
