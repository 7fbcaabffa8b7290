//! Section classifier, a multinomial naive Bayes model trained once from a
//! fixed labelled corpus. Lines sharing no vocabulary with the corpus are
//! labelled `Unknown` rather than forced into a section.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Skills,
    Experience,
    Education,
    Unknown,
}

const TRAINING_CORPUS: &[(&str, SectionLabel)] = &[
    ("proficient in javascript typescript react", SectionLabel::Skills),
    ("experienced with node.js express mongodb", SectionLabel::Skills),
    ("languages frameworks tools", SectionLabel::Skills),
    ("work experience professional history", SectionLabel::Experience),
    ("senior software engineer tech lead", SectionLabel::Experience),
    ("education university college degree", SectionLabel::Education),
    ("bachelor master phd computer science", SectionLabel::Education),
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "for", "from", "in", "of", "on", "the", "to", "with",
];

#[derive(Debug)]
struct LabelModel {
    label: SectionLabel,
    log_prior: f64,
    token_counts: HashMap<String, usize>,
    total_tokens: usize,
}

#[derive(Debug)]
pub struct SectionClassifier {
    models: Vec<LabelModel>,
    vocabulary: HashSet<String>,
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::train(TRAINING_CORPUS)
    }
}

impl SectionClassifier {
    /// Trains on `(document, label)` pairs. Label order is first-seen order
    /// and breaks score ties.
    pub fn train(corpus: &[(&str, SectionLabel)]) -> Self {
        let mut models: Vec<LabelModel> = Vec::new();
        let mut doc_counts: Vec<usize> = Vec::new();
        let mut vocabulary = HashSet::new();

        for (document, label) in corpus {
            let idx = match models.iter().position(|m| m.label == *label) {
                Some(idx) => idx,
                None => {
                    models.push(LabelModel {
                        label: *label,
                        log_prior: 0.0,
                        token_counts: HashMap::new(),
                        total_tokens: 0,
                    });
                    doc_counts.push(0);
                    models.len() - 1
                }
            };
            doc_counts[idx] += 1;

            for token in tokenize(document) {
                vocabulary.insert(token.clone());
                *models[idx].token_counts.entry(token).or_insert(0) += 1;
                models[idx].total_tokens += 1;
            }
        }

        let total_docs = corpus.len().max(1) as f64;
        for (model, docs) in models.iter_mut().zip(doc_counts) {
            model.log_prior = (docs as f64 / total_docs).ln();
        }

        Self { models, vocabulary }
    }

    pub fn classify(&self, line: &str) -> SectionLabel {
        let tokens: Vec<String> = tokenize(line)
            .filter(|t| self.vocabulary.contains(t))
            .collect();
        if tokens.is_empty() {
            return SectionLabel::Unknown;
        }

        let vocab_size = self.vocabulary.len() as f64;
        let mut best: Option<(SectionLabel, f64)> = None;
        for model in &self.models {
            let denominator = model.total_tokens as f64 + vocab_size;
            let score = tokens.iter().fold(model.log_prior, |acc, token| {
                let count = model.token_counts.get(token).copied().unwrap_or(0) as f64;
                acc + ((count + 1.0) / denominator).ln()
            });
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((model.label, score));
            }
        }

        best.map(|(label, _)| label).unwrap_or(SectionLabel::Unknown)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
}
