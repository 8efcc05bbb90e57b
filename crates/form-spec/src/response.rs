use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A respondent's answer to a single question. The shape follows the
/// question archetype and is never written back into the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// categorize: item label mapped to category label.
    Categorize(BTreeMap<String, String>),
    /// cloze: one entry per blank, index-aligned.
    Cloze(Vec<String>),
    /// comprehension: sub-question id mapped to the selected option index.
    Comprehension(BTreeMap<String, usize>),
}

impl Answer {
    /// True while the respondent has not produced any content yet.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Categorize(assignments) => assignments.is_empty(),
            Answer::Cloze(entries) => entries.iter().all(|entry| entry.is_empty()),
            Answer::Comprehension(selected) => selected.is_empty(),
        }
    }
}

/// Completed response envelope produced by the preview's submit action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub form_id: String,
    pub answers: BTreeMap<String, Answer>,
    pub submitted_at: String,
}

impl ResponseSet {
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Questions the respondent actually touched.
    pub fn answered_count(&self) -> usize {
        self.answers
            .values()
            .filter(|answer| !answer.is_empty())
            .count()
    }
}
