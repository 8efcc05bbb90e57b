use std::collections::BTreeMap;

use formcraft_spec::response::Answer;

/// Respondent-side selections for one comprehension question.
#[derive(Debug, Clone, Default)]
pub struct ComprehensionSession {
    selected: BTreeMap<String, usize>,
}

impl ComprehensionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an option for a sub-question, replacing any prior choice so
    /// at most one option is selected per sub-question.
    pub fn select(&mut self, sub_question: impl Into<String>, option: usize) {
        self.selected.insert(sub_question.into(), option);
    }

    pub fn selected(&self, sub_question: &str) -> Option<usize> {
        self.selected.get(sub_question).copied()
    }

    pub fn answer(&self) -> Answer {
        Answer::Comprehension(self.selected.clone())
    }
}
