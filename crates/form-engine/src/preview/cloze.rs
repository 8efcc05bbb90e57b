use formcraft_spec::response::Answer;

/// Respondent-side entries for one cloze question, index-aligned with the
/// question's blanks.
#[derive(Debug, Clone, Default)]
pub struct ClozeSession {
    entries: Vec<String>,
}

impl ClozeSession {
    /// Session sized to the question's blank count, all entries empty.
    pub fn new(blank_count: usize) -> Self {
        Self {
            entries: vec![String::new(); blank_count],
        }
    }

    /// Replace the entry at one blank position. Out-of-range indices are
    /// ignored.
    pub fn set_entry(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn answer(&self) -> Answer {
        Answer::Cloze(self.entries.clone())
    }
}
