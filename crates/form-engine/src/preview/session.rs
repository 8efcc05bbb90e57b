use std::collections::BTreeMap;

use chrono::Utc;

use formcraft_spec::response::{Answer, ResponseSet};
use formcraft_spec::spec::form::FormDocument;
use formcraft_spec::spec::question::QuestionPayload;

use crate::submit::{Receipt, SubmissionSink, SubmitError};

use super::{CategorizeSession, ClozeSession, ComprehensionSession};

/// Per-question session state, matched to the question's archetype.
#[derive(Debug, Clone)]
pub enum QuestionSession {
    Categorize(CategorizeSession),
    Cloze(ClozeSession),
    Comprehension(ComprehensionSession),
}

impl QuestionSession {
    pub fn answer(&self) -> Answer {
        match self {
            QuestionSession::Categorize(session) => session.answer(),
            QuestionSession::Cloze(session) => session.answer(),
            QuestionSession::Comprehension(session) => session.answer(),
        }
    }
}

/// Respondent state for a whole form preview: one session per question, in
/// document order. Ephemeral; nothing here is written back into the
/// document.
#[derive(Debug, Clone)]
pub struct PreviewSession {
    form_id: String,
    sessions: Vec<(String, QuestionSession)>,
}

impl PreviewSession {
    /// Fresh sessions for every question in the document.
    pub fn for_form(form: &FormDocument) -> Self {
        let sessions = form
            .questions
            .iter()
            .map(|question| {
                let session = match &question.payload {
                    QuestionPayload::Categorize { .. } => {
                        QuestionSession::Categorize(CategorizeSession::new())
                    }
                    QuestionPayload::Cloze { blanks, .. } => {
                        QuestionSession::Cloze(ClozeSession::new(blanks.len()))
                    }
                    QuestionPayload::Comprehension { .. } => {
                        QuestionSession::Comprehension(ComprehensionSession::new())
                    }
                };
                (question.id.clone(), session)
            })
            .collect();
        Self {
            form_id: form.id.clone(),
            sessions,
        }
    }

    pub fn question(&self, id: &str) -> Option<&QuestionSession> {
        self.sessions
            .iter()
            .find(|(session_id, _)| session_id == id)
            .map(|(_, session)| session)
    }

    pub fn question_mut(&mut self, id: &str) -> Option<&mut QuestionSession> {
        self.sessions
            .iter_mut()
            .find(|(session_id, _)| session_id == id)
            .map(|(_, session)| session)
    }

    pub fn categorize(&self, id: &str) -> Option<&CategorizeSession> {
        match self.question(id)? {
            QuestionSession::Categorize(session) => Some(session),
            _ => None,
        }
    }

    pub fn categorize_mut(&mut self, id: &str) -> Option<&mut CategorizeSession> {
        match self.question_mut(id)? {
            QuestionSession::Categorize(session) => Some(session),
            _ => None,
        }
    }

    pub fn cloze_mut(&mut self, id: &str) -> Option<&mut ClozeSession> {
        match self.question_mut(id)? {
            QuestionSession::Cloze(session) => Some(session),
            _ => None,
        }
    }

    pub fn comprehension_mut(&mut self, id: &str) -> Option<&mut ComprehensionSession> {
        match self.question_mut(id)? {
            QuestionSession::Comprehension(session) => Some(session),
            _ => None,
        }
    }

    /// Current draft of every per-question answer, re-derived on demand so
    /// each change is reflected immediately.
    pub fn draft(&self) -> BTreeMap<String, Answer> {
        self.sessions
            .iter()
            .map(|(id, session)| (id.clone(), session.answer()))
            .collect()
    }

    /// Bundle the draft into a response set stamped with the current time.
    pub fn collect(&self) -> ResponseSet {
        ResponseSet {
            form_id: self.form_id.clone(),
            answers: self.draft(),
            submitted_at: Utc::now().to_rfc3339(),
        }
    }

    /// Collect the responses and hand them to the submission sink.
    pub fn submit(&self, sink: &dyn SubmissionSink) -> Result<Receipt, SubmitError> {
        sink.submit(&self.collect())
    }
}
