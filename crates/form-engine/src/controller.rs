use chrono::Utc;

use formcraft_spec::spec::form::{FormDocument, FormPatch};
use formcraft_spec::spec::question::{Question, QuestionKind, QuestionPatch};

use crate::edit::{self, EditOp};

/// Which of the two top-level views is active. Held next to the document,
/// never inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Builder,
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Builder => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Builder,
        }
    }
}

/// Owns the single in-memory form document for the life of the process.
///
/// All mutations flow through the operations below; each one refreshes
/// `updated_at`. Operations are total: unknown question ids are silently
/// ignored.
#[derive(Debug, Clone)]
pub struct FormController {
    document: FormDocument,
    view: ViewMode,
}

impl FormController {
    /// Controller around a fresh untitled form.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            document: FormDocument {
                id: id.into(),
                title: "Untitled Form".into(),
                description: String::new(),
                header_image: String::new(),
                questions: Vec::new(),
                created_at: now.clone(),
                updated_at: now,
            },
            view: ViewMode::Builder,
        }
    }

    /// Adopt an existing document, e.g. one loaded from disk.
    pub fn from_document(document: FormDocument) -> Self {
        Self {
            document,
            view: ViewMode::Builder,
        }
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn into_document(self) -> FormDocument {
        self.document
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    /// Merge form-level fields and refresh the update stamp.
    pub fn update_form(&mut self, patch: FormPatch) {
        if let Some(title) = patch.title {
            self.document.title = title;
        }
        if let Some(description) = patch.description {
            self.document.description = description;
        }
        if let Some(header_image) = patch.header_image {
            self.document.header_image = header_image;
        }
        if let Some(questions) = patch.questions {
            self.document.questions = questions;
        }
        self.touch();
    }

    /// Append a question of the given archetype and return its fresh id.
    pub fn add_question(&mut self, kind: QuestionKind) -> String {
        let id = self.next_question_id();
        self.document.questions.push(Question::new(id.clone(), kind));
        self.touch();
        id
    }

    /// Merge fields into the question matching `id`.
    pub fn update_question(&mut self, id: &str, patch: QuestionPatch) {
        if let Some(question) = self
            .document
            .questions
            .iter_mut()
            .find(|question| question.id == id)
        {
            if let Some(title) = patch.title {
                question.title = title;
            }
            if let Some(description) = patch.description {
                question.description = description;
            }
            if let Some(image) = patch.image {
                question.image = image;
            }
            if let Some(required) = patch.required {
                question.required = required;
            }
            if let Some(points) = patch.points {
                question.points = points.max(1);
            }
            if let Some(payload) = patch.payload {
                question.payload = payload;
            }
        }
        self.touch();
    }

    /// Remove the question matching `id`.
    pub fn delete_question(&mut self, id: &str) {
        self.document.questions.retain(|question| question.id != id);
        self.touch();
    }

    /// Route a typed editor operation to the question matching `id`.
    /// Archetype mismatches are ignored, like every other unknown target.
    pub fn apply_edit(&mut self, id: &str, op: EditOp) {
        if let Some(question) = self
            .document
            .questions
            .iter_mut()
            .find(|question| question.id == id)
        {
            edit::apply(&mut question.payload, op);
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.document.updated_at = Utc::now().to_rfc3339();
    }

    /// Time-based id, bumped until it collides with nothing in the
    /// document.
    fn next_question_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !self
                .document
                .questions
                .iter()
                .any(|question| question.id == candidate)
            {
                return candidate;
            }
            millis += 1;
        }
    }
}
