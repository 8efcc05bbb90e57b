pub mod form;
pub mod question;

pub use form::{FormDocument, FormPatch};
pub use question::{
    ComprehensionQuestion, Question, QuestionKind, QuestionPatch, QuestionPayload,
};
