#![allow(missing_docs)]

pub mod cloze;
pub mod render;
pub mod response;
pub mod response_schema;
pub mod spec;

pub use cloze::{BLANK_MARKER, blank_count, derive_blanks, split_segments};
pub use render::{
    RenderBody, RenderPayload, RenderProgress, RenderQuestion, RenderSubQuestion,
    build_render_payload, option_letter, render_card, render_json_ui, render_text,
};
pub use response::{Answer, ResponseSet};
pub use response_schema::generate as response_schema;
pub use spec::{
    ComprehensionQuestion, FormDocument, FormPatch, Question, QuestionKind, QuestionPatch,
    QuestionPayload,
};
