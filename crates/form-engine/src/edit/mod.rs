pub mod categorize;
pub mod cloze;
pub mod comprehension;

pub use categorize::CategorizeEdit;
pub use cloze::ClozeEdit;
pub use comprehension::ComprehensionEdit;

use formcraft_spec::spec::question::QuestionPayload;

/// A discrete editor operation against one question's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    Categorize(CategorizeEdit),
    Cloze(ClozeEdit),
    Comprehension(ComprehensionEdit),
}

/// Apply `op` to `payload`. Operations aimed at a different archetype are
/// ignored.
pub fn apply(payload: &mut QuestionPayload, op: EditOp) {
    match (payload, op) {
        (
            QuestionPayload::Categorize {
                categories, items, ..
            },
            EditOp::Categorize(op),
        ) => categorize::apply(categories, items, op),
        (QuestionPayload::Cloze { text, blanks }, EditOp::Cloze(op)) => {
            cloze::apply(text, blanks, op)
        }
        (
            QuestionPayload::Comprehension { passage, questions },
            EditOp::Comprehension(op),
        ) => comprehension::apply(passage, questions, op),
        _ => {}
    }
}
