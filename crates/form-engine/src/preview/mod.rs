pub mod categorize;
pub mod cloze;
pub mod comprehension;
pub mod session;

pub use categorize::CategorizeSession;
pub use cloze::ClozeSession;
pub use comprehension::ComprehensionSession;
pub use session::{PreviewSession, QuestionSession};
