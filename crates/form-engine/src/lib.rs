#![allow(missing_docs)]

pub mod controller;
pub mod edit;
pub mod preview;
pub mod submit;
pub mod upload;

pub use controller::{FormController, ViewMode};
pub use edit::{CategorizeEdit, ClozeEdit, ComprehensionEdit, EditOp};
pub use preview::{
    CategorizeSession, ClozeSession, ComprehensionSession, PreviewSession, QuestionSession,
};
pub use submit::{AcknowledgeSink, Receipt, SubmissionSink, SubmitError};
pub use upload::{ImageStore, PLACEHOLDER_IMAGE_URL, StockPhotoStore, UploadError};
