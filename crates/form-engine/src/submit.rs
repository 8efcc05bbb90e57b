use thiserror::Error;

use formcraft_spec::response::ResponseSet;

/// Errors surfaced by a submission sink.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to encode responses: {0}")]
    Encode(#[from] serde_cbor::Error),
}

/// Acknowledgment handed back by a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub form_id: String,
    /// Questions the respondent actually touched.
    pub answered: usize,
    /// Size of the encoded envelope a real backend would receive.
    pub encoded_bytes: usize,
    pub message: String,
}

/// External collaborator contract for response submission. The real
/// backend endpoint is out of scope; implementations must work without
/// one.
pub trait SubmissionSink {
    fn submit(&self, responses: &ResponseSet) -> Result<Receipt, SubmitError>;
}

/// Terminal sink: encodes the responses, produces the user-visible
/// confirmation, and sends nothing anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcknowledgeSink;

impl SubmissionSink for AcknowledgeSink {
    fn submit(&self, responses: &ResponseSet) -> Result<Receipt, SubmitError> {
        let encoded = responses.to_cbor()?;
        Ok(Receipt {
            form_id: responses.form_id.clone(),
            answered: responses.answered_count(),
            encoded_bytes: encoded.len(),
            message: "Form submitted successfully!".into(),
        })
    }
}
