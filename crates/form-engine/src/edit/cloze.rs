use formcraft_spec::cloze::derive_blanks;

/// Editor operations for a cloze payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ClozeEdit {
    /// Replace the text and reconcile the blank list with the new marker
    /// count.
    SetText { text: String },
    /// Replace the correct answer at one blank position.
    SetBlank { index: usize, value: String },
}

pub(crate) fn apply(text: &mut String, blanks: &mut Vec<String>, op: ClozeEdit) {
    match op {
        ClozeEdit::SetText { text: new_text } => {
            *blanks = derive_blanks(blanks, &new_text);
            *text = new_text;
        }
        ClozeEdit::SetBlank { index, value } => {
            if let Some(slot) = blanks.get_mut(index) {
                *slot = value;
            }
        }
    }
}
