use std::fmt::Write;

use formcraft_engine::Receipt;
use formcraft_spec::render::{RenderPayload, RenderQuestion};
use formcraft_spec::response::ResponseSet;

/// Controls which bits of state the fill wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: header image, progress, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints the form header, per-question prompts, and the completion
/// summary for the fill wizard.
pub struct FillPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_responses_json: bool,
}

impl FillPresenter {
    pub fn new(verbosity: Verbosity, show_responses_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_responses_json,
        }
    }

    pub fn show_header(&mut self, payload: &RenderPayload) {
        if self.header_printed {
            return;
        }
        println!("Form: {}", payload.form_title);
        if !payload.form_description.is_empty() {
            println!("{}", payload.form_description);
        }
        if self.verbosity.is_verbose() && !payload.header_image.is_empty() {
            println!("Header image: {}", payload.header_image);
        }
        self.header_printed = true;
    }

    pub fn show_question(&self, question: &RenderQuestion, total: usize) {
        println!();
        let mut line = format!("{}/{} {}", question.ordinal, total, question.title);
        if question.required {
            line.push_str(" *");
        }
        line.push_str(&format!(
            " [{} | {} point{}]",
            question.kind,
            question.points,
            if question.points == 1 { "" } else { "s" }
        ));
        println!("{}", line);
        if !question.description.is_empty() {
            println!("{}", question.description);
        }
        if !question.image.is_empty() {
            println!("Image: {}", question.image);
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if let Some(debug) = &error.debug_message {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, receipt: &Receipt, responses: &ResponseSet) {
        println!();
        println!("{}", receipt.message);
        println!(
            "Answered {}/{} question(s) on form '{}' ({} bytes encoded).",
            receipt.answered,
            responses.answers.len(),
            receipt.form_id,
            receipt.encoded_bytes
        );
        match responses.to_cbor() {
            Ok(bytes) => {
                println!("Responses (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize responses to CBOR: {}", err);
            }
        }
        if self.show_responses_json {
            match responses.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize responses to JSON: {}", err);
                }
            }
        }
    }
}

/// Error produced when parsing respondent input.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{:02x}", byte).expect("writing to string cannot fail");
    }
    encoded
}
