use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use formcraft_engine::FormController;
use formcraft_spec::cloze;
use formcraft_spec::response_schema;
use formcraft_spec::spec::form::{FormDocument, FormPatch};
use formcraft_spec::spec::question::{
    ComprehensionQuestion, QuestionKind, QuestionPatch, QuestionPayload,
};

/// Input shape describing the form to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInput {
    pub dir_name: String,
    pub form: FormInput,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

/// Metadata describing the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub header_image: Option<String>,
}

/// Question metadata collected from CLI interactions or JSON inputs. The
/// archetype-specific fields are flat options here for input convenience;
/// they are folded into the typed payload before touching the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInput {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blanks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<SubQuestionInput>>,
}

/// One comprehension sub-question as accepted from input files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubQuestionInput {
    #[serde(default)]
    pub id: Option<String>,
    pub question: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: usize,
}

fn default_points() -> u32 {
    1
}

/// Errors produced while building or writing a bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to serialize bundle artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build the form document from CLI inputs or JSON answers, routing every
/// mutation through the controller so defaults, ids, and stamps match the
/// interactive builder.
pub fn build_document(input: &GenerationInput) -> Result<FormDocument, BundleError> {
    validate_input(input)?;

    let mut controller = FormController::new(sanitize_file_name(&input.dir_name));
    controller.update_form(FormPatch {
        title: Some(input.form.title.clone()),
        description: input.form.description.clone(),
        header_image: input.form.header_image.clone(),
        questions: None,
    });

    for question in &input.questions {
        let id = controller.add_question(question.kind);
        controller.update_question(
            &id,
            QuestionPatch {
                title: Some(question.title.clone()),
                description: question.description.clone(),
                image: question.image.clone(),
                required: Some(question.required),
                points: Some(question.points),
                payload: build_payload(question)?,
            },
        );
    }

    Ok(controller.into_document())
}

fn validate_input(input: &GenerationInput) -> Result<(), BundleError> {
    if input.dir_name.trim().is_empty() {
        return Err(BundleError::InvalidInput("dir_name must be provided".into()));
    }
    if input.form.title.trim().is_empty() {
        return Err(BundleError::InvalidInput("form.title is required".into()));
    }

    for question in &input.questions {
        if question.title.trim().is_empty() {
            return Err(BundleError::InvalidInput("question title cannot be empty".into()));
        }
        if question.blanks.is_some() && question.text.is_none() {
            return Err(BundleError::InvalidInput(format!(
                "cloze question '{}' supplies blank answers without text",
                question.title
            )));
        }
        if let (Some(text), Some(blanks)) = (&question.text, &question.blanks) {
            let markers = cloze::blank_count(text);
            if blanks.len() != markers {
                return Err(BundleError::InvalidInput(format!(
                    "cloze question '{}' supplies {} answers for {} blank markers",
                    question.title,
                    blanks.len(),
                    markers
                )));
            }
        }
        if let Some(sub_questions) = &question.questions {
            for sub_question in sub_questions {
                if let Some(options) = &sub_question.options
                    && options.len() != 4
                {
                    return Err(BundleError::InvalidInput(format!(
                        "sub-question '{}' must have exactly 4 options",
                        sub_question.question
                    )));
                }
                if sub_question.correct_answer >= 4 {
                    return Err(BundleError::InvalidInput(format!(
                        "sub-question '{}' marks option {} correct; options are 0-3",
                        sub_question.question, sub_question.correct_answer
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Fold the flat input fields into a typed payload. `None` keeps the
/// archetype seed payload untouched.
fn build_payload(question: &QuestionInput) -> Result<Option<QuestionPayload>, BundleError> {
    let payload = match question.kind {
        QuestionKind::Categorize => {
            if question.categories.is_none() && question.items.is_none() {
                return Ok(None);
            }
            let (seed_categories, seed_items) =
                match QuestionPayload::seed(QuestionKind::Categorize) {
                    QuestionPayload::Categorize {
                        categories, items, ..
                    } => (categories, items),
                    _ => (Vec::new(), Vec::new()),
                };
            QuestionPayload::Categorize {
                categories: question.categories.clone().unwrap_or(seed_categories),
                items: question.items.clone().unwrap_or(seed_items),
                answers: BTreeMap::new(),
            }
        }
        QuestionKind::Cloze => {
            let Some(text) = question.text.clone() else {
                return Ok(None);
            };
            let blanks = match &question.blanks {
                Some(blanks) => blanks.clone(),
                None => cloze::derive_blanks(&[], &text),
            };
            QuestionPayload::Cloze { text, blanks }
        }
        QuestionKind::Comprehension => {
            if question.passage.is_none() && question.questions.is_none() {
                return Ok(None);
            }
            let sub_questions = question
                .questions
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(index, sub_question)| ComprehensionQuestion {
                    id: sub_question
                        .id
                        .clone()
                        .unwrap_or_else(|| (index + 1).to_string()),
                    question: sub_question.question.clone(),
                    options: sub_question.options.clone().unwrap_or_else(|| {
                        vec![
                            "Option A".into(),
                            "Option B".into(),
                            "Option C".into(),
                            "Option D".into(),
                        ]
                    }),
                    correct_answer: sub_question.correct_answer,
                })
                .collect();
            QuestionPayload::Comprehension {
                passage: question.passage.clone().unwrap_or_default(),
                questions: sub_questions,
            }
        }
    };
    Ok(Some(payload))
}

/// Serialize the bundle to disk: the form document, its response schema,
/// and a README.
pub fn write_bundle(
    document: &FormDocument,
    dir_name: &str,
    out_root: &Path,
) -> Result<PathBuf, BundleError> {
    let bundle_dir = out_root.join(dir_name);
    fs::create_dir_all(&bundle_dir)?;

    write_json(&bundle_dir.join("form.json"), document)?;
    write_json(
        &bundle_dir.join("response.schema.json"),
        &response_schema::generate(document),
    )?;
    fs::write(bundle_dir.join("README.md"), build_readme(document))?;

    Ok(bundle_dir)
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<(), BundleError> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(())
}

fn build_readme(document: &FormDocument) -> String {
    let description = if document.description.is_empty() {
        "No description provided."
    } else {
        &document.description
    };
    let count = document.questions.len();

    format!(
        "# {title}\n\n{description}\n\n{count} question{plural}.\n\n## Files\n\n- `form.json`\n- `response.schema.json`\n\nPreview the form with:\n\n```\nformcraft render --form form.json\n```\n\nFill it out with:\n\n```\nformcraft fill --form form.json\n```\n",
        title = document.title,
        description = description,
        count = count,
        plural = if count == 1 { "" } else { "s" },
    )
}

/// File-system friendly rendition of a title or directory name.
pub fn sanitize_file_name(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "form".into()
    } else {
        cleaned
    }
}
