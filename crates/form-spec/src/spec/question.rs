use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The three question archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Categorize,
    Cloze,
    Comprehension,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Categorize => write!(f, "categorize"),
            QuestionKind::Cloze => write!(f, "cloze"),
            QuestionKind::Comprehension => write!(f, "comprehension"),
        }
    }
}

impl std::str::FromStr for QuestionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "categorize" => Ok(QuestionKind::Categorize),
            "cloze" => Ok(QuestionKind::Cloze),
            "comprehension" => Ok(QuestionKind::Comprehension),
            _ => Err(format!("unknown question type '{}'", value)),
        }
    }
}

/// A single sub-question attached to a comprehension passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionQuestion {
    pub id: String,
    pub question: String,
    /// Four options by construction.
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
}

impl ComprehensionQuestion {
    /// Fresh sub-question seeded with four placeholder options.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: String::new(),
            options: vec![
                "Option A".into(),
                "Option B".into(),
                "Option C".into(),
                "Option D".into(),
            ],
            correct_answer: 0,
        }
    }
}

/// Archetype-specific payload. The `type` tag keeps impossible states
/// unrepresentable: a cloze question cannot carry a passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionPayload {
    Categorize {
        categories: Vec<String>,
        items: Vec<String>,
        /// Authored answer key. Initialized empty and never written by the
        /// editor; respondent assignments live in preview state instead.
        #[serde(default)]
        answers: BTreeMap<String, String>,
    },
    Cloze {
        /// Free text with `___` marking each fill-in position.
        text: String,
        /// One correct answer per marker, index-aligned.
        blanks: Vec<String>,
    },
    Comprehension {
        passage: String,
        questions: Vec<ComprehensionQuestion>,
    },
}

impl QuestionPayload {
    /// Seed payload for a freshly added question of the given archetype.
    pub fn seed(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Categorize => QuestionPayload::Categorize {
                categories: vec!["Category A".into(), "Category B".into()],
                items: vec!["Item 1".into(), "Item 2".into(), "Item 3".into()],
                answers: BTreeMap::new(),
            },
            QuestionKind::Cloze => QuestionPayload::Cloze {
                text: "The quick brown ___ jumps over the lazy ___.".into(),
                blanks: vec!["fox".into(), "dog".into()],
            },
            QuestionKind::Comprehension => QuestionPayload::Comprehension {
                passage: "Enter your comprehension passage here...".into(),
                questions: vec![ComprehensionQuestion {
                    id: "1".into(),
                    question: "Sample question?".into(),
                    options: vec![
                        "Option A".into(),
                        "Option B".into(),
                        "Option C".into(),
                        "Option D".into(),
                    ],
                    correct_answer: 0,
                }],
            },
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionPayload::Categorize { .. } => QuestionKind::Categorize,
            QuestionPayload::Cloze { .. } => QuestionKind::Cloze,
            QuestionPayload::Comprehension { .. } => QuestionKind::Comprehension,
        }
    }
}

/// A question in the document: common chrome plus the archetype payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Illustration image URL, empty when unset.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(flatten)]
    pub payload: QuestionPayload,
}

fn default_points() -> u32 {
    1
}

impl Question {
    /// New question with the common defaults and the archetype seed
    /// payload.
    pub fn new(id: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            title: "New Question".into(),
            description: String::new(),
            image: String::new(),
            required: false,
            points: 1,
            payload: QuestionPayload::seed(kind),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.payload.kind()
    }
}

/// Partial update for a question. Common fields merge individually;
/// `payload` replaces the archetype data wholesale when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<QuestionPayload>,
}
