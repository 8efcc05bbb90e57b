use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::Question;

/// Top-level form document: metadata plus the ordered question list.
///
/// Question order defines display numbering and is only ever changed by
/// appending or filtering; there is no reorder operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Header image URL, empty when unset.
    #[serde(default)]
    pub header_image: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update for the form-level fields. `None` leaves a field as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}
