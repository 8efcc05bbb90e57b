use serde_json::{Map, Value, json};

use crate::spec::form::FormDocument;
use crate::spec::question::{Question, QuestionPayload};

/// Build a JSON schema describing the response set expected for `form`.
///
/// Each property keys a question id; its schema follows the archetype's
/// answer shape. Required questions land in the `required` list.
pub fn generate(form: &FormDocument) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in &form.questions {
        properties.insert(question.id.clone(), question_schema(question));
        if question.required {
            required.push(Value::String(question.id.clone()));
        }
    }

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": format!("{} responses", form.title),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn question_schema(question: &Question) -> Value {
    match &question.payload {
        QuestionPayload::Categorize {
            categories, items, ..
        } => {
            let mut properties = Map::new();
            for item in items {
                properties.insert(
                    item.clone(),
                    json!({
                        "type": "string",
                        "enum": categories,
                    }),
                );
            }
            json!({
                "type": "object",
                "description": "item label mapped to category label",
                "properties": properties,
                "additionalProperties": false,
            })
        }
        QuestionPayload::Cloze { blanks, .. } => json!({
            "type": "array",
            "items": { "type": "string" },
            "minItems": blanks.len(),
            "maxItems": blanks.len(),
        }),
        QuestionPayload::Comprehension { questions, .. } => {
            let mut properties = Map::new();
            for sub_question in questions {
                properties.insert(
                    sub_question.id.clone(),
                    json!({
                        "type": "integer",
                        "minimum": 0,
                        "maximum": sub_question.options.len().saturating_sub(1),
                    }),
                );
            }
            json!({
                "type": "object",
                "description": "sub-question id mapped to selected option index",
                "properties": properties,
                "additionalProperties": false,
            })
        }
    }
}
