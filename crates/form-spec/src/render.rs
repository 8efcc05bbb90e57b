use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::cloze;
use crate::response::Answer;
use crate::spec::form::FormDocument;
use crate::spec::question::{QuestionKind, QuestionPayload};

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// One comprehension sub-question prepared for display.
#[derive(Debug, Clone)]
pub struct RenderSubQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
}

/// Archetype-specific content for a rendered question.
#[derive(Debug, Clone)]
pub enum RenderBody {
    Categorize {
        categories: Vec<String>,
        /// Category label mapped to the items currently assigned to it, in
        /// item-list order.
        assigned: BTreeMap<String, Vec<String>>,
        unassigned: Vec<String>,
    },
    Cloze {
        /// Fragments around the markers; blanks sit between consecutive
        /// fragments.
        segments: Vec<String>,
        /// Draft entry per blank, empty when untouched.
        entries: Vec<String>,
    },
    Comprehension {
        passage: String,
        questions: Vec<RenderSubQuestion>,
    },
}

/// Describes a single question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub id: String,
    /// 1-based display position.
    pub ordinal: usize,
    pub title: String,
    pub description: String,
    pub image: String,
    pub kind: QuestionKind,
    pub required: bool,
    pub points: u32,
    pub answered: bool,
    pub body: RenderBody,
}

/// Collected payload used by the text, JSON, and card renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub form_description: String,
    pub header_image: String,
    pub progress: RenderProgress,
    pub questions: Vec<RenderQuestion>,
}

/// Build the renderer payload from the document and the respondent's
/// draft answers. Pass an empty draft for the authored view.
pub fn build_render_payload(
    form: &FormDocument,
    draft: &BTreeMap<String, Answer>,
) -> RenderPayload {
    let questions = form
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = draft.get(&question.id);
            RenderQuestion {
                id: question.id.clone(),
                ordinal: index + 1,
                title: question.title.clone(),
                description: question.description.clone(),
                image: question.image.clone(),
                kind: question.kind(),
                required: question.required,
                points: question.points,
                answered: answer.is_some_and(|answer| !answer.is_empty()),
                body: build_body(&question.payload, answer),
            }
        })
        .collect::<Vec<_>>();

    let answered = questions.iter().filter(|question| question.answered).count();
    let total = questions.len();

    RenderPayload {
        form_id: form.id.clone(),
        form_title: form.title.clone(),
        form_description: form.description.clone(),
        header_image: form.header_image.clone(),
        progress: RenderProgress { answered, total },
        questions,
    }
}

fn build_body(payload: &QuestionPayload, answer: Option<&Answer>) -> RenderBody {
    match payload {
        QuestionPayload::Categorize {
            categories, items, ..
        } => {
            let assignments = match answer {
                Some(Answer::Categorize(assignments)) => assignments.clone(),
                _ => BTreeMap::new(),
            };
            let assigned = categories
                .iter()
                .map(|category| {
                    let members = items
                        .iter()
                        .filter(|item| {
                            assignments
                                .get(*item)
                                .is_some_and(|assigned| assigned == category)
                        })
                        .cloned()
                        .collect::<Vec<_>>();
                    (category.clone(), members)
                })
                .collect::<BTreeMap<_, _>>();
            let unassigned = items
                .iter()
                .filter(|item| !assignments.contains_key(*item))
                .cloned()
                .collect::<Vec<_>>();
            RenderBody::Categorize {
                categories: categories.clone(),
                assigned,
                unassigned,
            }
        }
        QuestionPayload::Cloze { text, blanks } => {
            let entries = match answer {
                Some(Answer::Cloze(entries)) => entries.clone(),
                _ => vec![String::new(); blanks.len()],
            };
            RenderBody::Cloze {
                segments: cloze::split_segments(text)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                entries,
            }
        }
        QuestionPayload::Comprehension { passage, questions } => {
            let selected = match answer {
                Some(Answer::Comprehension(selected)) => selected.clone(),
                _ => BTreeMap::new(),
            };
            RenderBody::Comprehension {
                passage: passage.clone(),
                questions: questions
                    .iter()
                    .map(|sub_question| RenderSubQuestion {
                        id: sub_question.id.clone(),
                        question: sub_question.question.clone(),
                        options: sub_question.options.clone(),
                        selected: selected.get(&sub_question.id).copied(),
                    })
                    .collect(),
            }
        }
    }
}

/// Render the payload as human-friendly text: the respondent's view of the
/// form, questions numbered in document order.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", payload.form_title, payload.form_id));
    if !payload.form_description.is_empty() {
        lines.push(payload.form_description.clone());
    }
    if !payload.header_image.is_empty() {
        lines.push(format!("Header image: {}", payload.header_image));
    }
    lines.push(format!(
        "Progress: {}/{} answered",
        payload.progress.answered, payload.progress.total
    ));

    if payload.questions.is_empty() {
        lines.push("No questions have been added to this form yet.".to_string());
        return lines.join("\n");
    }

    for question in &payload.questions {
        lines.push(String::new());
        let mut heading = format!("{}. {}", question.ordinal, question.title);
        if question.required {
            heading.push_str(" *");
        }
        heading.push_str(&format!(
            " [{} | {}]",
            question.kind,
            points_label(question.points)
        ));
        lines.push(heading);
        if !question.description.is_empty() {
            lines.push(format!("   {}", question.description));
        }
        if !question.image.is_empty() {
            lines.push(format!("   Image: {}", question.image));
        }
        render_body_text(&mut lines, &question.body);
    }

    lines.join("\n")
}

fn render_body_text(lines: &mut Vec<String>, body: &RenderBody) {
    match body {
        RenderBody::Categorize {
            categories,
            assigned,
            unassigned,
        } => {
            for category in categories {
                let members = assigned
                    .get(category)
                    .filter(|members| !members.is_empty())
                    .map(|members| members.join(", "))
                    .unwrap_or_else(|| "(empty)".to_string());
                lines.push(format!("   {}: {}", category, members));
            }
            let pool = if unassigned.is_empty() {
                "all items categorized".to_string()
            } else {
                unassigned.join(", ")
            };
            lines.push(format!("   Unassigned items: {}", pool));
        }
        RenderBody::Cloze { segments, entries } => {
            let mut sentence = String::new();
            for (index, segment) in segments.iter().enumerate() {
                sentence.push_str(segment);
                if index < segments.len() - 1 {
                    let entry = entries.get(index).map(String::as_str).unwrap_or("");
                    if entry.is_empty() {
                        sentence.push_str(&format!("[Blank {}]", index + 1));
                    } else {
                        sentence.push_str(&format!("[{}]", entry));
                    }
                }
            }
            lines.push(format!("   {}", sentence));
        }
        RenderBody::Comprehension { passage, questions } => {
            lines.push(format!("   Passage: {}", passage));
            for (index, sub_question) in questions.iter().enumerate() {
                lines.push(format!("   {}. {}", index + 1, sub_question.question));
                for (option_index, option) in sub_question.options.iter().enumerate() {
                    let mark = if sub_question.selected == Some(option_index) {
                        "(x)"
                    } else {
                        "( )"
                    };
                    lines.push(format!(
                        "      {} {}. {}",
                        mark,
                        option_letter(option_index),
                        option
                    ));
                }
            }
        }
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(question.id.clone()));
            map.insert("ordinal".into(), Value::from(question.ordinal));
            map.insert("title".into(), Value::String(question.title.clone()));
            map.insert(
                "description".into(),
                Value::String(question.description.clone()),
            );
            map.insert("type".into(), Value::String(question.kind.to_string()));
            map.insert("required".into(), Value::Bool(question.required));
            map.insert("points".into(), Value::from(question.points));
            if !question.image.is_empty() {
                map.insert("image".into(), Value::String(question.image.clone()));
            }
            map.insert("answered".into(), Value::Bool(question.answered));
            map.insert("body".into(), body_json(&question.body));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "form_description": payload.form_description,
        "header_image": payload.header_image,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "questions": questions,
    })
}

fn body_json(body: &RenderBody) -> Value {
    match body {
        RenderBody::Categorize {
            categories,
            assigned,
            unassigned,
        } => json!({
            "categories": categories,
            "assigned": assigned,
            "unassigned": unassigned,
        }),
        RenderBody::Cloze { segments, entries } => json!({
            "segments": segments,
            "entries": entries,
        }),
        RenderBody::Comprehension { passage, questions } => {
            let questions = questions
                .iter()
                .map(|sub_question| {
                    json!({
                        "id": sub_question.id,
                        "question": sub_question.question,
                        "options": sub_question.options,
                        "selected": sub_question.selected,
                    })
                })
                .collect::<Vec<_>>();
            json!({
                "passage": passage,
                "questions": questions,
            })
        }
    }
}

/// Render the payload as an Adaptive Card v1.3 transport.
pub fn render_card(payload: &RenderPayload) -> Value {
    let mut body = Vec::new();

    if !payload.header_image.is_empty() {
        body.push(json!({
            "type": "Image",
            "url": payload.header_image,
            "size": "Stretch",
        }));
    }

    body.push(json!({
        "type": "TextBlock",
        "text": payload.form_title,
        "weight": "Bolder",
        "size": "Large",
        "wrap": true,
    }));

    if !payload.form_description.is_empty() {
        body.push(json!({
            "type": "TextBlock",
            "text": payload.form_description,
            "wrap": true,
        }));
    }

    body.push(json!({
        "type": "FactSet",
        "facts": [
            { "title": "Questions", "value": payload.progress.total.to_string() },
            { "title": "Answered", "value": payload.progress.answered.to_string() }
        ]
    }));

    let mut actions = Vec::new();

    if payload.questions.is_empty() {
        body.push(json!({
            "type": "TextBlock",
            "text": "No questions have been added to this form yet.",
            "wrap": true,
        }));
    } else {
        for question in &payload.questions {
            body.push(question_container(question));
        }
        actions.push(json!({
            "type": "Action.Submit",
            "title": "Submit Form",
            "data": {
                "formcraft": {
                    "formId": payload.form_id,
                    "action": "submit"
                }
            }
        }));
    }

    json!({
        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
        "type": "AdaptiveCard",
        "version": "1.3",
        "body": body,
        "actions": actions,
    })
}

fn question_container(question: &RenderQuestion) -> Value {
    let mut items = Vec::new();

    let mut heading = format!("{}. {}", question.ordinal, question.title);
    if question.required {
        heading.push_str(" *");
    }
    items.push(json!({
        "type": "TextBlock",
        "text": heading,
        "weight": "Bolder",
        "wrap": true,
    }));
    if !question.description.is_empty() {
        items.push(json!({
            "type": "TextBlock",
            "text": question.description,
            "wrap": true,
            "spacing": "Small",
        }));
    }
    if !question.image.is_empty() {
        items.push(json!({
            "type": "Image",
            "url": question.image,
            "size": "Stretch",
        }));
    }
    items.push(json!({
        "type": "TextBlock",
        "text": points_label(question.points),
        "isSubtle": true,
        "spacing": "Small",
    }));

    match &question.body {
        RenderBody::Categorize {
            categories,
            unassigned,
            assigned,
        } => {
            let choices = categories
                .iter()
                .map(|category| {
                    json!({
                        "title": category,
                        "value": category,
                    })
                })
                .collect::<Vec<_>>();
            let current = assigned
                .iter()
                .flat_map(|(category, members)| {
                    members
                        .iter()
                        .map(move |item| (item.clone(), category.clone()))
                })
                .collect::<BTreeMap<_, _>>();
            for item in unassigned.iter().chain(current.keys()) {
                let mut input = Map::new();
                input.insert("type".into(), Value::String("Input.ChoiceSet".into()));
                input.insert(
                    "id".into(),
                    Value::String(format!("{}:item:{}", question.id, item)),
                );
                input.insert("style".into(), Value::String("compact".into()));
                input.insert(
                    "placeholder".into(),
                    Value::String(format!("Category for {}", item)),
                );
                input.insert("choices".into(), Value::Array(choices.clone()));
                if let Some(category) = current.get(item) {
                    input.insert("value".into(), Value::String(category.clone()));
                }
                items.push(Value::Object(input));
            }
        }
        RenderBody::Cloze { segments, entries } => {
            items.push(json!({
                "type": "TextBlock",
                "text": segments.join(" ____ "),
                "wrap": true,
            }));
            for (index, entry) in entries.iter().enumerate() {
                let mut input = Map::new();
                input.insert("type".into(), Value::String("Input.Text".into()));
                input.insert(
                    "id".into(),
                    Value::String(format!("{}:blank:{}", question.id, index)),
                );
                input.insert(
                    "placeholder".into(),
                    Value::String(format!("Blank {}", index + 1)),
                );
                if !entry.is_empty() {
                    input.insert("value".into(), Value::String(entry.clone()));
                }
                items.push(Value::Object(input));
            }
        }
        RenderBody::Comprehension { passage, questions } => {
            items.push(json!({
                "type": "TextBlock",
                "text": passage,
                "wrap": true,
            }));
            for sub_question in questions {
                items.push(json!({
                    "type": "TextBlock",
                    "text": sub_question.question,
                    "wrap": true,
                    "spacing": "Small",
                }));
                let choices = sub_question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(option_index, option)| {
                        json!({
                            "title": format!("{}. {}", option_letter(option_index), option),
                            "value": option_index.to_string(),
                        })
                    })
                    .collect::<Vec<_>>();
                let mut input = Map::new();
                input.insert("type".into(), Value::String("Input.ChoiceSet".into()));
                input.insert(
                    "id".into(),
                    Value::String(format!("{}:{}", question.id, sub_question.id)),
                );
                input.insert("style".into(), Value::String("expanded".into()));
                input.insert("choices".into(), Value::Array(choices));
                if let Some(selected) = sub_question.selected {
                    input.insert("value".into(), Value::String(selected.to_string()));
                }
                items.push(Value::Object(input));
            }
        }
    }

    json!({
        "type": "Container",
        "items": items,
        "separator": true,
    })
}

fn points_label(points: u32) -> String {
    if points == 1 {
        "1 point".to_string()
    } else {
        format!("{} points", points)
    }
}

/// Display letter for an option index (`0 -> A`).
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
