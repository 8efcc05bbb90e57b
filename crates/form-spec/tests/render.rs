use std::collections::BTreeMap;

use formcraft_spec::render::{build_render_payload, render_card, render_json_ui, render_text};
use formcraft_spec::response::Answer;
use formcraft_spec::spec::form::FormDocument;
use formcraft_spec::spec::question::{Question, QuestionKind};

fn form_with(questions: Vec<Question>) -> FormDocument {
    FormDocument {
        id: "demo".into(),
        title: "Demo Form".into(),
        description: "Answer carefully.".into(),
        header_image: String::new(),
        questions,
        created_at: "2026-01-01T00:00:00+00:00".into(),
        updated_at: "2026-01-01T00:00:00+00:00".into(),
    }
}

#[test]
fn empty_form_renders_placeholder() {
    let payload = build_render_payload(&form_with(Vec::new()), &BTreeMap::new());
    let text = render_text(&payload);
    assert!(text.contains("Form: Demo Form (demo)"));
    assert!(text.contains("No questions have been added to this form yet."));
}

#[test]
fn questions_are_numbered_in_document_order() {
    let mut first = Question::new("q1", QuestionKind::Cloze);
    first.title = "First".into();
    let mut second = Question::new("q2", QuestionKind::Categorize);
    second.title = "Second".into();
    second.required = true;
    second.points = 5;

    let payload = build_render_payload(&form_with(vec![first, second]), &BTreeMap::new());
    assert_eq!(payload.questions[0].ordinal, 1);
    assert_eq!(payload.questions[1].ordinal, 2);

    let text = render_text(&payload);
    assert!(text.contains("1. First [cloze | 1 point]"));
    assert!(text.contains("2. Second * [categorize | 5 points]"));
}

#[test]
fn cloze_draft_entries_interleave_with_segments() {
    let question = Question::new("q1", QuestionKind::Cloze);
    let mut draft = BTreeMap::new();
    draft.insert(
        "q1".to_string(),
        Answer::Cloze(vec!["fox".into(), String::new()]),
    );

    let payload = build_render_payload(&form_with(vec![question]), &draft);
    assert_eq!(payload.progress.answered, 1);

    let text = render_text(&payload);
    assert!(text.contains("[fox]"));
    assert!(text.contains("[Blank 2]"));
}

#[test]
fn categorize_body_partitions_items() {
    let question = Question::new("q1", QuestionKind::Categorize);
    let mut assignments = BTreeMap::new();
    assignments.insert("Item 2".to_string(), "Category A".to_string());
    let mut draft = BTreeMap::new();
    draft.insert("q1".to_string(), Answer::Categorize(assignments));

    let payload = build_render_payload(&form_with(vec![question]), &draft);
    let text = render_text(&payload);
    assert!(text.contains("Category A: Item 2"));
    assert!(text.contains("Unassigned items: Item 1, Item 3"));
}

#[test]
fn json_ui_labels_question_kinds() {
    let question = Question::new("q1", QuestionKind::Comprehension);
    let payload = build_render_payload(&form_with(vec![question]), &BTreeMap::new());
    let ui = render_json_ui(&payload);
    assert_eq!(ui["questions"][0]["type"], "comprehension");
    assert_eq!(ui["questions"][0]["ordinal"], 1);
    assert_eq!(ui["progress"]["total"], 1);
    assert_eq!(ui["progress"]["answered"], 0);
}

#[test]
fn card_includes_inputs_and_submit_action() {
    let payload = build_render_payload(
        &form_with(vec![Question::new("q1", QuestionKind::Cloze)]),
        &BTreeMap::new(),
    );
    let card = render_card(&payload);
    assert_eq!(card["type"], "AdaptiveCard");
    assert_eq!(card["version"], "1.3");
    assert_eq!(card["actions"][0]["type"], "Action.Submit");

    let containers = card["body"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|block| block["type"] == "Container")
        .count();
    assert_eq!(containers, 1);
}

#[test]
fn card_for_empty_form_has_no_actions() {
    let payload = build_render_payload(&form_with(Vec::new()), &BTreeMap::new());
    let card = render_card(&payload);
    assert!(card["actions"].as_array().unwrap().is_empty());
}
