use serde_json::json;

use formcraft_spec::response::Answer;
use formcraft_spec::response_schema;
use formcraft_spec::spec::form::FormDocument;
use formcraft_spec::spec::question::{Question, QuestionKind, QuestionPayload};

fn sample_form(questions: Vec<Question>) -> FormDocument {
    FormDocument {
        id: "demo".into(),
        title: "Demo Form".into(),
        description: String::new(),
        header_image: String::new(),
        questions,
        created_at: "2026-01-01T00:00:00+00:00".into(),
        updated_at: "2026-01-01T00:00:00+00:00".into(),
    }
}

#[test]
fn question_serializes_with_flattened_type_tag() {
    let question = Question::new("q1", QuestionKind::Cloze);
    let value = serde_json::to_value(&question).unwrap();
    assert_eq!(value["type"], "cloze");
    assert_eq!(value["text"], "The quick brown ___ jumps over the lazy ___.");
    assert_eq!(value["blanks"], json!(["fox", "dog"]));
    assert_eq!(value["points"], 1);
    assert_eq!(value["required"], false);
}

#[test]
fn comprehension_seed_uses_camel_case_keys() {
    let question = Question::new("q1", QuestionKind::Comprehension);
    let value = serde_json::to_value(&question).unwrap();
    assert_eq!(value["questions"][0]["correctAnswer"], 0);
    assert_eq!(
        value["questions"][0]["options"].as_array().unwrap().len(),
        4
    );
}

#[test]
fn categorize_seed_has_two_categories_and_three_items() {
    match Question::new("q1", QuestionKind::Categorize).payload {
        QuestionPayload::Categorize {
            categories,
            items,
            answers,
        } => {
            assert_eq!(categories, vec!["Category A", "Category B"]);
            assert_eq!(items, vec!["Item 1", "Item 2", "Item 3"]);
            assert!(answers.is_empty());
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn document_round_trips_through_json() {
    let form = sample_form(vec![
        Question::new("q1", QuestionKind::Categorize),
        Question::new("q2", QuestionKind::Cloze),
    ]);
    let value = serde_json::to_value(&form).unwrap();
    assert!(value.get("headerImage").is_some());
    assert!(value.get("createdAt").is_some());
    let back: FormDocument = serde_json::from_value(value).unwrap();
    assert_eq!(back, form);
}

#[test]
fn answers_deserialize_by_shape() {
    let categorize: Answer = serde_json::from_value(json!({"Apple": "Fruit"})).unwrap();
    assert!(matches!(categorize, Answer::Categorize(_)));

    let cloze: Answer = serde_json::from_value(json!(["fox", ""])).unwrap();
    assert!(matches!(cloze, Answer::Cloze(_)));

    let comprehension: Answer = serde_json::from_value(json!({"1": 2})).unwrap();
    assert!(matches!(comprehension, Answer::Comprehension(_)));
}

#[test]
fn empty_answers_report_empty() {
    assert!(Answer::Cloze(vec![String::new(), String::new()]).is_empty());
    assert!(!Answer::Cloze(vec!["fox".into(), String::new()]).is_empty());
    assert!(Answer::Categorize(Default::default()).is_empty());
}

#[test]
fn response_schema_lists_required_questions() {
    let mut required = Question::new("q1", QuestionKind::Cloze);
    required.required = true;
    let optional = Question::new("q2", QuestionKind::Comprehension);
    let form = sample_form(vec![required, optional]);

    let schema = response_schema::generate(&form);
    let props = schema.get("properties").unwrap().as_object().unwrap();
    assert!(props.contains_key("q1"));
    assert!(props.contains_key("q2"));
    let required = schema.get("required").unwrap().as_array().unwrap();
    assert!(required.iter().any(|value| value.as_str() == Some("q1")));
    assert!(!required.iter().any(|value| value.as_str() == Some("q2")));

    // cloze answers are a fixed-length string array
    assert_eq!(props["q1"]["minItems"], 2);
    assert_eq!(props["q1"]["maxItems"], 2);
}
