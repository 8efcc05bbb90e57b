use formcraft_engine::{
    AcknowledgeSink, CategorizeSession, ComprehensionSession, FormController, PreviewSession,
    SubmissionSink,
};
use formcraft_spec::response::Answer;
use formcraft_spec::spec::question::QuestionKind;

fn fruit_items() -> Vec<String> {
    vec!["Apple".to_string(), "Carrot".to_string()]
}

#[test]
fn drag_and_drop_assigns_items() {
    let items = fruit_items();
    let mut session = CategorizeSession::new();

    session.start_drag("Apple");
    session.drop_on("Fruit");

    assert_eq!(session.items_in_category(&items, "Fruit"), vec!["Apple"]);
    assert_eq!(session.unassigned_items(&items), vec!["Carrot"]);
    assert!(session.dragged().is_none());
}

#[test]
fn drop_without_an_active_drag_changes_nothing() {
    let items = fruit_items();
    let mut session = CategorizeSession::new();
    session.drop_on("Fruit");
    assert_eq!(session.unassigned_items(&items), vec!["Apple", "Carrot"]);
}

#[test]
fn cancelled_drag_leaves_assignments_untouched() {
    let items = fruit_items();
    let mut session = CategorizeSession::new();

    session.start_drag("Apple");
    session.cancel_drag();
    session.drop_on("Fruit");

    assert!(session.assignments().is_empty());
    assert_eq!(session.unassigned_items(&items), vec!["Apple", "Carrot"]);
}

#[test]
fn remove_returns_an_item_to_the_pool() {
    let items = fruit_items();
    let mut session = CategorizeSession::new();
    session.start_drag("Apple");
    session.drop_on("Fruit");

    session.remove("Apple");

    assert!(session.items_in_category(&items, "Fruit").is_empty());
    assert_eq!(session.unassigned_items(&items), vec!["Apple", "Carrot"]);
}

#[test]
fn pool_and_categories_partition_the_items() {
    let items = fruit_items();
    let categories = ["Fruit", "Veg"];
    let mut session = CategorizeSession::new();

    // a churny sequence: assign, reassign, unassign, dangling drag
    session.start_drag("Apple");
    session.drop_on("Fruit");
    session.start_drag("Carrot");
    session.drop_on("Veg");
    session.start_drag("Apple");
    session.drop_on("Veg");
    session.remove("Carrot");
    session.start_drag("Carrot");
    session.cancel_drag();

    let mut seen: Vec<&str> = session.unassigned_items(&items);
    for category in categories {
        seen.extend(session.items_in_category(&items, category));
    }
    seen.sort();
    let mut expected: Vec<&str> = items.iter().map(String::as_str).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn selecting_a_new_option_replaces_the_prior_one() {
    let mut session = ComprehensionSession::new();
    session.select("1", 0);
    session.select("1", 2);

    assert_eq!(session.selected("1"), Some(2));
    match session.answer() {
        Answer::Comprehension(selected) => assert_eq!(selected.len(), 1),
        other => panic!("unexpected answer: {:?}", other),
    }
}

#[test]
fn preview_session_collects_an_answer_per_question() {
    let mut controller = FormController::new("demo");
    let categorize_id = controller.add_question(QuestionKind::Categorize);
    let cloze_id = controller.add_question(QuestionKind::Cloze);

    let mut session = PreviewSession::for_form(controller.document());
    if let Some(state) = session.categorize_mut(&categorize_id) {
        state.start_drag("Item 1");
        state.drop_on("Category A");
    }
    if let Some(state) = session.cloze_mut(&cloze_id) {
        state.set_entry(0, "fox");
    }

    let responses = session.collect();
    assert_eq!(responses.form_id, "demo");
    assert_eq!(responses.answers.len(), 2);
    assert!(matches!(
        responses.answers.get(&cloze_id),
        Some(Answer::Cloze(entries)) if entries[0] == "fox"
    ));
}

#[test]
fn cloze_session_ignores_out_of_range_entries() {
    let mut controller = FormController::new("demo");
    let id = controller.add_question(QuestionKind::Cloze);
    let mut session = PreviewSession::for_form(controller.document());

    if let Some(state) = session.cloze_mut(&id) {
        state.set_entry(7, "nope");
        assert_eq!(state.entries().len(), 2);
        assert!(state.entries().iter().all(String::is_empty));
    }
}

#[test]
fn acknowledge_sink_reports_touched_questions() {
    let mut controller = FormController::new("demo");
    controller.add_question(QuestionKind::Categorize);
    let cloze_id = controller.add_question(QuestionKind::Cloze);

    let mut session = PreviewSession::for_form(controller.document());
    if let Some(state) = session.cloze_mut(&cloze_id) {
        state.set_entry(0, "fox");
    }

    let receipt = session
        .submit(&AcknowledgeSink)
        .expect("submission succeeds");
    assert_eq!(receipt.form_id, "demo");
    assert_eq!(receipt.answered, 1);
    assert!(receipt.encoded_bytes > 0);
    assert_eq!(receipt.message, "Form submitted successfully!");
}

#[test]
fn sink_accepts_a_collected_response_set_directly() {
    let controller = FormController::new("demo");
    let session = PreviewSession::for_form(controller.document());
    let receipt = AcknowledgeSink
        .submit(&session.collect())
        .expect("submission succeeds");
    assert_eq!(receipt.answered, 0);
}
