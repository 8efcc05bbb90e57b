use formcraft_spec::cloze::{blank_count, derive_blanks, split_segments};

#[test]
fn counts_markers() {
    assert_eq!(blank_count(""), 0);
    assert_eq!(blank_count("no markers here"), 0);
    assert_eq!(blank_count("a ___ b ___ c"), 2);
}

#[test]
fn four_underscores_count_as_one_marker() {
    assert_eq!(blank_count("x ____ y"), 1);
}

#[test]
fn grows_with_new_trailing_markers() {
    let blanks = vec!["fox".to_string()];
    let derived = derive_blanks(&blanks, "A ___ and a ___.");
    assert_eq!(derived, vec!["fox".to_string(), String::new()]);
}

#[test]
fn shrinks_from_the_end() {
    let blanks = vec!["fox".to_string(), "dog".to_string()];
    let derived = derive_blanks(&blanks, "A ___ jumps.");
    assert_eq!(derived, vec!["fox".to_string()]);
}

#[test]
fn resize_is_positional_not_content_aware() {
    // a marker inserted mid-text does not shift existing answers with it
    let blanks = vec!["fox".to_string(), "dog".to_string()];
    let derived = derive_blanks(&blanks, "___ then ___ then ___");
    assert_eq!(
        derived,
        vec!["fox".to_string(), "dog".to_string(), String::new()]
    );
}

#[test]
fn invariant_holds_across_a_sequence_of_edits() {
    let texts = [
        "The quick brown ___ jumps over the lazy ___.",
        "No blanks at all.",
        "___",
        "one ___ two ___ three ___",
        "",
    ];
    let mut blanks: Vec<String> = vec!["fox".into(), "dog".into()];
    for text in texts {
        blanks = derive_blanks(&blanks, text);
        assert_eq!(blanks.len(), blank_count(text));
    }
}

#[test]
fn splits_text_into_segments_around_markers() {
    assert_eq!(
        split_segments("A ___ jumps over ___ dog."),
        vec!["A ", " jumps over ", " dog."]
    );
    assert_eq!(split_segments("plain"), vec!["plain"]);
}
