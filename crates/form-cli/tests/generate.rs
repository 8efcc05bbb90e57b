use assert_cmd::Command;
use assert_fs::prelude::*;

fn formcraft() -> Command {
    Command::cargo_bin("formcraft").expect("binary builds")
}

const INPUT_JSON: &str = r#"{
  "dir_name": "demo",
  "form": { "title": "Demo Form", "description": "A little demo" },
  "questions": [
    { "type": "cloze", "title": "Finish the sentence", "text": "A ___ jumps over ___ dog.", "blanks": ["fox", "the"] },
    { "type": "categorize", "title": "Sort the produce", "categories": ["Fruit", "Veg"], "items": ["Apple", "Carrot"], "required": true },
    { "type": "comprehension", "title": "Read and answer", "passage": "Foxes are quick.", "questions": [ { "question": "Are foxes quick?", "correct_answer": 0 } ] }
  ]
}"#;

#[test]
fn generate_writes_bundle_artifacts() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input.json");
    input.write_str(INPUT_JSON).unwrap();

    formcraft()
        .arg("generate")
        .arg("--input")
        .arg(input.path())
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success();

    let form: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("demo/form.json")).unwrap())
            .unwrap();
    assert_eq!(form["title"], "Demo Form");
    assert_eq!(form["description"], "A little demo");

    let questions = form["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["type"], "cloze");
    assert_eq!(questions[0]["blanks"].as_array().unwrap().len(), 2);
    assert_eq!(questions[1]["required"], true);
    assert_eq!(
        questions[2]["questions"][0]["options"]
            .as_array()
            .unwrap()
            .len(),
        4
    );

    let schema: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join("demo/response.schema.json")).unwrap(),
    )
    .unwrap();
    let categorize_id = questions[1]["id"].as_str().unwrap();
    assert!(schema["properties"].get(categorize_id).is_some());
    assert_eq!(schema["required"][0], categorize_id);

    assert!(temp.path().join("demo/README.md").exists());
    temp.close().unwrap();
}

#[test]
fn generate_rejects_mismatched_blank_answers() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input.json");
    input
        .write_str(
            r#"{
  "dir_name": "broken",
  "form": { "title": "Broken" },
  "questions": [
    { "type": "cloze", "title": "Off by one", "text": "A ___ and a ___.", "blanks": ["fox"] }
  ]
}"#,
        )
        .unwrap();

    formcraft()
        .arg("generate")
        .arg("--input")
        .arg(input.path())
        .arg("--out")
        .arg(temp.path())
        .assert()
        .failure();

    assert!(!temp.path().join("broken").exists());
    temp.close().unwrap();
}

#[test]
fn generate_refuses_to_overwrite_without_force() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("input.json");
    input.write_str(INPUT_JSON).unwrap();

    formcraft()
        .arg("generate")
        .arg("--input")
        .arg(input.path())
        .arg("--out")
        .arg(temp.path())
        .assert()
        .success();

    formcraft()
        .arg("generate")
        .arg("--input")
        .arg(input.path())
        .arg("--out")
        .arg(temp.path())
        .assert()
        .failure();

    formcraft()
        .arg("generate")
        .arg("--input")
        .arg(input.path())
        .arg("--out")
        .arg(temp.path())
        .arg("--force")
        .assert()
        .success();

    temp.close().unwrap();
}
