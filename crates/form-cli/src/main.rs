pub mod builder;

mod wizard;

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use builder::{GenerationInput, build_document, sanitize_file_name, write_bundle};
use clap::{Parser, Subcommand, ValueEnum};
use formcraft_engine::{
    AcknowledgeSink, CategorizeEdit, ClozeEdit, ComprehensionEdit, EditOp, FormController,
    ImageStore, PreviewSession, StockPhotoStore, SubmissionSink, ViewMode,
};
use formcraft_spec::cloze;
use formcraft_spec::render::{
    build_render_payload, option_letter, render_card, render_json_ui, render_text,
};
use formcraft_spec::spec::form::{FormDocument, FormPatch};
use formcraft_spec::spec::question::{
    ComprehensionQuestion, QuestionKind, QuestionPatch, QuestionPayload,
};
use wizard::{AnswerParseError, FillPresenter, Verbosity};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Form builder and preview CLI",
    long_about = "Author quiz-style forms from the terminal, preview them, and collect a respondent's answers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Card,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive form builder that writes a bundle of artifacts.
    New {
        /// Root directory where the bundle will be emitted (defaults to FORMCRAFT_OUTPUT_DIR or the current working directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite an existing bundle if present.
        #[arg(long)]
        force: bool,
        /// Show the final document state for debugging.
        #[arg(long)]
        verbose: bool,
    },
    /// Non-interactive builder that consumes a JSON description and emits the bundle.
    Generate {
        /// JSON file describing the form metadata + questions.
        #[arg(long, value_name = "INPUT")]
        input: PathBuf,
        /// Root directory where the bundle will be emitted.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite an existing bundle if present.
        #[arg(long)]
        force: bool,
        /// Show the final document state for debugging.
        #[arg(long)]
        verbose: bool,
    },
    /// Display a form the way a respondent will see it.
    Render {
        /// Path to the form document JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Render output mode.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Fill out a form interactively and submit the responses.
    Fill {
        /// Path to the form document JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Also emit response JSON for debugging.
        #[arg(long)]
        responses_json: bool,
        /// Show verbose output (header image, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::New {
            out,
            force,
            verbose,
        } => run_new(out, force, verbose),
        Command::Generate {
            input,
            out,
            force,
            verbose,
        } => run_generate(input, out, force, verbose),
        Command::Render { form, format } => run_render(form, format),
        Command::Fill {
            form,
            responses_json,
            verbose,
        } => run_fill(form, responses_json, verbose),
    }
}

fn run_new(out_dir: Option<PathBuf>, force: bool, verbose: bool) -> CliResult<()> {
    println!("Interactive form builder");
    let title = prompt_non_empty("Form title (required)", Some("Untitled Form"))?;
    let description = prompt_optional("Description (optional)")?;
    let header_image = prompt_image("Header image file (optional)")?;
    let dir_name = prompt_non_empty(
        "Output directory name (required)",
        Some(&sanitize_file_name(&title)),
    )?;
    let out_root = resolve_output_root(out_dir)?;

    let mut controller = FormController::new(sanitize_file_name(&title));
    controller.update_form(FormPatch {
        title: Some(title),
        description,
        header_image,
        questions: None,
    });

    loop {
        let Some(kind) = prompt_question_kind()? else {
            break;
        };
        let id = controller.add_question(kind);

        let question_title = prompt_non_empty("Question title (required)", Some("New Question"))?;
        let question_description = prompt_optional("Question description (optional)")?;
        let image = prompt_image("Question image file (optional)")?;
        let required = prompt_bool("Required?", false)?;
        let points = prompt_points("Points", 1)?;
        controller.update_question(
            &id,
            QuestionPatch {
                title: Some(question_title),
                description: question_description,
                image,
                required: Some(required),
                points: Some(points),
                payload: None,
            },
        );

        match kind {
            QuestionKind::Categorize => prompt_categorize(&mut controller, &id)?,
            QuestionKind::Cloze => prompt_cloze(&mut controller, &id)?,
            QuestionKind::Comprehension => prompt_comprehension(&mut controller, &id)?,
        }
    }

    if prompt_bool("Preview before writing?", true)? {
        controller.set_view(ViewMode::Preview);
        let draft = BTreeMap::new();
        println!(
            "{}",
            render_text(&build_render_payload(controller.document(), &draft))
        );
        controller.toggle_view();
    }

    let document = controller.into_document();
    let bundle_dir = out_root.join(&dir_name);
    ensure_bundle_slot(&bundle_dir, force)?;
    let bundle_dir = write_bundle(&document, &dir_name, &out_root)?;
    println!("Wrote form bundle at {}", bundle_dir.display());
    if verbose {
        println!("Document state:");
        println!("{}", serde_json::to_string_pretty(&document)?);
    }
    Ok(())
}

fn prompt_categorize(controller: &mut FormController, id: &str) -> CliResult<()> {
    println!("Categories and items start from the seeded lists; enter new ones to replace them.");
    let categories = prompt_list("Category (blank to finish)")?;
    let items = prompt_list("Item to categorize (blank to finish)")?;
    replace_categorize_lists(controller, id, categories, items);
    Ok(())
}

fn replace_categorize_lists(
    controller: &mut FormController,
    id: &str,
    categories: Vec<String>,
    items: Vec<String>,
) {
    let (mut category_count, mut item_count) = categorize_shape(controller.document(), id);
    if !categories.is_empty() {
        while category_count > 0 {
            controller.apply_edit(
                id,
                EditOp::Categorize(CategorizeEdit::RemoveCategory {
                    index: category_count - 1,
                }),
            );
            category_count -= 1;
        }
        for (index, value) in categories.into_iter().enumerate() {
            controller.apply_edit(id, EditOp::Categorize(CategorizeEdit::AddCategory));
            controller.apply_edit(
                id,
                EditOp::Categorize(CategorizeEdit::UpdateCategory { index, value }),
            );
        }
    }
    if !items.is_empty() {
        while item_count > 0 {
            controller.apply_edit(
                id,
                EditOp::Categorize(CategorizeEdit::RemoveItem {
                    index: item_count - 1,
                }),
            );
            item_count -= 1;
        }
        for (index, value) in items.into_iter().enumerate() {
            controller.apply_edit(id, EditOp::Categorize(CategorizeEdit::AddItem));
            controller.apply_edit(
                id,
                EditOp::Categorize(CategorizeEdit::UpdateItem { index, value }),
            );
        }
    }
}

fn categorize_shape(document: &FormDocument, id: &str) -> (usize, usize) {
    document
        .questions
        .iter()
        .find(|question| question.id == id)
        .and_then(|question| match &question.payload {
            QuestionPayload::Categorize {
                categories, items, ..
            } => Some((categories.len(), items.len())),
            _ => None,
        })
        .unwrap_or((0, 0))
}

fn prompt_cloze(controller: &mut FormController, id: &str) -> CliResult<()> {
    println!("Use three underscores (___) to mark blanks that respondents fill in.");
    let text = prompt_non_empty(
        "Cloze text (required)",
        Some("The quick brown ___ jumps over the lazy ___."),
    )?;
    let count = cloze::blank_count(&text);
    controller.apply_edit(id, EditOp::Cloze(ClozeEdit::SetText { text }));

    if count == 0 {
        println!("No blanks found; the text renders as plain text.");
        return Ok(());
    }
    println!(
        "Found {} blank{}.",
        count,
        if count == 1 { "" } else { "s" }
    );
    for index in 0..count {
        let value = prompt_line(&format!("Correct answer for blank {}", index + 1), None)?;
        if !value.is_empty() {
            controller.apply_edit(id, EditOp::Cloze(ClozeEdit::SetBlank { index, value }));
        }
    }
    Ok(())
}

fn prompt_comprehension(controller: &mut FormController, id: &str) -> CliResult<()> {
    let passage = prompt_non_empty("Reading passage (required)", None)?;
    controller.apply_edit(
        id,
        EditOp::Comprehension(ComprehensionEdit::SetPassage { passage }),
    );
    // drop the seeded sample; sub-questions come from the prompts below
    controller.apply_edit(
        id,
        EditOp::Comprehension(ComprehensionEdit::RemoveQuestion { index: 0 }),
    );

    let mut index = 0;
    loop {
        let Some(prompt_text) =
            prompt_optional(&format!("Sub-question {} (blank to finish)", index + 1))?
        else {
            break;
        };
        controller.apply_edit(id, EditOp::Comprehension(ComprehensionEdit::AddQuestion));
        controller.apply_edit(
            id,
            EditOp::Comprehension(ComprehensionEdit::SetPrompt {
                index,
                value: prompt_text,
            }),
        );
        for option in 0..4 {
            let label = option_letter(option);
            let value = prompt_non_empty(
                &format!("Option {} (required)", label),
                Some(&format!("Option {}", label)),
            )?;
            controller.apply_edit(
                id,
                EditOp::Comprehension(ComprehensionEdit::SetOption {
                    question: index,
                    option,
                    value,
                }),
            );
        }
        let correct = prompt_correct_option()?;
        controller.apply_edit(
            id,
            EditOp::Comprehension(ComprehensionEdit::SetCorrect {
                question: index,
                option: correct,
            }),
        );
        index += 1;
    }
    if index == 0 {
        println!("No sub-questions added; the passage stands alone.");
    }
    Ok(())
}

fn prompt_correct_option() -> CliResult<usize> {
    loop {
        let raw = prompt_line("Correct option (A-D)", Some("A"))?;
        match parse_option_letter(raw.trim(), 4) {
            Ok(option) => return Ok(option),
            Err(err) => println!("{}", err.user_message),
        }
    }
}

fn run_generate(
    input_path: PathBuf,
    out_dir: Option<PathBuf>,
    force: bool,
    verbose: bool,
) -> CliResult<()> {
    let contents = fs::read_to_string(&input_path)?;
    let input: GenerationInput = serde_json::from_str(&contents)?;
    let out_root = resolve_output_root(out_dir)?;
    let bundle_dir = out_root.join(&input.dir_name);
    ensure_bundle_slot(&bundle_dir, force)?;

    let document = build_document(&input)?;
    let bundle_dir = write_bundle(&document, &input.dir_name, &out_root)?;
    println!("Wrote form bundle at {}", bundle_dir.display());
    if verbose {
        println!("Document state:");
        println!("{}", serde_json::to_string_pretty(&document)?);
    }
    Ok(())
}

fn run_render(form_path: PathBuf, format: RenderMode) -> CliResult<()> {
    let document = load_document(&form_path)?;
    let draft = BTreeMap::new();
    let payload = build_render_payload(&document, &draft);
    match format {
        RenderMode::Text => println!("{}", render_text(&payload)),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?),
        RenderMode::Card => println!("{}", serde_json::to_string_pretty(&render_card(&payload))?),
    }
    Ok(())
}

fn run_fill(form_path: PathBuf, responses_json: bool, verbose: bool) -> CliResult<()> {
    let document = load_document(&form_path)?;
    let mut session = PreviewSession::for_form(&document);
    let mut presenter = FillPresenter::new(Verbosity::from_verbose(verbose), responses_json);

    let payload = build_render_payload(&document, &session.draft());
    presenter.show_header(&payload);
    if payload.questions.is_empty() {
        println!("No questions have been added to this form yet.");
    }

    let total = document.questions.len();
    for (index, question) in document.questions.iter().enumerate() {
        let payload = build_render_payload(&document, &session.draft());
        presenter.show_question(&payload.questions[index], total);
        match &question.payload {
            QuestionPayload::Categorize {
                categories, items, ..
            } => fill_categorize(&mut session, &question.id, categories, items, &presenter)?,
            QuestionPayload::Cloze { text, blanks } => {
                fill_cloze(&mut session, &question.id, text, blanks.len())?
            }
            QuestionPayload::Comprehension { passage, questions } => {
                fill_comprehension(&mut session, &question.id, passage, questions, &presenter)?
            }
        }
    }

    let responses = session.collect();
    let receipt = AcknowledgeSink.submit(&responses)?;
    presenter.show_completion(&receipt, &responses);
    Ok(())
}

enum MoveCommand {
    Assign { item: String, category: String },
    Unassign { item: String },
}

fn fill_categorize(
    session: &mut PreviewSession,
    id: &str,
    categories: &[String],
    items: &[String],
    presenter: &FillPresenter,
) -> CliResult<()> {
    println!(
        "Drag items into categories: \"<item> -> <category>\"; \"-<item>\" returns one to the pool; blank when done."
    );
    loop {
        if let Some(state) = session.categorize(id) {
            for category in categories {
                let assigned = state.items_in_category(items, category);
                let members = if assigned.is_empty() {
                    "(empty)".to_string()
                } else {
                    assigned.join(", ")
                };
                println!("  {}: {}", category, members);
            }
            let pool = state.unassigned_items(items);
            let pool = if pool.is_empty() {
                "all items categorized".to_string()
            } else {
                pool.join(", ")
            };
            println!("  Unassigned: {}", pool);
        }

        let line = prompt_line("Move", None)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("fill aborted by user".into());
        }
        match parse_move(trimmed, items, categories) {
            Ok(MoveCommand::Assign { item, category }) => {
                if let Some(state) = session.categorize_mut(id) {
                    state.start_drag(item);
                    state.drop_on(&category);
                }
            }
            Ok(MoveCommand::Unassign { item }) => {
                if let Some(state) = session.categorize_mut(id) {
                    state.remove(&item);
                }
            }
            Err(err) => presenter.show_parse_error(&err),
        }
    }
    Ok(())
}

fn parse_move(
    raw: &str,
    items: &[String],
    categories: &[String],
) -> Result<MoveCommand, AnswerParseError> {
    if let Some(item) = raw.strip_prefix('-') {
        let item = item.trim();
        return match find_label(items, item) {
            Some(found) => Ok(MoveCommand::Unassign { item: found }),
            None => Err(AnswerParseError::new(
                format!("Unknown item '{}'.", item),
                Some(format!("items: {}", items.join(", "))),
            )),
        };
    }

    let Some((item, category)) = raw.split_once("->") else {
        return Err(AnswerParseError::new(
            "Use \"<item> -> <category>\" to assign an item.",
            None,
        ));
    };
    let item = item.trim();
    let category = category.trim();
    let Some(item) = find_label(items, item) else {
        return Err(AnswerParseError::new(
            format!("Unknown item '{}'.", item),
            Some(format!("items: {}", items.join(", "))),
        ));
    };
    let Some(category) = find_label(categories, category) else {
        return Err(AnswerParseError::new(
            format!("Unknown category '{}'.", category),
            Some(format!("categories: {}", categories.join(", "))),
        ));
    };
    Ok(MoveCommand::Assign { item, category })
}

fn find_label(labels: &[String], raw: &str) -> Option<String> {
    labels
        .iter()
        .find(|label| label.eq_ignore_ascii_case(raw))
        .cloned()
}

fn fill_cloze(
    session: &mut PreviewSession,
    id: &str,
    text: &str,
    blank_total: usize,
) -> CliResult<()> {
    let segments = cloze::split_segments(text);
    let mut sentence = String::new();
    for (index, segment) in segments.iter().enumerate() {
        sentence.push_str(segment);
        if index < segments.len() - 1 {
            sentence.push_str(&format!("[Blank {}]", index + 1));
        }
    }
    println!("{}", sentence);

    if blank_total == 0 {
        println!("Nothing to fill in.");
        return Ok(());
    }
    for index in 0..blank_total {
        let value = prompt_line(&format!("Blank {}", index + 1), None)?;
        if value.trim().eq_ignore_ascii_case("exit") {
            return Err("fill aborted by user".into());
        }
        if let Some(state) = session.cloze_mut(id) {
            state.set_entry(index, value);
        }
    }
    Ok(())
}

fn fill_comprehension(
    session: &mut PreviewSession,
    id: &str,
    passage: &str,
    questions: &[ComprehensionQuestion],
    presenter: &FillPresenter,
) -> CliResult<()> {
    println!("Reading passage:");
    println!("{}", passage);
    for (index, sub_question) in questions.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, sub_question.question);
        for (option_index, option) in sub_question.options.iter().enumerate() {
            println!("  {}. {}", option_letter(option_index), option);
        }
        loop {
            let raw = prompt_line("Choose (A-D)", None)?;
            let trimmed = raw.trim();
            if trimmed.eq_ignore_ascii_case("exit") {
                return Err("fill aborted by user".into());
            }
            match parse_option_letter(trimmed, sub_question.options.len()) {
                Ok(option) => {
                    if let Some(state) = session.comprehension_mut(id) {
                        state.select(sub_question.id.clone(), option);
                    }
                    break;
                }
                Err(err) => presenter.show_parse_error(&err),
            }
        }
    }
    Ok(())
}

fn parse_option_letter(raw: &str, option_count: usize) -> Result<usize, AnswerParseError> {
    let mut chars = raw.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            let index = (upper as u8 - b'A') as usize;
            if index < option_count {
                return Ok(index);
            }
        }
    }
    let last = option_letter(option_count.saturating_sub(1));
    Err(AnswerParseError::new(
        format!("Choose a letter between A and {}.", last),
        Some(format!("expected one of A-{}", last)),
    ))
}

fn load_document(path: &Path) -> CliResult<FormDocument> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn ensure_bundle_slot(bundle_dir: &Path, force: bool) -> CliResult<()> {
    if bundle_dir.exists() {
        if force {
            fs::remove_dir_all(bundle_dir)?;
        } else {
            return Err(format!(
                "bundle {} already exists; rerun with --force to overwrite",
                bundle_dir.display()
            )
            .into());
        }
    }
    Ok(())
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os("FORMCRAFT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    Ok(candidate)
}

fn prompt_question_kind() -> CliResult<Option<QuestionKind>> {
    loop {
        let value = prompt_line(
            "Add question (categorize/cloze/comprehension, blank to finish)",
            None,
        )?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match QuestionKind::from_str(trimmed) {
            Ok(kind) => return Ok(Some(kind)),
            Err(err) => println!("{}", err),
        }
    }
}

fn prompt_image(prompt: &str) -> CliResult<Option<String>> {
    loop {
        let Some(path) = prompt_optional(prompt)? else {
            return Ok(None);
        };
        match StockPhotoStore.upload(Path::new(&path)) {
            Ok(url) => {
                println!("Uploads are stubbed; using the placeholder image URL.");
                return Ok(Some(url));
            }
            Err(err) => println!("{}", err),
        }
    }
}

fn prompt_list(prompt: &str) -> CliResult<Vec<String>> {
    let mut values = Vec::new();
    while let Some(value) = prompt_optional(prompt)? {
        values.push(value);
    }
    Ok(values)
}

fn prompt_points(prompt: &str, default: u32) -> CliResult<u32> {
    let raw = prompt_line(&format!("{} (integer >= 1)", prompt), Some(&default.to_string()))?;
    // unparsable input falls back to a single point, like the editor
    Ok(raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|points| *points >= 1)
        .unwrap_or(1))
}

fn prompt_bool(prompt: &str, default: bool) -> CliResult<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let value = prompt_line(&format!("{} [{}]", prompt, hint), None)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.to_lowercase().as_str() {
            "y" | "yes" | "true" | "t" | "1" => return Ok(true),
            "n" | "no" | "false" | "f" | "0" => return Ok(false),
            _ => println!("Please answer yes or no."),
        }
    }
}

fn prompt_line(prompt: &str, default: Option<&str>) -> CliResult<String> {
    if let Some(default_value) = default {
        print!("{} [{}]: ", prompt, default_value);
    } else {
        print!("{}: ", prompt);
    }
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err("unexpected end of input".into());
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        if let Some(default_value) = default {
            Ok(default_value.to_string())
        } else {
            Ok(String::new())
        }
    } else {
        Ok(trimmed.to_string())
    }
}

fn prompt_optional(prompt: &str) -> CliResult<Option<String>> {
    let value = prompt_line(prompt, None)?;
    if value.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn prompt_non_empty(prompt: &str, default: Option<&str>) -> CliResult<String> {
    loop {
        let value = prompt_line(prompt, default)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        println!("Value cannot be empty.");
    }
}
