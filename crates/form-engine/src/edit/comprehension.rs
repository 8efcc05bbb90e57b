use chrono::Utc;

use formcraft_spec::spec::question::ComprehensionQuestion;

/// Editor operations for a comprehension payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ComprehensionEdit {
    SetPassage { passage: String },
    /// Append a sub-question seeded with four placeholder options and the
    /// first option marked correct.
    AddQuestion,
    SetPrompt { index: usize, value: String },
    SetOption { question: usize, option: usize, value: String },
    /// Mark one option as the correct answer. Out-of-range options are
    /// ignored.
    SetCorrect { question: usize, option: usize },
    RemoveQuestion { index: usize },
}

pub(crate) fn apply(
    passage: &mut String,
    questions: &mut Vec<ComprehensionQuestion>,
    op: ComprehensionEdit,
) {
    match op {
        ComprehensionEdit::SetPassage { passage: new_passage } => {
            *passage = new_passage;
        }
        ComprehensionEdit::AddQuestion => {
            let id = next_sub_question_id(questions);
            questions.push(ComprehensionQuestion::placeholder(id));
        }
        ComprehensionEdit::SetPrompt { index, value } => {
            if let Some(sub_question) = questions.get_mut(index) {
                sub_question.question = value;
            }
        }
        ComprehensionEdit::SetOption {
            question,
            option,
            value,
        } => {
            if let Some(sub_question) = questions.get_mut(question)
                && let Some(slot) = sub_question.options.get_mut(option)
            {
                *slot = value;
            }
        }
        ComprehensionEdit::SetCorrect { question, option } => {
            if let Some(sub_question) = questions.get_mut(question)
                && option < sub_question.options.len()
            {
                sub_question.correct_answer = option;
            }
        }
        ComprehensionEdit::RemoveQuestion { index } => {
            if index < questions.len() {
                questions.remove(index);
            }
        }
    }
}

fn next_sub_question_id(questions: &[ComprehensionQuestion]) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !questions
            .iter()
            .any(|sub_question| sub_question.id == candidate)
        {
            return candidate;
        }
        millis += 1;
    }
}
