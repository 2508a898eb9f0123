use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One multiple-choice question produced by the quiz generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawQuestion")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
    #[serde(rename = "correctAnswerId")]
    pub correct_answer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

impl Question {
    pub fn option(&self, id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_answer_id == option_id
    }
}

/// Response of the generate-quiz endpoint, either a bare list or wrapped in
/// a `questions` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuizPayload {
    Bare(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

impl QuizPayload {
    /// Questions in order, with missing ids replaced by their 1-based position.
    pub fn into_questions(self) -> Vec<Question> {
        let questions = match self {
            QuizPayload::Bare(questions) | QuizPayload::Wrapped { questions } => questions,
        };

        questions
            .into_iter()
            .enumerate()
            .map(|(index, mut question)| {
                if question.id.is_empty() {
                    question.id = (index + 1).to_string();
                }
                question
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(alias = "question")]
    text: String,
    options: RawOptions,
    #[serde(
        rename = "correctAnswerId",
        alias = "correct_answer",
        alias = "correct_answer_id"
    )]
    correct_answer: RawId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(text) => text,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptions {
    List(Vec<RawOption>),
    Keyed(BTreeMap<String, String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOption {
    Entry { id: RawId, text: String },
    Plain(String),
    Keyed(BTreeMap<String, String>),
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        let options = collect_options(raw.options);
        let correct_answer_id = resolve_correct_answer(raw.correct_answer.into_string(), &options);

        Self {
            id: raw.id.map(RawId::into_string).unwrap_or_default(),
            text: raw.text,
            options,
            correct_answer_id,
        }
    }
}

fn collect_options(raw: RawOptions) -> Vec<QuizOption> {
    let entries = match raw {
        RawOptions::Keyed(map) => return map.into_iter().map(|(id, text)| QuizOption { id, text }).collect(),
        RawOptions::List(entries) => entries,
    };

    let mut options = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            RawOption::Entry { id, text } => options.push(QuizOption {
                id: id.into_string(),
                text,
            }),
            RawOption::Plain(text) => {
                let id = position_label(options.len());
                options.push(QuizOption { id, text });
            }
            RawOption::Keyed(map) => {
                options.extend(map.into_iter().map(|(id, text)| QuizOption { id, text }));
            }
        }
    }
    options
}

fn position_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(n) if n < 26 => char::from(b'A' + n).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Maps the generator's answer onto an option id: exact id, then option
/// text, then a leading letter label such as `B)`.
fn resolve_correct_answer(raw: String, options: &[QuizOption]) -> String {
    if options.iter().any(|option| option.id == raw) {
        return raw;
    }

    let wanted = raw.trim().to_lowercase();
    if let Some(option) = options
        .iter()
        .find(|option| option.text.trim().to_lowercase() == wanted)
    {
        return option.id.clone();
    }

    if let Some(label) = leading_label(&raw) {
        if options.iter().any(|option| option.id == label) {
            return label;
        }
    }

    raw
}

fn leading_label(raw: &str) -> Option<String> {
    let mut chars = raw.trim().chars();
    let first = chars.next().filter(char::is_ascii_alphabetic)?;
    match chars.next() {
        None | Some(')') | Some('.') | Some(':') => Some(first.to_ascii_uppercase().to_string()),
        _ => None,
    }
}
