use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Marker the provider uses for every blank in fill-in and coding questions.
pub const BLANK_PLACEHOLDER: &str = "_____";

static UNDERSCORE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_+").expect("UNDERSCORE_RUN is a valid regex pattern"));

/// Counts runs of exactly five underscores; longer or shorter runs are not blanks.
pub fn count_placeholders(text: &str) -> usize {
    UNDERSCORE_RUN
        .find_iter(text)
        .filter(|m| m.as_str().len() == BLANK_PLACEHOLDER.len())
        .count()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    DragDrop,
    FillBlank,
    TrueFalse,
    Coding,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::MultipleChoice,
        QuestionType::DragDrop,
        QuestionType::FillBlank,
        QuestionType::TrueFalse,
        QuestionType::Coding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::DragDrop => "drag_drop",
            QuestionType::FillBlank => "fill_blank",
            QuestionType::TrueFalse => "true_false",
            QuestionType::Coding => "coding",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::DragDrop => "Drag and Drop",
            QuestionType::FillBlank => "Fill in the Blank",
            QuestionType::TrueFalse => "True/False",
            QuestionType::Coding => "Coding",
        }
    }

    /// Form element id used by the front-end checkboxes.
    pub fn element_id(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multipleChoice",
            QuestionType::DragDrop => "dragDrop",
            QuestionType::FillBlank => "fillBlank",
            QuestionType::TrueFalse => "trueFalse",
            QuestionType::Coding => "coding",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AppError::ValidationError(format!("Unknown question type '{}'", s)))
    }
}

/// The shape of `correct_answer` depends on the question type. `Other` keeps any provider value
/// that fits none of the expected shapes so the question survives parsing untouched.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl CorrectAnswer {
    /// Human readable form used inside explanation prompts.
    pub fn describe(&self) -> String {
        match self {
            CorrectAnswer::Bool(b) => b.to_string(),
            CorrectAnswer::Text(t) => t.clone(),
            CorrectAnswer::List(items) => items.join(", "),
            CorrectAnswer::Other(value) => value.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reference {
    pub url: String,
    pub title: String,
    pub source: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_template: Option<String>,
    pub correct_answer: CorrectAnswer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

#[derive(Deserialize)]
struct RawQuestion {
    #[serde(rename = "type")]
    question_type: QuestionType,
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    descriptions: Option<Vec<String>>,
    #[serde(default)]
    code_template: Option<String>,
    correct_answer: CorrectAnswer,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    references: Option<Vec<Reference>>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = String;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let correct_answer = match (raw.question_type, raw.correct_answer) {
            (QuestionType::TrueFalse, CorrectAnswer::Bool(b)) => CorrectAnswer::Bool(b),
            (QuestionType::TrueFalse, CorrectAnswer::Text(t)) => {
                match t.trim().to_ascii_lowercase().as_str() {
                    "true" => CorrectAnswer::Bool(true),
                    "false" => CorrectAnswer::Bool(false),
                    _ => {
                        return Err(format!(
                            "true_false correct_answer must be a boolean, got '{}'",
                            t
                        ))
                    }
                }
            }
            (QuestionType::TrueFalse, other) => {
                return Err(format!(
                    "true_false correct_answer must be a boolean, got {}",
                    other.describe()
                ))
            }
            (_, answer) => answer,
        };

        Ok(Question {
            question_type: raw.question_type,
            question: raw.question,
            options: raw.options.unwrap_or_default(),
            descriptions: raw.descriptions.unwrap_or_default(),
            code_template: raw.code_template,
            correct_answer,
            explanation: raw.explanation,
            references: raw.references.unwrap_or_default(),
        })
    }
}

impl Question {
    /// Lists violations of the per-type structural contract. Empty when the question is well
    /// formed.
    pub fn structural_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        match self.question_type {
            QuestionType::FillBlank => {
                let blanks = count_placeholders(&self.question);
                if blanks != 1 {
                    issues.push(format!(
                        "fill_blank question has {} placeholders, expected 1",
                        blanks
                    ));
                }
                self.check_answer_in_options(&mut issues);
            }
            QuestionType::MultipleChoice => self.check_answer_in_options(&mut issues),
            QuestionType::Coding => match (&self.code_template, &self.correct_answer) {
                (Some(template), CorrectAnswer::List(answers)) => {
                    let blanks = count_placeholders(template);
                    if blanks != answers.len() {
                        issues.push(format!(
                            "coding template has {} placeholders but {} answers",
                            blanks,
                            answers.len()
                        ));
                    }
                }
                (None, _) => issues.push("coding question has no code_template".to_string()),
                (Some(_), _) => issues.push("coding correct_answer must be a list".to_string()),
            },
            QuestionType::DragDrop => {
                if !matches!(self.correct_answer, CorrectAnswer::List(_)) {
                    issues.push("drag_drop correct_answer must be a list".to_string());
                }
            }
            QuestionType::TrueFalse => {}
        }

        issues
    }

    fn check_answer_in_options(&self, issues: &mut Vec<String>) {
        match &self.correct_answer {
            CorrectAnswer::Text(answer) if self.options.contains(answer) => {}
            CorrectAnswer::Text(answer) => {
                issues.push(format!("correct_answer '{}' is not one of the options", answer))
            }
            _ => issues.push(format!("{} correct_answer must be a string", self.question_type)),
        }
    }
}
