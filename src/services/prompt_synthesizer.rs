use std::collections::BTreeSet;

use crate::{
    constants::quiz_prompt::{type_contract, GROUNDING_HEADER, OUTPUT_SHAPE},
    errors::{AppError, AppResult},
    models::domain::{
        quiz_request::{MAX_QUESTIONS, MIN_QUESTIONS},
        QuestionType, SearchContext,
    },
};

/// Builds the generation prompt for one quiz. Pure and deterministic for identical inputs.
pub fn synthesize(
    topic: &str,
    question_count: u8,
    allowed_types: &BTreeSet<QuestionType>,
    context: Option<&SearchContext>,
) -> AppResult<String> {
    if allowed_types.is_empty() {
        return Err(AppError::ValidationError(
            "At least one question type is required".to_string(),
        ));
    }
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&question_count) {
        return Err(AppError::ValidationError(format!(
            "Question count {} is outside {}-{}",
            question_count, MIN_QUESTIONS, MAX_QUESTIONS
        )));
    }

    let type_names = allowed_types
        .iter()
        .map(QuestionType::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = String::new();

    if let Some(section) = context.and_then(grounding_section) {
        prompt.push_str(&section);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!(
        "Generate a quiz about {topic} containing exactly {question_count} questions.\n\
         Use only the following question types: {type_names}. Ensure that the number of questions matches the specified number ({question_count}) without exception.\n\n"
    ));

    if allowed_types.contains(&QuestionType::TrueFalse) {
        prompt.push_str(
            "For true/false questions, always use boolean values (true/false) in lowercase for the correct_answer.\n\n",
        );
    }

    prompt.push_str("Follow these specific formats for each question type:\n\n");

    for (index, question_type) in allowed_types.iter().enumerate() {
        let (rules, example) = type_contract(*question_type);
        prompt.push_str(&format!(
            "{}. For {} questions:\n{}\nExample:\n{}\n\n",
            index + 1,
            question_type,
            rules,
            example
        ));
    }

    prompt.push_str(&format!(
        "Ensure the total number of questions equals {question_count}, and return a valid JSON object (no markdown, no code blocks, no ``` fences) with the following structure:\n{OUTPUT_SHAPE}"
    ));

    Ok(prompt)
}

/// Grounding preamble for a non-empty context, listing the only references the provider may cite.
pub fn grounding_section(context: &SearchContext) -> Option<String> {
    if context.is_empty() {
        return None;
    }

    let reference_list = context
        .references
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({}) - {}", i + 1, r.title, r.source, r.url))
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!(
        "{GROUNDING_HEADER}\n\nReference material:\n{}\n\nReference list:\n{}",
        context.context.trim_end(),
        reference_list
    ))
}

/// Prepends the grounding section to an arbitrary prompt; unchanged when the context is empty.
pub fn with_grounding(prompt: &str, context: &SearchContext) -> String {
    match grounding_section(context) {
        Some(section) => format!("{}\n\n{}", section, prompt),
        None => prompt.to_string(),
    }
}
