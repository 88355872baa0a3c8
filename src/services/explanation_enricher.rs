use crate::{
    constants::explanation_prompt::{
        fallback_explanation, EXPLANATION_INSTRUCTIONS, EXPLANATION_WORD_LIMIT,
    },
    errors::{AppError, AppResult},
    models::domain::{Question, QuizDocument},
    services::{
        content_provider::{GroundedGenerator, GroundedText},
        response_sanitizer::sanitize,
    },
};

/// Adds a short rationale and supporting references to every question.
pub struct ExplanationEnricher {
    generator: GroundedGenerator,
}

impl ExplanationEnricher {
    pub fn new(generator: GroundedGenerator) -> Self {
        Self { generator }
    }

    /// Processes questions one at a time, in order. A failed question gets the fallback text and
    /// the remaining questions are still processed.
    pub async fn enrich_explanations(
        &self,
        mut document: QuizDocument,
        topic: &str,
    ) -> QuizDocument {
        let total = document.len();

        for (index, question) in document.questions.iter_mut().enumerate() {
            match self.explain(question, topic).await {
                Ok(grounded) => {
                    question.explanation = Some(grounded.text);
                    question.references = grounded.references;
                }
                Err(e) => {
                    log::warn!(
                        "Explanation for question {}/{} fell back to template: {}",
                        index + 1,
                        total,
                        e
                    );
                    question.explanation = Some(fallback_explanation(topic));
                    question.references = Vec::new();
                }
            }
        }

        document
    }

    async fn explain(&self, question: &Question, topic: &str) -> AppResult<GroundedText> {
        let prompt = build_explanation_prompt(question, topic);
        let grounded = self.generator.generate_grounded(&prompt, topic).await?;

        let text = truncate_words(&sanitize(&grounded.text), EXPLANATION_WORD_LIMIT);
        if text.is_empty() {
            return Err(AppError::ProviderError(
                "Provider returned an empty explanation".to_string(),
            ));
        }

        Ok(GroundedText {
            text,
            references: grounded.references,
        })
    }
}

pub fn build_explanation_prompt(question: &Question, topic: &str) -> String {
    format!(
        "Topic: {}\nQuestion: {}\nCorrect answer: {}\n\n{}",
        topic,
        question.question,
        question.correct_answer.describe(),
        EXPLANATION_INSTRUCTIONS
    )
}

/// Keeps at most `limit` whitespace-separated words, collapsing runs of whitespace.
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}
