/// Upper bound on explanation length, enforced after generation as well.
pub const EXPLANATION_WORD_LIMIT: usize = 100;

pub const EXPLANATION_INSTRUCTIONS: &str = "Explain in plain prose why the correct answer is right. Keep it under 100 words, do not restate the question, and do not use markdown or code fences.";

pub const FALLBACK_EXPLANATION_PREFIX: &str = "The correct answer relates to key concepts in";

pub fn fallback_explanation(topic: &str) -> String {
    format!("{} {}.", FALLBACK_EXPLANATION_PREFIX, topic)
}
