pub mod explanation_prompt;
pub mod quiz_prompt;
