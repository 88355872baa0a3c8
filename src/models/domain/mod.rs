pub mod question;
pub mod quiz_document;
pub mod quiz_request;
pub mod search_context;
pub use question::{CorrectAnswer, Question, QuestionType, Reference};
pub use quiz_document::QuizDocument;
pub use quiz_request::QuizRequest;
pub use search_context::{SearchContext, SearchResult};
