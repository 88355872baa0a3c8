use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuizDocument, QuizRequest},
    services::{
        content_provider::{ContentProvider, GroundedGenerator},
        context_enricher::ContextEnricher,
        explanation_enricher::ExplanationEnricher,
        prompt_synthesizer::synthesize,
        quiz_validator::validate,
        response_sanitizer::sanitize,
        search_provider::SearchProvider,
    },
};

/// Wall-clock budget for one request, checked between pipeline stages.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn check(&self, stage: &str) -> AppResult<()> {
        if self.started.elapsed() > self.budget {
            log::warn!("Request budget of {:?} exhausted before {}", self.budget, stage);
            return Err(AppError::TimeoutExceeded(self.budget));
        }
        Ok(())
    }
}

/// What the pipeline hands back to the HTTP layer. `document` is always well formed; it is the
/// empty document whenever `error` is set.
#[derive(Debug)]
pub struct QuizOutcome {
    pub document: QuizDocument,
    pub error: Option<AppError>,
}

impl QuizOutcome {
    fn success(document: QuizDocument) -> Self {
        Self {
            document,
            error: None,
        }
    }

    fn failed(error: AppError) -> Self {
        Self {
            document: QuizDocument::empty(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> AppResult<QuizDocument> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.document),
        }
    }
}

pub struct QuizService {
    primary: Arc<dyn ContentProvider>,
    context_enricher: Arc<ContextEnricher>,
    explanation_enricher: ExplanationEnricher,
    budget: Duration,
}

impl QuizService {
    /// `primary` and `explanation` are separate lanes so explanation traffic cannot starve quiz
    /// generation.
    pub fn new(
        primary: Arc<dyn ContentProvider>,
        explanation: Arc<dyn ContentProvider>,
        search: Arc<dyn SearchProvider>,
        search_result_count: u8,
        budget: Duration,
    ) -> Self {
        let context_enricher = Arc::new(ContextEnricher::new(search, search_result_count));
        let explanation_enricher = ExplanationEnricher::new(GroundedGenerator::new(
            explanation,
            Arc::clone(&context_enricher),
        ));

        Self {
            primary,
            context_enricher,
            explanation_enricher,
            budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub async fn generate_quiz(
        &self,
        request: &QuizRequest,
        include_explanations: bool,
    ) -> QuizOutcome {
        let deadline = Deadline::start(self.budget);

        match tokio::time::timeout(
            self.budget,
            self.run_pipeline(request, include_explanations, &deadline),
        )
        .await
        {
            Ok(Ok(document)) => {
                log::info!(
                    "Generated {} questions about '{}'",
                    document.len(),
                    request.topic()
                );
                QuizOutcome::success(document)
            }
            Ok(Err(e)) => {
                log::error!("Quiz generation failed for '{}': {}", request.topic(), e);
                QuizOutcome::failed(e)
            }
            Err(_) => {
                log::error!(
                    "Quiz generation for '{}' exceeded {:?}",
                    request.topic(),
                    self.budget
                );
                QuizOutcome::failed(AppError::TimeoutExceeded(self.budget))
            }
        }
    }

    async fn run_pipeline(
        &self,
        request: &QuizRequest,
        include_explanations: bool,
        deadline: &Deadline,
    ) -> AppResult<QuizDocument> {
        deadline.check("context enrichment")?;
        let context = self.context_enricher.enrich(request.topic()).await;

        deadline.check("generation")?;
        let prompt = synthesize(
            request.topic(),
            request.question_count(),
            request.allowed_types(),
            Some(&context),
        )?;
        let raw = self.primary.generate(&prompt).await?.into_text()?;

        deadline.check("validation")?;
        let document = validate(&sanitize(&raw));
        if document.len() != request.question_count() as usize {
            log::warn!(
                "Requested {} questions but provider returned {}",
                request.question_count(),
                document.len()
            );
        }

        if !include_explanations || document.is_empty() {
            return Ok(document);
        }

        deadline.check("explanation enrichment")?;
        let document = self
            .explanation_enricher
            .enrich_explanations(document, request.topic())
            .await;

        deadline.check("response")?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        models::domain::QuestionType,
        services::{
            content_provider::{GenerationResponse, MockContentProvider},
            search_provider::MockSearchProvider,
        },
        test_utils::fixtures,
    };

    const BUDGET: Duration = Duration::from_secs(25);

    /// Never answers within any test budget and yields to the runtime while waiting.
    struct HangingProvider;

    #[async_trait]
    impl ContentProvider for HangingProvider {
        async fn generate(&self, _prompt: &str) -> AppResult<GenerationResponse> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(GenerationResponse::Text(
                fixtures::fill_blank_document(1).to_json_string(),
            ))
        }
    }

    fn unavailable_search() -> MockSearchProvider {
        let mut search = MockSearchProvider::new();
        search.expect_search().returning(|_, _| {
            Err(AppError::ProviderError(
                "Search credentials are not configured".to_string(),
            ))
        });
        search
    }

    fn service(
        primary: MockContentProvider,
        explanation: MockContentProvider,
        search: MockSearchProvider,
        budget: Duration,
    ) -> QuizService {
        QuizService::new(
            Arc::new(primary),
            Arc::new(explanation),
            Arc::new(search),
            5,
            budget,
        )
    }

    fn request(count: i64, types: &[QuestionType]) -> QuizRequest {
        QuizRequest::new("TCP/IP networking", count, types.iter().copied()).unwrap()
    }

    #[test]
    fn deadline_check_passes_within_budget() {
        let deadline = Deadline::start(Duration::from_secs(60));
        assert!(deadline.check("stage").is_ok());
    }

    #[test]
    fn deadline_check_fails_when_exhausted() {
        let deadline = Deadline::start(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));

        assert!(matches!(
            deadline.check("stage"),
            Err(AppError::TimeoutExceeded(Duration::ZERO))
        ));
    }

    #[test]
    fn outcome_into_result() {
        let ok = QuizOutcome::success(fixtures::mixed_document());
        assert!(ok.is_success());
        assert!(ok.into_result().is_ok());

        let failed = QuizOutcome::failed(AppError::ProviderError("down".to_string()));
        assert!(!failed.is_success());
        assert!(failed.document.is_empty());
        assert!(failed.into_result().is_err());
    }

    #[actix_web::test]
    async fn fenced_response_is_sanitized_and_validated() {
        let mut primary = MockContentProvider::new();
        primary
            .expect_generate()
            .withf(|prompt| {
                prompt.contains("exactly 3 questions") && prompt.contains("fill_blank")
            })
            .times(1)
            .returning(|_| {
                Ok(GenerationResponse::Text(format!(
                    "```json\n{}\n```",
                    fixtures::fill_blank_document(3).to_json_string()
                )))
            });

        let quiz_service = service(
            primary,
            MockContentProvider::new(),
            unavailable_search(),
            BUDGET,
        );
        let outcome = quiz_service
            .generate_quiz(&request(3, &[QuestionType::FillBlank]), false)
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.document, fixtures::fill_blank_document(3));
    }

    #[actix_web::test]
    async fn provider_failure_returns_empty_document_with_error() {
        let mut primary = MockContentProvider::new();
        primary
            .expect_generate()
            .times(1)
            .returning(|_| Err(AppError::ProviderError("quota exceeded".to_string())));

        let quiz_service = service(
            primary,
            MockContentProvider::new(),
            unavailable_search(),
            BUDGET,
        );
        let outcome = quiz_service
            .generate_quiz(&request(5, &QuestionType::ALL), true)
            .await;

        assert!(outcome.document.is_empty());
        assert!(matches!(outcome.error, Some(AppError::ProviderError(_))));
    }

    #[actix_web::test]
    async fn unparseable_response_fails_closed_without_error() {
        let mut primary = MockContentProvider::new();
        primary
            .expect_generate()
            .returning(|_| {
                Ok(GenerationResponse::Text(
                    "Sorry, I cannot help with that.".to_string(),
                ))
            });

        let quiz_service = service(
            primary,
            MockContentProvider::new(),
            unavailable_search(),
            BUDGET,
        );
        let outcome = quiz_service
            .generate_quiz(&request(5, &QuestionType::ALL), true)
            .await;

        assert!(outcome.is_success());
        assert!(outcome.document.is_empty());
    }

    #[actix_web::test]
    async fn explanations_use_the_explanation_lane() {
        let mut primary = MockContentProvider::new();
        primary
            .expect_generate()
            .times(1)
            .returning(|_| {
                Ok(GenerationResponse::Text(
                    fixtures::mixed_document().to_json_string(),
                ))
            });

        let mut explanation = MockContentProvider::new();
        explanation
            .expect_generate()
            .withf(|prompt| prompt.contains("Correct answer:"))
            .times(fixtures::mixed_document().len())
            .returning(|_| {
                Ok(GenerationResponse::Text(
                    "Because of the protocol design.".to_string(),
                ))
            });

        let quiz_service = service(primary, explanation, unavailable_search(), BUDGET);
        let outcome = quiz_service
            .generate_quiz(&request(3, &QuestionType::ALL), true)
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.document.len(), fixtures::mixed_document().len());
        assert!(outcome
            .document
            .questions
            .iter()
            .all(|q| q.explanation.as_deref() == Some("Because of the protocol design.")));
    }

    #[actix_web::test]
    async fn search_context_grounds_the_prompt() {
        let mut search = MockSearchProvider::new();
        search
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(fixtures::search_results()));

        let mut primary = MockContentProvider::new();
        primary
            .expect_generate()
            .withf(|prompt| prompt.contains("Reference list:"))
            .times(1)
            .returning(|_| {
                Ok(GenerationResponse::Text(
                    fixtures::fill_blank_document(1).to_json_string(),
                ))
            });

        let quiz_service = service(primary, MockContentProvider::new(), search, BUDGET);
        let outcome = quiz_service
            .generate_quiz(&request(1, &[QuestionType::FillBlank]), false)
            .await;

        assert_eq!(outcome.document.len(), 1);
    }

    #[actix_web::test]
    async fn hung_provider_is_cut_off_at_the_budget() {
        let budget = Duration::from_millis(50);
        let quiz_service = QuizService::new(
            Arc::new(HangingProvider),
            Arc::new(MockContentProvider::new()),
            Arc::new(unavailable_search()),
            5,
            budget,
        );

        let started = Instant::now();
        let outcome = quiz_service
            .generate_quiz(&request(1, &[QuestionType::FillBlank]), false)
            .await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(outcome.document.is_empty());
        assert!(matches!(outcome.error, Some(AppError::TimeoutExceeded(d)) if d == budget));
        assert_eq!(
            outcome.error.unwrap().to_string(),
            "Request timed out after 50ms"
        );
    }

    #[actix_web::test]
    async fn budget_spent_by_a_blocking_stage_is_caught_at_the_next_boundary() {
        let mut primary = MockContentProvider::new();
        primary.expect_generate().returning(|_| {
            std::thread::sleep(Duration::from_millis(60));
            Ok(GenerationResponse::Text(fixtures::fill_blank_document(1).to_json_string()))
        });

        let quiz_service = service(
            primary,
            MockContentProvider::new(),
            unavailable_search(),
            Duration::from_millis(20),
        );
        let outcome = quiz_service
            .generate_quiz(&request(1, &[QuestionType::FillBlank]), false)
            .await;

        assert!(outcome.document.is_empty());
        assert!(matches!(outcome.error, Some(AppError::TimeoutExceeded(_))));
    }
}
