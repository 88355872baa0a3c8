use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::QuestionType,
        dto::{
            request::GenerateQuizRequestDto,
            response::{GenerateQuizResponseDto, QuestionTypeDto},
        },
    },
};

#[post("/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let dto = request.into_inner();
    let include_explanations = dto
        .include_explanations
        .unwrap_or(state.config.enrich_explanations);
    let quiz_request = dto.into_quiz_request()?;

    log::info!(
        "[{}] Generating {} questions about '{}' ({:?})",
        get_request_id(&req).unwrap_or_default(),
        quiz_request.question_count(),
        quiz_request.topic(),
        quiz_request.allowed_types()
    );

    let document = state
        .quiz_service
        .generate_quiz(&quiz_request, include_explanations)
        .await
        .into_result()?;

    Ok(HttpResponse::Ok().json(GenerateQuizResponseDto::from(&document)))
}

#[get("/question-types")]
pub async fn list_question_types() -> HttpResponse {
    let types: Vec<QuestionTypeDto> = QuestionType::ALL
        .into_iter()
        .map(QuestionTypeDto::from)
        .collect();
    HttpResponse::Ok().json(types)
}

/// Malformed JSON bodies get the same `{error, status}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
