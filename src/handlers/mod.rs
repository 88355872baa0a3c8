use actix_web::web;

pub mod health_handler;
pub mod quiz_handler;

pub use health_handler::health_check;
pub use quiz_handler::{generate_quiz, json_config, list_question_types};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_quiz)
        .service(list_question_types)
        .service(health_check);
}
