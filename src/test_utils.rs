#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{CorrectAnswer, Question, QuestionType, QuizDocument, SearchResult};

    pub fn fill_blank_question() -> Question {
        Question {
            question_type: QuestionType::FillBlank,
            question: "The _____ protocol is used to securely transfer files between a client and server."
                .to_string(),
            options: vec!["SFTP", "HTTP", "SMTP", "ICMP"]
                .into_iter()
                .map(String::from)
                .collect(),
            descriptions: Vec::new(),
            code_template: None,
            correct_answer: CorrectAnswer::Text("SFTP".to_string()),
            explanation: None,
            references: Vec::new(),
        }
    }

    pub fn multiple_choice_question() -> Question {
        Question {
            question_type: QuestionType::MultipleChoice,
            question: "Which OSI layer routes packets between networks?".to_string(),
            options: vec!["Network", "Transport", "Data link", "Session"]
                .into_iter()
                .map(String::from)
                .collect(),
            descriptions: Vec::new(),
            code_template: None,
            correct_answer: CorrectAnswer::Text("Network".to_string()),
            explanation: None,
            references: Vec::new(),
        }
    }

    pub fn true_false_question() -> Question {
        Question {
            question_type: QuestionType::TrueFalse,
            question: "UDP guarantees in-order delivery.".to_string(),
            options: Vec::new(),
            descriptions: Vec::new(),
            code_template: None,
            correct_answer: CorrectAnswer::Bool(false),
            explanation: None,
            references: Vec::new(),
        }
    }

    pub fn coding_question() -> Question {
        Question {
            question_type: QuestionType::Coding,
            question: "Complete the socket setup.".to_string(),
            options: vec!["socket.AF_INET", "sock.bind((host, port))", "sock.close()"]
                .into_iter()
                .map(String::from)
                .collect(),
            descriptions: vec!["Address family".to_string(), "Bind".to_string()],
            code_template: Some("sock = socket.socket(_____)\n_____".to_string()),
            correct_answer: CorrectAnswer::List(vec![
                "socket.AF_INET".to_string(),
                "sock.bind((host, port))".to_string(),
            ]),
            explanation: None,
            references: Vec::new(),
        }
    }

    /// Three questions of different types with distinct texts.
    pub fn mixed_document() -> QuizDocument {
        QuizDocument::new(vec![
            multiple_choice_question(),
            true_false_question(),
            coding_question(),
        ])
    }

    pub fn fill_blank_document(count: usize) -> QuizDocument {
        let protocols = ["SFTP", "SSH", "HTTPS", "DNS", "DHCP"];
        let questions = (0..count)
            .map(|i| {
                let mut question = fill_blank_question();
                let answer = protocols[i % protocols.len()].to_string();
                question.question = format!(
                    "Question {}: the _____ protocol is the correct one here.",
                    i + 1
                );
                question.options = protocols[..4].iter().map(|p| p.to_string()).collect();
                if !question.options.contains(&answer) {
                    question.options[3] = answer.clone();
                }
                question.correct_answer = CorrectAnswer::Text(answer);
                question
            })
            .collect();
        QuizDocument::new(questions)
    }

    pub fn search_results() -> Vec<SearchResult> {
        vec![
            SearchResult {
                title: "Internet protocol suite".to_string(),
                link: "https://en.wikipedia.org/wiki/Internet_protocol_suite".to_string(),
                snippet: "The Internet protocol suite, commonly known as TCP/IP, organizes the set of communication protocols."
                    .to_string(),
                source: "en.wikipedia.org".to_string(),
            },
            SearchResult {
                title: "What is TCP/IP?".to_string(),
                link: "https://www.cloudflare.com/learning/ddos/glossary/tcp-ip/".to_string(),
                snippet: "TCP/IP stands for Transmission Control Protocol/Internet Protocol.".to_string(),
                source: "www.cloudflare.com".to_string(),
            },
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::{sync::Arc, time::Duration};

    use actix_web::http::StatusCode;

    use crate::{
        app_state::AppState,
        config::Config,
        services::{
            content_provider::MockContentProvider, quiz_service::QuizService,
            search_provider::MockSearchProvider,
        },
    };

    /// State whose providers must never be called.
    pub fn offline_state() -> AppState {
        let quiz_service = QuizService::new(
            Arc::new(MockContentProvider::new()),
            Arc::new(MockContentProvider::new()),
            Arc::new(MockSearchProvider::new()),
            5,
            Duration::from_secs(25),
        );
        AppState::with_service(Config::test_config(), Arc::new(quiz_service))
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_are_well_formed() {
        for question in mixed_document().questions {
            assert!(question.structural_issues().is_empty(), "{:?}", question);
        }
    }

    #[test]
    fn test_fill_blank_document_has_answers_in_options() {
        let document = fill_blank_document(5);
        assert_eq!(document.len(), 5);
        for question in &document.questions {
            assert!(question.structural_issues().is_empty(), "{:?}", question);
        }
    }
}
