use crate::models::domain::QuestionType;

pub const MULTIPLE_CHOICE_RULES: &str = "- Ask one clear question with a single unambiguous answer
- Provide exactly 4 options: the correct answer and 3 plausible distractors
- The correct_answer must be a string copied exactly from the options array";

pub const MULTIPLE_CHOICE_EXAMPLE: &str = r#"{"type": "multiple_choice", "question": "Which layer of the OSI model is responsible for routing packets between networks?", "options": ["Network layer", "Transport layer", "Data link layer", "Session layer"], "correct_answer": "Network layer"}"#;

pub const DRAG_DROP_RULES: &str = "- Format like IT certification exams with matching or ordering tasks
- Start with a clear scenario or concept to match
- Include a specific instruction like \"Match the following [items] with their [descriptions]:\" or \"Arrange the following [items] in the correct order:\"
- The options array contains the draggable items (at least 3)
- Include a descriptions array with one slot label per item
- The correct_answer is an array listing the items in slot order";

pub const DRAG_DROP_EXAMPLE: &str = r#"{"type": "drag_drop", "question": "Arrange the following steps of the TCP three-way handshake in the correct order:", "options": ["ACK", "SYN", "SYN-ACK"], "descriptions": ["Step 1", "Step 2", "Step 3"], "correct_answer": ["SYN", "SYN-ACK", "ACK"]}"#;

pub const FILL_BLANK_RULES: &str = "- Write a clear sentence where exactly one term needs to be filled in
- Mark the blank with exactly five underscores (_____), and use it exactly once
- Include 4-5 plausible options that fit grammatically in the blank
- The correct_answer must be a string copied exactly from the options array";

pub const FILL_BLANK_EXAMPLE: &str = r#"{"type": "fill_blank", "question": "The _____ protocol is used to securely transfer files between a client and server.", "options": ["SFTP", "HTTP", "SMTP", "ICMP"], "correct_answer": "SFTP"}"#;

pub const TRUE_FALSE_RULES: &str = "- State a single factual claim that is clearly true or clearly false
- Use an empty options array
- The correct_answer must be a JSON boolean written in lowercase (true or false), never a string";

pub const TRUE_FALSE_EXAMPLE: &str = r#"{"type": "true_false", "question": "UDP guarantees in-order delivery of datagrams.", "options": [], "correct_answer": false}"#;

pub const CODING_RULES: &str = "- Provide a complete code scenario in code_template with missing parts
- Mark each missing part with exactly five underscores (_____)
- The correct_answer array lists the fragment for each blank in order, one entry per blank
- The options array holds every correct fragment plus at least 1 distractor fragment
- Include a descriptions array labelling what each blank does
- Focus on certification-style problem-solving with context and requirements";

pub const CODING_EXAMPLE: &str = r#"{"type": "coding", "question": "A network engineer needs to implement a secure Python function for user authentication. Complete the function by dragging the correct code fragments into the blanks.", "code_template": "def authenticate_user(username, password):\n    if not _____:\n        return False\n    hashed_password = _____\n    return _____", "options": ["len(username) > 3", "hashlib.sha256(password.encode()).hexdigest()", "stored_credentials.get(username) == hashed_password", "password == username"], "descriptions": ["Username length check", "Password hashing", "Credential verification"], "correct_answer": ["len(username) > 3", "hashlib.sha256(password.encode()).hexdigest()", "stored_credentials.get(username) == hashed_password"]}"#;

pub const OUTPUT_SHAPE: &str = r#"{"questions": [
    {"type": "question_type", "question": "question_text", "options": ["option1", "option2"], "descriptions": ["desc1", "desc2"], "correct_answer": "answer"}
]}"#;

pub const GROUNDING_HEADER: &str = "Use the following reference material to keep the quiz factually accurate. Only cite sources from the reference list below; do not invent sources or URLs.";

/// Formatting rules and the worked example for one question type.
pub fn type_contract(question_type: QuestionType) -> (&'static str, &'static str) {
    match question_type {
        QuestionType::MultipleChoice => (MULTIPLE_CHOICE_RULES, MULTIPLE_CHOICE_EXAMPLE),
        QuestionType::DragDrop => (DRAG_DROP_RULES, DRAG_DROP_EXAMPLE),
        QuestionType::FillBlank => (FILL_BLANK_RULES, FILL_BLANK_EXAMPLE),
        QuestionType::TrueFalse => (TRUE_FALSE_RULES, TRUE_FALSE_EXAMPLE),
        QuestionType::Coding => (CODING_RULES, CODING_EXAMPLE),
    }
}
