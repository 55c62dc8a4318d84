//! Quiz payload validation.
//!
//! The external model is asked for a JSON document; nothing is persisted
//! until the raw response parses into this shape.

use serde::{Deserialize, Serialize};

use mindmate_core::{Error, Result};

/// A validated quiz document as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizPayload {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

/// One multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    pub explanation: String,
}

/// Parse and validate a raw model response as a quiz document.
///
/// Fails when the response is not JSON, does not match the expected shape,
/// has no questions, or names a correct-answer index outside its options.
pub fn parse_quiz_payload(raw: &str) -> Result<QuizPayload> {
    let payload: QuizPayload = serde_json::from_str(raw)
        .map_err(|_| Error::Generation("Invalid quiz format received from AI".to_string()))?;

    if payload.questions.is_empty() {
        return Err(Error::Generation(
            "Quiz contains no questions".to_string(),
        ));
    }

    for question in &payload.questions {
        if question.correct_answer >= question.options.len() {
            return Err(Error::Generation(format!(
                "Quiz question {} has out-of-range correct answer",
                question.id
            )));
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_quiz_json() -> &'static str {
        r#"{
            "title": "Quiz for Cells",
            "questions": [
                {
                    "id": 1,
                    "question": "What produces ATP?",
                    "options": ["Nucleus", "Mitochondria", "Ribosome", "Golgi"],
                    "correctAnswer": 1,
                    "explanation": "Mitochondria are the site of cellular respiration."
                }
            ]
        }"#
    }

    #[test]
    fn test_parse_valid_quiz() {
        let quiz = parse_quiz_payload(valid_quiz_json()).unwrap();
        assert_eq!(quiz.title, "Quiz for Cells");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, 1);
        assert_eq!(quiz.questions[0].options.len(), 4);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_quiz_payload("Here is your quiz: 1) What is...").unwrap_err();
        match err {
            Error::Generation(msg) => assert!(msg.contains("Invalid quiz format")),
            other => panic!("Expected Generation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_quiz_payload(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_parse_rejects_empty_questions() {
        let err = parse_quiz_payload(r#"{"title": "x", "questions": []}"#).unwrap_err();
        match err {
            Error::Generation(msg) => assert!(msg.contains("no questions")),
            other => panic!("Expected Generation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_answer() {
        let raw = r#"{
            "title": "x",
            "questions": [{
                "id": 1,
                "question": "q?",
                "options": ["a", "b"],
                "correctAnswer": 5,
                "explanation": "e"
            }]
        }"#;
        let err = parse_quiz_payload(raw).unwrap_err();
        match err {
            Error::Generation(msg) => assert!(msg.contains("out-of-range")),
            other => panic!("Expected Generation error, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_roundtrips_camel_case() {
        let quiz = parse_quiz_payload(valid_quiz_json()).unwrap();
        let json = serde_json::to_string(&quiz).unwrap();
        assert!(json.contains("\"correctAnswer\":1"));
        assert!(!json.contains("correct_answer"));
    }
}
