//! Prompt construction for the three delegated AI operations.
//!
//! Prompts are fixed instructional templates embedding note title/content or
//! chat context; the delegation layer never varies model parameters per user.

/// System instruction for summary generation.
pub const SUMMARY_SYSTEM: &str = "You are a helpful assistant that creates concise, informative \
     summaries of study notes. Focus on the main concepts, key points, and important details.";

/// System instruction for quiz generation.
pub const QUIZ_SYSTEM: &str = "You are a helpful assistant that creates educational quizzes based \
     on study notes. Always respond with valid JSON format. Focus on testing understanding of \
     key concepts.";

/// System instruction for chat without note context.
pub const CHAT_SYSTEM: &str =
    "You are a helpful AI study assistant. Help users with their study-related questions.";

/// Build the user prompt for summary generation.
pub fn summary_prompt(content: &str, title: Option<&str>) -> String {
    let titled = match title {
        Some(t) => format!(" titled \"{}\"", t),
        None => String::new(),
    };
    format!(
        "Please provide a concise summary of the following note{}:\n\n{}\n\nSummary:",
        titled, content
    )
}

/// Build the user prompt for quiz generation.
///
/// The model is instructed to return a JSON object with a `title` and a list
/// of multiple-choice `questions`; the delegation layer validates that shape
/// before anything is persisted.
pub fn quiz_prompt(content: &str, title: Option<&str>) -> String {
    let titled = match title {
        Some(t) => format!(" titled \"{}\"", t),
        None => String::new(),
    };
    format!(
        "Based on the following note{}, create a quiz with 3-5 multiple choice questions. \
         Each question should have 4 options (A, B, C, D) and include the correct answer and \
         a brief explanation.\n\nNote content:\n{}\n\n\
         Please format the response as a JSON object with the following structure:\n\
         {{\n\
         \x20 \"title\": \"Quiz for [note title]\",\n\
         \x20 \"questions\": [\n\
         \x20   {{\n\
         \x20     \"id\": 1,\n\
         \x20     \"question\": \"Question text here?\",\n\
         \x20     \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],\n\
         \x20     \"correctAnswer\": 0,\n\
         \x20     \"explanation\": \"Explanation of why this is correct\"\n\
         \x20   }}\n\
         \x20 ]\n\
         }}",
        titled, content
    )
}

/// Build the system instruction for a chat turn, with optional note context.
pub fn chat_system(context: Option<&str>) -> String {
    match context {
        Some(ctx) => format!(
            "You are a helpful AI study assistant. Use the following context to help answer \
             questions: {}",
            ctx
        ),
        None => CHAT_SYSTEM.to_string(),
    }
}

/// Render a note's title and content as chat context.
pub fn note_context(title: Option<&str>, content: &str) -> String {
    format!(
        "Note title: {}\nNote content: {}",
        title.unwrap_or("Untitled"),
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_embeds_title_and_content() {
        let prompt = summary_prompt("Mitochondria are organelles.", Some("Cells"));
        assert!(prompt.contains("titled \"Cells\""));
        assert!(prompt.contains("Mitochondria are organelles."));
        assert!(prompt.ends_with("Summary:"));
    }

    #[test]
    fn test_summary_prompt_without_title() {
        let prompt = summary_prompt("Body", None);
        assert!(!prompt.contains("titled"));
        assert!(prompt.contains("Body"));
    }

    #[test]
    fn test_quiz_prompt_describes_json_shape() {
        let prompt = quiz_prompt("Content", Some("Cells"));
        assert!(prompt.contains("\"correctAnswer\": 0"));
        assert!(prompt.contains("\"questions\""));
        assert!(prompt.contains("3-5 multiple choice questions"));
    }

    #[test]
    fn test_chat_system_with_and_without_context() {
        assert_eq!(chat_system(None), CHAT_SYSTEM);
        let with = chat_system(Some("Note title: Cells\nNote content: ..."));
        assert!(with.contains("Use the following context"));
        assert!(with.contains("Cells"));
    }

    #[test]
    fn test_note_context_defaults_untitled() {
        let ctx = note_context(None, "body");
        assert!(ctx.starts_with("Note title: Untitled"));
        assert!(ctx.contains("Note content: body"));
    }
}
