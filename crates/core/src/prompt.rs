//! Prompt construction for the generation operations.
//!
//! Each generation prompt embeds an example of the exact JSON shape the
//! model must return, fenced as a ```json block, and instructs the model
//! to answer with a fenced block only.

/// System message for topic summaries.
pub const SUMMARY_SYSTEM: &str =
    "You are an AI tutor tasked with providing a brief summary of a given topic.";

/// System message for lesson plan generation.
pub const LESSON_PLAN_SYSTEM: &str =
    "You are an educational assistant that creates detailed lesson plans.";

/// System message for lesson content generation.
pub const LESSON_CONTENT_SYSTEM: &str =
    "You are an educational assistant that creates detailed lesson content and quizzes.";

/// Builds the user message asking for a brief summary of `topic`.
pub fn summary_prompt(topic: &str) -> String {
    format!("Provide a brief summary of the topic: {topic}")
}

/// Builds the user message asking for a lesson plan over `topic`,
/// grounded in an already-generated `summary`.
pub fn lesson_plan_prompt(topic: &str, summary: &str) -> String {
    format!(
        r#"Create a detailed lesson plan for the topic "{topic}" based on the following summary: {summary}. The lesson plan should include the following:

1. Title of the Lesson Plan
2. A list of lessons with titles and brief descriptions
3. Each lesson should cover specific aspects of the topic

**Please provide the lesson plan in JSON format only, enclosed within triple backticks as shown below:**

```json
{{
  "title": "Lesson Plan Title",
  "topic": "{topic}",
  "summary": "Brief summary of the topic.",
  "lessons": [
    {{ "title": "Lesson 1", "description": "Description of Lesson 1" }},
    {{ "title": "Lesson 2", "description": "Description of Lesson 2" }},
    {{ "title": "Lesson 3", "description": "Description of Lesson 3" }},
    {{ "title": "Lesson 4", "description": "Description of Lesson 4" }}
  ]
}}
```"#
    )
}

/// Builds the user message asking for the content and quiz of one lesson.
pub fn lesson_content_prompt(title: &str, description: &str, topic: &str, summary: &str) -> String {
    format!(
        r#"You are an educational assistant that creates detailed lesson content and quizzes.

Topic: {topic}
Lesson Title: {title}
Lesson Description: {description}
Summary: {summary}

**Please provide the lesson content and quiz questions in JSON format only, enclosed within triple backticks as shown below:**

```json
{{
  "content": "Detailed lesson content here...",
  "quiz": [
    {{
      "question": "Quiz question 1",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "Option B"
    }},
    {{
      "question": "Quiz question 2",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "Option D"
    }},
    {{
      "question": "Quiz question 3",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "Option A"
    }}
  ]
}}
```"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_names_the_topic() {
        let prompt = summary_prompt("Photosynthesis");
        assert_eq!(
            prompt,
            "Provide a brief summary of the topic: Photosynthesis"
        );
    }

    #[test]
    fn lesson_plan_prompt_embeds_topic_and_summary() {
        let prompt = lesson_plan_prompt("Softball", "A bat-and-ball sport.");
        assert!(prompt.contains(r#"for the topic "Softball""#));
        assert!(prompt.contains("based on the following summary: A bat-and-ball sport."));
        assert!(prompt.contains("```json"));
        assert!(prompt.contains(r#""lessons": ["#));
    }

    #[test]
    fn lesson_content_prompt_embeds_all_context_fields() {
        let prompt = lesson_content_prompt(
            "Pitching",
            "Underhand pitching basics.",
            "Softball",
            "A bat-and-ball sport.",
        );
        assert!(prompt.contains("Topic: Softball"));
        assert!(prompt.contains("Lesson Title: Pitching"));
        assert!(prompt.contains("Lesson Description: Underhand pitching basics."));
        assert!(prompt.contains("Summary: A bat-and-ball sport."));
        assert!(prompt.contains(r#""correctAnswer": "Option B""#));
    }
}
