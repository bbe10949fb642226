use crate::logger;
use crate::models::{Difficulty, GenerationParams};

/// Longest context, in characters, embedded in a prompt.
pub const MAX_CONTEXT_CHARS: usize = 40_000;

const DEFAULT_FOCUS: &str = "general key concepts";

/// Keeps the first `MAX_CONTEXT_CHARS` characters, never splitting one.
pub fn truncate_context(text: &str) -> &str {
    match text.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn difficulty_instruction(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy (direct recall of facts stated in the text)",
        Difficulty::Medium => "Medium (understanding and simple application)",
        Difficulty::Hard => "Hard (analysis, inference and subtle distractors)",
        Difficulty::Mixed => "Mixed (a blend of easy, medium and hard questions)",
    }
}

/// JSON shape the reply must follow.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "q": { "type": "string" },
                        "o": {
                            "type": "array",
                            "items": { "type": "string" },
                            "minItems": 4,
                            "maxItems": 4
                        },
                        "a": { "type": "string" }
                    },
                    "required": ["q", "o", "a"]
                }
            }
        },
        "required": ["questions"]
    })
}

pub fn build_prompt(context: &str, params: &GenerationParams) -> String {
    let truncated = truncate_context(context);
    if truncated.len() < context.len() {
        logger::log(&format!(
            "Context truncated to {} characters (from {})",
            MAX_CONTEXT_CHARS,
            context.chars().count()
        ));
    }

    let focus = params
        .filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FOCUS);

    format!(
        r#"Generate a JSON quiz with exactly {count} multiple-choice questions from the text below.
Difficulty: {difficulty}.
Focus on: {focus}.

Rules:
- Every question has exactly 4 distinct options.
- "a" must be copied character for character from one of the options.
- Use only information found in the text.

Response MUST be a single JSON object matching this schema (no markdown, no extra text):
{schema}

Example:
{{ "questions": [ {{ "q": "question text", "o": ["opt1", "opt2", "opt3", "opt4"], "a": "opt2" }} ] }}

Text:
{text}"#,
        count = params.count,
        difficulty = difficulty_instruction(params.difficulty),
        focus = focus,
        schema = response_schema(),
        text = truncated,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(filter: Option<&str>) -> GenerationParams {
        GenerationParams {
            count: 7,
            difficulty: Difficulty::Hard,
            filter: filter.map(str::to_string),
        }
    }

    #[test]
    fn test_short_context_untouched() {
        assert_eq!(truncate_context("short"), "short");
    }

    #[test]
    fn test_long_context_keeps_prefix() {
        let context = "a".repeat(MAX_CONTEXT_CHARS) + &"b".repeat(60_000);
        let truncated = truncate_context(&context);
        assert_eq!(truncated.chars().count(), MAX_CONTEXT_CHARS);
        assert!(!truncated.contains('b'));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let context = "é".repeat(MAX_CONTEXT_CHARS + 10);
        let truncated = truncate_context(&context);
        assert_eq!(truncated.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn test_prompt_embeds_only_first_40k_chars() {
        let context = format!("{}{}", "x".repeat(MAX_CONTEXT_CHARS), "TAIL".repeat(15_000));
        assert_eq!(context.chars().count(), 100_000);

        let prompt = build_prompt(&context, &params(None));
        assert!(prompt.contains(&"x".repeat(MAX_CONTEXT_CHARS)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn test_prompt_mentions_parameters() {
        let prompt = build_prompt("Cells are the basic unit of life.", &params(Some("organelles")));
        assert!(prompt.contains("exactly 7 multiple-choice questions"));
        assert!(prompt.contains("Difficulty: Hard"));
        assert!(prompt.contains("Focus on: organelles."));
        assert!(prompt.contains("Cells are the basic unit of life."));
        assert!(prompt.contains("\"questions\""));
    }

    #[test]
    fn test_prompt_defaults_focus() {
        let prompt = build_prompt("text", &params(None));
        assert!(prompt.contains("Focus on: general key concepts."));
        let prompt = build_prompt("text", &params(Some("   ")));
        assert!(prompt.contains("Focus on: general key concepts."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt("same text", &params(Some("topic")));
        let b = build_prompt("same text", &params(Some("topic")));
        assert_eq!(a, b);
    }
}
