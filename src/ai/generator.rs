use crate::ai::client::CompletionProvider;
use crate::ai::prompt::build_prompt;
use crate::error::GenerationError;
use crate::logger;
use crate::models::{GenerationParams, Question, Quiz};
use serde::Deserialize;
use serde_json::Value;

/// Strips Markdown fences and any prose around the outermost JSON object.
fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "question", alias = "text")]
    q: String,
    #[serde(alias = "options")]
    o: Vec<String>,
    #[serde(alias = "answer", alias = "correctAnswer", alias = "correct_answer")]
    a: String,
}

/// Entries that fail to decode or validate are dropped; the reply only fails
/// as a whole when its shape is wrong or nothing usable remains.
pub fn parse_quiz_response(response: &str) -> Result<Quiz, GenerationError> {
    let cleaned = clean_json_response(response);

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| GenerationError::InvalidJson(e.to_string()))?;

    let entries = match value.get("questions") {
        None => return Err(GenerationError::MissingQuestions),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(GenerationError::QuestionsNotArray),
    };

    let mut questions = Vec::with_capacity(entries.len());
    let mut dropped = 0;

    for (i, entry) in entries.iter().enumerate() {
        let raw: RawQuestion = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                logger::log(&format!("Dropping question {}: {}", i + 1, e));
                dropped += 1;
                continue;
            }
        };

        match Question::new(raw.q, raw.o, raw.a) {
            Ok(question) => questions.push(question),
            Err(e) => {
                logger::log(&format!("Dropping question {}: {}", i + 1, e));
                dropped += 1;
            }
        }
    }

    Quiz::new(questions).ok_or(GenerationError::NoValidQuestions { dropped })
}

/// One request, no retries.
pub async fn generate_quiz(
    provider: &dyn CompletionProvider,
    context: &str,
    params: &GenerationParams,
) -> Result<Quiz, GenerationError> {
    let prompt = build_prompt(context, params);
    logger::log(&format!(
        "Requesting {} {} questions from {}",
        params.count,
        params.difficulty,
        provider.model_name()
    ));

    let response = provider.complete(&prompt).await?;
    logger::log(&format!("Raw AI response: {}", response));

    let quiz = parse_quiz_response(&response)?;
    logger::log(&format!("Parsed {} questions", quiz.len()));
    Ok(quiz)
}

/// Test double returning a canned reply and recording the prompts it saw.
#[cfg(test)]
pub struct MockProvider {
    reply: Result<String, GenerationError>,
    prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
pub const TWO_QUESTION_REPLY: &str = r#"{
    "questions": [
        { "q": "What do plants release during photosynthesis?",
          "o": ["Oxygen", "Nitrogen", "Helium", "Argon"],
          "a": "Oxygen" },
        { "q": "Where does photosynthesis happen?",
          "o": ["Nucleus", "Chloroplast", "Ribosome", "Vacuole"],
          "a": "Chloroplast" }
    ]
}"#;
