use crate::ai::{CompletionProvider, generate_quiz};
use crate::error::{QuizError, ValidationError};
use crate::extract::extract_text_from_path;
use crate::logger;
use crate::models::{GenerationRequest, GenerationResponse, Quiz};
use crate::session::MIN_CONTEXT_CHARS;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinHandle;

/// Handles requests one at a time until the request channel closes.
pub fn spawn_generation_worker(
    provider: Arc<dyn CompletionProvider>,
    mut requests: Receiver<GenerationRequest>,
    responses: Sender<GenerationResponse>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        logger::log("Generation worker started");
        while let Some(request) = requests.recv().await {
            let response = match run_request(provider.as_ref(), request).await {
                Ok(quiz) => {
                    logger::log("Worker sending generated quiz");
                    GenerationResponse::Ready(quiz)
                }
                Err(e) => {
                    logger::log(&format!("Worker error: {}", e));
                    GenerationResponse::Failed(e)
                }
            };

            if responses.send(response).await.is_err() {
                break;
            }
        }
        logger::log("Worker channel disconnected, exiting");
    })
}

/// Extraction (for PDFs) then generation, strictly in sequence.
pub async fn run_request(
    provider: &dyn CompletionProvider,
    request: GenerationRequest,
) -> Result<Quiz, QuizError> {
    let (context, params) = match request {
        GenerationRequest::FromText { text, params } => (text, params),
        GenerationRequest::FromPdf { path, params } => {
            logger::log(&format!("Extracting text from {}", path.display()));
            let text = extract_text_from_path(&path).await?;
            let actual = text.trim().chars().count();
            if actual < MIN_CONTEXT_CHARS {
                return Err(ValidationError::ContextTooShort {
                    min: MIN_CONTEXT_CHARS,
                    actual,
                }
                .into());
            }
            (text, params)
        }
    };

    Ok(generate_quiz(provider, &context, &params).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::generator::{MockProvider, TWO_QUESTION_REPLY};
    use crate::error::{ExtractionError, GenerationError};
    use crate::extract::tests::build_pdf;
    use crate::models::{Difficulty, GenerationParams};
    use std::io::Write;
    use std::path::PathBuf;
    use tokio::sync::mpsc;

    fn params() -> GenerationParams {
        GenerationParams {
            count: 2,
            difficulty: Difficulty::Easy,
            filter: None,
        }
    }

    #[tokio::test]
    async fn test_text_request_generates_quiz() {
        let provider = MockProvider::replying(TWO_QUESTION_REPLY);
        let request = GenerationRequest::FromText {
            text: "Plants convert light into chemical energy inside chloroplasts.".to_string(),
            params: params(),
        };
        let quiz = run_request(&provider, request).await.unwrap();
        assert_eq!(quiz.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_pdf_fails_before_generation() {
        let provider = MockProvider::replying(TWO_QUESTION_REPLY);
        let request = GenerationRequest::FromPdf {
            path: PathBuf::from("/no/such/file.pdf"),
            params: params(),
        };
        let err = run_request(&provider, request).await.unwrap_err();
        assert!(matches!(err, QuizError::Extraction(ExtractionError::Io(_))));
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_short_pdf_text_is_rejected_after_extraction() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&build_pdf(&["Too short"])).unwrap();

        let provider = MockProvider::replying(TWO_QUESTION_REPLY);
        let request = GenerationRequest::FromPdf {
            path: file.path().to_path_buf(),
            params: params(),
        };
        let err = run_request(&provider, request).await.unwrap_err();
        assert!(matches!(
            err,
            QuizError::Validation(ValidationError::ContextTooShort { .. })
        ));
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_worker_round_trip() {
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(MockProvider::failing(GenerationError::Api("offline".to_string())));
        let (request_tx, request_rx) = mpsc::channel(4);
        let (response_tx, mut response_rx) = mpsc::channel(4);
        let handle = spawn_generation_worker(provider, request_rx, response_tx);

        request_tx
            .send(GenerationRequest::FromText {
                text: "x".repeat(80),
                params: params(),
            })
            .await
            .unwrap();

        match response_rx.recv().await {
            Some(GenerationResponse::Failed(QuizError::Generation(GenerationError::Api(msg)))) => {
                assert_eq!(msg, "offline");
            }
            other => panic!("unexpected response: {:?}", other),
        }

        drop(request_tx);
        handle.await.unwrap();
    }
}
