pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod form;
pub mod input;
pub mod logger;
pub mod models;
pub mod scoring;
pub mod session;
pub mod ui;
pub mod utils;
pub mod worker;


// Re-exports for convenience
pub use ai::{
    generate_quiz, parse_quiz_response, CompletionProvider, ModelConfig, OpenRouterClient,
    UnavailableProvider, DEFAULT_MODEL,
};
pub use app::{AiStatus, App};
pub use config::AppConfig;
pub use error::{ExtractionError, GenerationError, QuizError, SessionError, ValidationError};
pub use extract::{extract_text, extract_text_from_path};
pub use input::{handle_key, handle_paste};
pub use models::{
    Difficulty, GenerationRequest, GenerationResponse, Question, Quiz, QuizSettings, Screen,
};
pub use scoring::{score, ScoreResult, NEGATIVE_MARKING_PENALTY};
pub use session::SessionState;
pub use ui::draw;
pub use worker::spawn_generation_worker;
