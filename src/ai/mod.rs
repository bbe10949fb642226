pub mod client;
pub mod generator;
pub mod prompt;

// Public API exports
pub use client::{
    CompletionProvider, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ModelConfig,
    OpenRouterClient, UnavailableProvider,
};
pub use generator::{generate_quiz, parse_quiz_response};
pub use prompt::{MAX_CONTEXT_CHARS, build_prompt, truncate_context};
