use crate::models::Screen;
use thiserror::Error;

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide more context (at least {min} chars, got {actual}).")]
    ContextTooShort { min: usize, actual: usize },
    #[error("Please select a PDF file first.")]
    NoFileSelected,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a readable PDF: {0}")]
    Parse(String),
    #[error("PDF is password protected")]
    Encrypted,
    #[error("PDF has no pages")]
    NoPages,
    #[error("failed to extract page {page}: {message}")]
    Page { page: u32, message: String },
    #[error("PDF library unavailable: {0}")]
    Worker(String),
}

impl From<lopdf::Error> for ExtractionError {
    fn from(e: lopdf::Error) -> Self {
        ExtractionError::Parse(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Api(String),
    #[error("no response choices received")]
    EmptyResponse,
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("reply has no \"questions\" field")]
    MissingQuestions,
    #[error("\"questions\" in reply is not a list")]
    QuestionsNotArray,
    #[error("reply contained no usable questions ({dropped} rejected)")]
    NoValidQuestions { dropped: usize },
}

/// Everything that can end a generation attempt. The display string is what
/// the setup screen shows.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("PDF Error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("API Error: {0}")]
    Generation(#[from] GenerationError),
}

/// Why a question from the reply was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,
    #[error("expected 4 options, got {0}")]
    OptionCount(usize),
    #[error("option {0} is blank")]
    BlankOption(usize),
    #[error("options are not distinct")]
    DuplicateOptions,
    #[error("correct answer {0:?} is not one of the options")]
    AnswerNotInOptions(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while on the {screen:?} screen")]
    InvalidTransition { action: &'static str, screen: Screen },
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    #[error("question {0} does not exist")]
    QuestionOutOfRange(usize),
    #[error("{option:?} is not an option of question {index}")]
    UnknownOption { index: usize, option: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
