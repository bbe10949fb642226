use crate::error::{QuestionError, QuizError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub const MIN_QUESTION_COUNT: usize = 1;
pub const MAX_QUESTION_COUNT: usize = 500;
pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Selected option per question index.
pub type AnswerMap = BTreeMap<usize, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount(options.len()));
        }
        for (i, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::BlankOption(i + 1));
            }
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOptions);
            }
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::AnswerNotInOptions(correct_answer));
        }

        Ok(Self {
            text,
            options,
            correct_answer,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// A generated question set. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            None
        } else {
            Some(Self { questions })
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Mixed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Mixed => "Mixed",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Loading,
    Quiz,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    pub requested_count: usize,
    pub difficulty: Difficulty,
    pub filter: Option<String>,
    pub negative_marking: bool,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            requested_count: DEFAULT_QUESTION_COUNT,
            difficulty: Difficulty::default(),
            filter: None,
            negative_marking: false,
        }
    }
}

impl QuizSettings {
    pub fn set_requested_count(&mut self, count: usize) {
        self.requested_count = count.clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
    }

    /// Blank filters count as no filter.
    pub fn set_filter(&mut self, filter: &str) {
        let trimmed = filter.trim();
        self.filter = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
}

/// Where the context for a quiz comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextInput {
    Text(String),
    Pdf(Option<PathBuf>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub count: usize,
    pub difficulty: Difficulty,
    pub filter: Option<String>,
}

/// A validated request handed to the generation worker.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    FromText {
        text: String,
        params: GenerationParams,
    },
    FromPdf {
        path: PathBuf,
        params: GenerationParams,
    },
}

impl GenerationRequest {
    pub fn params(&self) -> &GenerationParams {
        match self {
            GenerationRequest::FromText { params, .. } => params,
            GenerationRequest::FromPdf { params, .. } => params,
        }
    }
}

#[derive(Debug)]
pub enum GenerationResponse {
    Ready(Quiz),
    Failed(QuizError),
}
