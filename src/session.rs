use crate::error::{QuizError, SessionError, ValidationError};
use crate::logger;
use crate::models::{
    AnswerMap, ContextInput, GenerationParams, GenerationRequest, Quiz, QuizSettings, Screen,
};
use crate::scoring::{self, ScoreResult};

/// Shortest context (in characters, surrounding whitespace ignored) that can
/// be sent for generation.
pub const MIN_CONTEXT_CHARS: usize = 50;

/// Quiz lifecycle: Setup -> Loading -> Quiz -> Results, back to Setup on
/// failure, cancel or reset. The named transitions below are the only way to
/// change it.
#[derive(Debug, Clone)]
pub struct SessionState {
    screen: Screen,
    quiz: Option<Quiz>,
    answers: AnswerMap,
    settings: QuizSettings,
    error_message: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(QuizSettings::default())
    }
}

impl SessionState {
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            screen: Screen::Setup,
            quiz: None,
            answers: AnswerMap::new(),
            settings,
            error_message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Settings can only be edited before a quiz is requested.
    pub fn settings_mut(&mut self) -> Option<&mut QuizSettings> {
        if self.screen == Screen::Setup {
            Some(&mut self.settings)
        } else {
            None
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    fn expect_screen(&self, expected: Screen, action: &'static str) -> Result<(), SessionError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                screen: self.screen,
            })
        }
    }

    /// Setup -> Loading. A rejected input leaves the session in Setup with
    /// the error message set.
    pub fn begin_generation(
        &mut self,
        input: ContextInput,
    ) -> Result<GenerationRequest, SessionError> {
        self.expect_screen(Screen::Setup, "generate")?;

        let params = GenerationParams {
            count: self.settings.requested_count,
            difficulty: self.settings.difficulty,
            filter: self.settings.filter.clone(),
        };

        let request = match input {
            ContextInput::Text(text) => {
                let actual = text.trim().chars().count();
                if actual < MIN_CONTEXT_CHARS {
                    return Err(self.reject(ValidationError::ContextTooShort {
                        min: MIN_CONTEXT_CHARS,
                        actual,
                    }));
                }
                GenerationRequest::FromText { text, params }
            }
            ContextInput::Pdf(Some(path)) => GenerationRequest::FromPdf { path, params },
            ContextInput::Pdf(None) => {
                return Err(self.reject(ValidationError::NoFileSelected));
            }
        };

        self.error_message = None;
        self.screen = Screen::Loading;
        logger::log(&format!(
            "Generation started: {} questions, {}",
            request.params().count,
            request.params().difficulty
        ));
        Ok(request)
    }

    fn reject(&mut self, error: ValidationError) -> SessionError {
        self.error_message = Some(error.to_string());
        SessionError::Rejected(error)
    }

    /// Loading -> Quiz.
    pub fn complete_generation(&mut self, quiz: Quiz) -> Result<(), SessionError> {
        self.expect_screen(Screen::Loading, "store a quiz")?;

        if quiz.len() != self.settings.requested_count {
            logger::log(&format!(
                "Requested {} questions, received {}",
                self.settings.requested_count,
                quiz.len()
            ));
        }

        self.quiz = Some(quiz);
        self.answers.clear();
        self.error_message = None;
        self.screen = Screen::Quiz;
        Ok(())
    }

    /// Loading -> Setup.
    pub fn fail_generation(&mut self, error: &QuizError) -> Result<(), SessionError> {
        self.expect_screen(Screen::Loading, "report a failure")?;

        logger::log(&format!("Generation failed: {}", error));
        self.error_message = Some(error.to_string());
        self.screen = Screen::Setup;
        Ok(())
    }

    /// Overwrites any earlier selection for the question.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), SessionError> {
        self.expect_screen(Screen::Quiz, "answer")?;

        let question = self
            .quiz
            .as_ref()
            .and_then(|quiz| quiz.get(index))
            .ok_or(SessionError::QuestionOutOfRange(index))?;

        if !question.has_option(option) {
            return Err(SessionError::UnknownOption {
                index,
                option: option.to_string(),
            });
        }

        self.answers.insert(index, option.to_string());
        Ok(())
    }

    /// Quiz -> Results. Unanswered questions stay absent from the answers.
    pub fn submit(&mut self) -> Result<ScoreResult, SessionError> {
        self.expect_screen(Screen::Quiz, "submit")?;

        let result = self.score().ok_or(SessionError::InvalidTransition {
            action: "submit",
            screen: Screen::Quiz,
        })?;
        self.screen = Screen::Results;
        logger::log(&format!(
            "Submitted: {} correct, {} incorrect, score {:.2}",
            result.correct_count, result.incorrect_count, result.final_score
        ));
        Ok(result)
    }

    /// Results -> Setup.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.expect_screen(Screen::Results, "reset")?;
        self.discard();
        Ok(())
    }

    /// Quiz -> Setup.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.expect_screen(Screen::Quiz, "cancel")?;
        self.discard();
        Ok(())
    }

    fn discard(&mut self) {
        self.quiz = None;
        self.answers.clear();
        self.error_message = None;
        self.screen = Screen::Setup;
    }

    /// Recomputed from the current answers on every call.
    pub fn score(&self) -> Option<ScoreResult> {
        self.quiz
            .as_ref()
            .map(|quiz| scoring::score(quiz, &self.answers, self.settings.negative_marking))
    }
}
