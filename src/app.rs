use crate::error::{GenerationError, QuizError};
use crate::form::SetupForm;
use crate::logger;
use crate::models::{GenerationRequest, GenerationResponse, QuizSettings, Screen};
use crate::session::SessionState;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::Sender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiStatus {
    Ready { model: String },
    Unavailable { reason: String },
}

/// Presentation-only state of the quiz screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizView {
    pub current: usize,
    pub highlighted: usize,
    pub confirm_cancel: bool,
}

#[derive(Debug)]
pub struct App {
    pub session: SessionState,
    pub form: SetupForm,
    pub quiz_view: QuizView,
    pub results_scroll: u16,
    pub ai_status: AiStatus,
    pub spinner_frame: usize,
    pub should_quit: bool,
    loading_started: Option<Instant>,
    request_tx: Sender<GenerationRequest>,
}

impl App {
    pub fn new(
        settings: QuizSettings,
        ai_status: AiStatus,
        request_tx: Sender<GenerationRequest>,
    ) -> Self {
        Self {
            session: SessionState::new(settings),
            form: SetupForm::default(),
            quiz_view: QuizView::default(),
            results_scroll: 0,
            ai_status,
            spinner_frame: 0,
            should_quit: false,
            loading_started: None,
            request_tx,
        }
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn loading_elapsed(&self) -> Option<Duration> {
        self.loading_started.map(|start| start.elapsed())
    }

    /// Validates the form and hands the request to the worker.
    pub fn generate(&mut self) {
        let filter = self.form.filter.value().to_string();
        if let Some(settings) = self.session.settings_mut() {
            settings.set_filter(&filter);
        }

        let request = match self.session.begin_generation(self.form.context_input()) {
            Ok(request) => request,
            Err(e) => {
                logger::log(&format!("Generate refused: {}", e));
                return;
            }
        };

        self.loading_started = Some(Instant::now());
        if let Err(e) = self.request_tx.try_send(request) {
            logger::log(&format!("Could not queue generation request: {}", e));
            let error = QuizError::from(GenerationError::Api(
                "generation worker is not running".to_string(),
            ));
            self.apply_failure(&error);
        }
    }

    pub fn handle_generation_response(&mut self, response: GenerationResponse) {
        match response {
            GenerationResponse::Ready(quiz) => {
                if let Err(e) = self.session.complete_generation(quiz) {
                    logger::log(&format!("Ignoring generated quiz: {}", e));
                    return;
                }
                self.loading_started = None;
                self.quiz_view = QuizView::default();
                self.results_scroll = 0;
            }
            GenerationResponse::Failed(error) => self.apply_failure(&error),
        }
    }

    fn apply_failure(&mut self, error: &QuizError) {
        if let Err(e) = self.session.fail_generation(error) {
            logger::log(&format!("Ignoring generation failure: {}", e));
            return;
        }
        self.loading_started = None;
    }

    pub fn select_option(&mut self, option_index: usize) {
        let index = self.quiz_view.current;
        let Some(option) = self
            .session
            .quiz()
            .and_then(|quiz| quiz.get(index))
            .and_then(|question| question.options().get(option_index))
            .cloned()
        else {
            return;
        };

        match self.session.select_answer(index, &option) {
            Ok(()) => {
                self.quiz_view.highlighted = option_index;
                self.next_question();
            }
            Err(e) => logger::log(&format!("Selection ignored: {}", e)),
        }
    }

    pub fn next_question(&mut self) {
        let total = self.session.quiz().map(|quiz| quiz.len()).unwrap_or(0);
        if self.quiz_view.current + 1 < total {
            self.quiz_view.current += 1;
            self.sync_highlight();
        }
    }

    pub fn previous_question(&mut self) {
        if self.quiz_view.current > 0 {
            self.quiz_view.current -= 1;
            self.sync_highlight();
        }
    }

    /// Highlight the chosen option when revisiting an answered question.
    fn sync_highlight(&mut self) {
        let index = self.quiz_view.current;
        self.quiz_view.highlighted = self
            .session
            .quiz()
            .and_then(|quiz| quiz.get(index))
            .zip(self.session.answer_for(index))
            .and_then(|(question, answer)| question.options().iter().position(|o| o == answer))
            .unwrap_or(0);
    }

    pub fn submit(&mut self) {
        match self.session.submit() {
            Ok(_) => self.results_scroll = 0,
            Err(e) => logger::log(&format!("Submit ignored: {}", e)),
        }
    }

    pub fn cancel_quiz(&mut self) {
        if let Err(e) = self.session.cancel() {
            logger::log(&format!("Cancel ignored: {}", e));
        }
        self.quiz_view = QuizView::default();
    }

    pub fn restart(&mut self) {
        if let Err(e) = self.session.reset() {
            logger::log(&format!("Reset ignored: {}", e));
        }
        self.quiz_view = QuizView::default();
        self.results_scroll = 0;
    }

    pub fn tick(&mut self) {
        if self.screen() == Screen::Loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::generator::TWO_QUESTION_REPLY;
    use crate::ai::parse_quiz_response;
    use tokio::sync::mpsc;

    const CONTEXT: &str =
        "The mitochondrion is the powerhouse of the cell and produces most of its ATP.";

    fn app_with_channel(capacity: usize) -> (App, mpsc::Receiver<GenerationRequest>) {
        let (tx, rx) = mpsc::channel(capacity);
        let status = AiStatus::Ready {
            model: "mock".to_string(),
        };
        (App::new(QuizSettings::default(), status, tx), rx)
    }

    fn app_in_quiz() -> App {
        let (mut app, _rx) = app_with_channel(1);
        app.form.context.insert_str(CONTEXT);
        app.generate();
        let quiz = parse_quiz_response(TWO_QUESTION_REPLY).unwrap();
        app.handle_generation_response(GenerationResponse::Ready(quiz));
        app
    }

    #[test]
    fn test_generate_queues_request() {
        let (mut app, mut rx) = app_with_channel(1);
        app.form.context.insert_str(CONTEXT);
        app.form.filter.insert_str("energy");
        app.generate();

        assert_eq!(app.screen(), Screen::Loading);
        assert!(app.loading_elapsed().is_some());
        let request = rx.try_recv().unwrap();
        assert_eq!(request.params().filter.as_deref(), Some("energy"));
    }

    #[test]
    fn test_generate_with_short_text_stays_in_setup() {
        let (mut app, mut rx) = app_with_channel(1);
        app.form.context.insert_str("tiny");
        app.generate();

        assert_eq!(app.screen(), Screen::Setup);
        assert!(app.session.error_message().is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_worker_returns_to_setup() {
        let (mut app, rx) = app_with_channel(1);
        drop(rx);
        app.form.context.insert_str(CONTEXT);
        app.generate();

        assert_eq!(app.screen(), Screen::Setup);
        assert_eq!(
            app.session.error_message(),
            Some("API Error: generation worker is not running")
        );
    }

    #[test]
    fn test_select_option_records_and_advances() {
        let mut app = app_in_quiz();
        app.select_option(0);

        assert_eq!(app.session.answer_for(0), Some("Oxygen"));
        assert_eq!(app.quiz_view.current, 1);
    }

    #[test]
    fn test_revisiting_restores_highlight() {
        let mut app = app_in_quiz();
        app.quiz_view.current = 1;
        app.select_option(2);
        app.previous_question();
        app.next_question();

        assert_eq!(app.quiz_view.current, 1);
        assert_eq!(app.quiz_view.highlighted, 2);
    }

    #[test]
    fn test_out_of_range_option_is_ignored() {
        let mut app = app_in_quiz();
        app.select_option(9);
        assert!(app.session.answers().is_empty());
        assert_eq!(app.quiz_view.current, 0);
    }

    #[test]
    fn test_submit_and_restart() {
        let mut app = app_in_quiz();
        app.select_option(0);
        app.submit();
        assert_eq!(app.screen(), Screen::Results);
        assert_eq!(app.session.score().unwrap().correct_count, 1);

        app.restart();
        assert_eq!(app.screen(), Screen::Setup);
        assert!(app.session.quiz().is_none());
        assert_eq!(app.quiz_view, QuizView::default());
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let (mut app, _rx) = app_with_channel(1);
        app.tick();
        assert_eq!(app.spinner_frame, 0);

        app.form.context.insert_str(CONTEXT);
        app.generate();
        app.tick();
        assert_eq!(app.spinner_frame, 1);
    }
}
