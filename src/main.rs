use context_quiz::{
    draw, handle_key, handle_paste, logger, spawn_generation_worker, AiStatus, App, AppConfig,
    CompletionProvider, OpenRouterClient, QuizSettings, UnavailableProvider,
};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_RATE: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> io::Result<()> {
    let (config, config_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logger::init(&config.log_file);
    logger::log("=== Context Quiz started ===");
    if let Some(e) = config_error {
        logger::log(&format!("Invalid configuration, using defaults: {}", e));
    }

    let (provider, ai_status): (Arc<dyn CompletionProvider>, AiStatus) =
        match OpenRouterClient::new(config.model.clone()) {
            Ok(client) => {
                logger::log(&format!("AI provider ready: {}", client.model_name()));
                let status = AiStatus::Ready {
                    model: client.model_name().to_string(),
                };
                (Arc::new(client), status)
            }
            Err(reason) => {
                logger::log(&format!("AI provider unavailable: {}", reason));
                let status = AiStatus::Unavailable {
                    reason: reason.clone(),
                };
                (Arc::new(UnavailableProvider::new(reason)), status)
            }
        };

    let (request_tx, request_rx) = mpsc::channel(1);
    let (response_tx, mut response_rx) = mpsc::channel(1);
    let worker = spawn_generation_worker(provider, request_rx, response_tx);

    let mut settings = QuizSettings::default();
    settings.set_requested_count(config.default_count);
    let mut app = App::new(settings, ai_status, request_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);

    let result = loop {
        if let Err(e) = terminal.draw(|f| draw(f, &mut app)) {
            break Err(e);
        }

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut app, key);
                }
                Some(Ok(Event::Paste(text))) => handle_paste(&mut app, &text),
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e),
                None => break Ok(()),
            },
            Some(response) = response_rx.recv() => app.handle_generation_response(response),
            _ = ticker.tick() => app.tick(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    worker.abort();
    logger::log("=== Context Quiz exited ===");
    result
}
