use crate::app::App;
use crate::ui::key_style;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

pub fn draw_loading(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 9, f.area());
    let settings = app.session.settings();
    let elapsed = app
        .loading_elapsed()
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let focus = settings.filter.as_deref().unwrap_or("general key concepts");
    let lines = vec![
        Line::from(vec![
            Span::styled(spinner_glyph(app.spinner_frame), key_style()),
            Span::styled(" Generating quiz...", key_style()),
        ]),
        Line::from(""),
        Line::from(format!(
            "{} questions • {}",
            settings.requested_count, settings.difficulty
        )),
        Line::from(format!("Focus: {}", focus)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Elapsed: {}s", elapsed),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Please wait"));
    f.render_widget(panel, area);
}
