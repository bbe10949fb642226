use crate::app::{AiStatus, App};
use crate::form::{FormField, SourceMode, TextField};
use crate::models::{MAX_QUESTION_COUNT, MIN_QUESTION_COUNT};
use crate::session::MIN_CONTEXT_CHARS;
use crate::ui::key_style;
use crate::ui::layout::calculate_setup_chunks;
use crate::utils::{cursor_position, wrap_text};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_setup(f: &mut Frame, app: &App) {
    let layout = calculate_setup_chunks(f.area());
    let focus = app.form.focus;

    let title = Paragraph::new("Context Quiz v0.1.0")
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    draw_source_toggle(f, app, layout.source_area);

    match app.form.source {
        SourceMode::Text => draw_text_editor(
            f,
            &app.form.context,
            layout.context_area,
            focus == FormField::Context,
        ),
        SourceMode::Pdf => draw_pdf_path(f, app, layout.context_area),
    }

    draw_settings(f, app, layout.settings_area);

    let message = match app.session.error_message() {
        Some(error) => Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        None => match &app.ai_status {
            AiStatus::Ready { model } => Paragraph::new(format!("AI: Ready  Model: {}", model))
                .style(Style::default().fg(Color::Green)),
            AiStatus::Unavailable { reason } => {
                Paragraph::new(format!("AI: Unavailable ({})  Set OPENROUTER_API_KEY", reason))
                    .style(Style::default().fg(Color::Yellow))
            }
        },
    };
    f.render_widget(
        message
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Status")),
        layout.message_area,
    );

    let help_text = vec![Line::from(vec![
        Span::styled("Tab", key_style()),
        Span::from(" Next Field  "),
        Span::styled("←/→", key_style()),
        Span::from(" Change  "),
        Span::styled("Ctrl+G", key_style()),
        Span::from(" Generate  "),
        Span::styled("Ctrl+U", key_style()),
        Span::from(" Clear Field  "),
        Span::styled("Esc/Ctrl+C", key_style()),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_source_toggle(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.form.focus == FormField::Source;
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        tab("Paste Text", app.form.source == SourceMode::Text),
        Span::from("   "),
        tab("PDF File", app.form.source == SourceMode::Pdf),
    ]);
    let toggle = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("Source"),
    );
    f.render_widget(toggle, area);
}

fn draw_text_editor(f: &mut Frame, field: &TextField, area: Rect, focused: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible_height = area.height.saturating_sub(2) as usize;
    let chars = field.char_count();
    let title = format!("Context ({} chars, min {})", chars, MIN_CONTEXT_CHARS);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(title);

    if field.value().is_empty() {
        let placeholder = Paragraph::new("[Paste or type the material to be quizzed on...]")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        if focused {
            f.set_cursor_position((area.x + 1, area.y + 1));
        }
        return;
    }

    let (cursor_line, cursor_col) = cursor_position(field.value(), field.cursor(), inner_width);
    // Keep the cursor line on screen.
    let scroll = cursor_line.saturating_sub(visible_height.saturating_sub(1));

    let lines: Vec<Line> = wrap_text(field.value(), inner_width)
        .into_iter()
        .skip(scroll)
        .take(visible_height)
        .map(|line| Line::from(line.text))
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);

    if focused {
        let x = area.x + 1 + cursor_col as u16;
        let y = area.y + 1 + (cursor_line - scroll) as u16;
        f.set_cursor_position((x, y));
    }
}

fn draw_pdf_path(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.form.focus == FormField::Context;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let path = &app.form.pdf_path;
    let content = if path.value().is_empty() {
        Span::styled(
            "[Type or paste the path to a PDF file...]",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::from(path.value().to_string())
    };
    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title("PDF File"),
    );
    f.render_widget(input, chunks[0]);

    let note = Paragraph::new(
        "Text is extracted page by page when you generate. \
         Scanned (image-only) PDFs contain no text and will be rejected.",
    )
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    f.render_widget(note, chunks[1]);

    if focused {
        let (_, col) = cursor_position(path.value(), path.cursor(), usize::MAX);
        let x = (chunks[0].x + 1 + col as u16).min(chunks[0].right().saturating_sub(2));
        f.set_cursor_position((x, chunks[0].y + 1));
    }
}

fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let settings = app.session.settings();
    let focus = app.form.focus;

    let filter_text = if app.form.filter.value().is_empty() {
        "(general key concepts)".to_string()
    } else {
        app.form.filter.value().to_string()
    };

    let row = |label: &'static str, value: String, field: FormField| {
        let marker = if focus == field { "▶ " } else { "  " };
        Line::from(vec![
            Span::styled(marker, key_style()),
            Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, value_style(focus == field)),
        ])
    };

    let lines = vec![
        row(
            "Questions",
            format!(
                "◀ {} ▶  ({}-{})",
                settings.requested_count, MIN_QUESTION_COUNT, MAX_QUESTION_COUNT
            ),
            FormField::Count,
        ),
        row(
            "Difficulty",
            format!("◀ {} ▶", settings.difficulty),
            FormField::Difficulty,
        ),
        row("Focus", filter_text, FormField::Filter),
        row(
            "Negative marks",
            if settings.negative_marking {
                "[x] On (-0.25 per wrong answer)".to_string()
            } else {
                "[ ] Off".to_string()
            },
            FormField::NegativeMarking,
        ),
    ];

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(panel, area);

    if focus == FormField::Filter {
        let (_, col) = cursor_position(app.form.filter.value(), app.form.filter.cursor(), usize::MAX);
        // marker (2) + label (16) inside the border
        let x = (area.x + 1 + 18 + col as u16).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 3));
    }
}
