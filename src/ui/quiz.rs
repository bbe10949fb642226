use crate::app::App;
use crate::models::OPTIONS_PER_QUESTION;
use crate::ui::key_style;
use crate::ui::layout::{calculate_quiz_chunks, centered_rect};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const OPTION_LABELS: [char; OPTIONS_PER_QUESTION] = ['A', 'B', 'C', 'D'];

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let Some(quiz) = app.session.quiz() else {
        return;
    };
    let index = app.quiz_view.current.min(quiz.len() - 1);
    let Some(question) = quiz.get(index) else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());
    let chosen = app.session.answer_for(index);

    let progress = format!(
        "Question {} / {} • {} • answered {}/{}",
        index + 1,
        quiz.len(),
        app.session.settings().difficulty,
        app.session.answers().len(),
        quiz.len()
    );
    let header = Paragraph::new(progress)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_widget = Paragraph::new(Text::from(question.text()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let mut options = Text::default();
    for (i, option) in question.options().iter().enumerate() {
        let is_chosen = chosen == Some(option.as_str());
        let is_highlighted = app.quiz_view.highlighted == i;

        let marker = if is_highlighted { "▶ " } else { "  " };
        let check = if is_chosen { "(•)" } else { "( )" };
        let style = match (is_highlighted, is_chosen) {
            (true, _) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default(),
        };

        options.push_line(Line::from(vec![
            Span::styled(marker, key_style()),
            Span::styled(format!("{} {}. {}", check, OPTION_LABELS[i], option), style),
        ]));
        options.push_line(Line::from(""));
    }
    let options_widget = Paragraph::new(options)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options_widget, layout.options_area);

    let help_text = vec![
        Line::from(vec![
            Span::styled("↑/↓", key_style()),
            Span::from(" Highlight  "),
            Span::styled("Enter/1-4/a-d", key_style()),
            Span::from(" Choose  "),
            Span::styled("←/→", key_style()),
            Span::from(" Prev/Next Question"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+S", key_style()),
            Span::from(" Submit Quiz  "),
            Span::styled("Esc", key_style()),
            Span::from(" Cancel Quiz  "),
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit App"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);

    if app.quiz_view.confirm_cancel {
        draw_cancel_confirmation(f, app);
    }
}

fn draw_cancel_confirmation(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 11, f.area());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Cancel Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let answered = app.session.answers().len();
    let message = Paragraph::new(format!(
        "Return to setup? {} recorded answer(s) will be discarded.",
        answered
    ))
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Back to Setup)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
