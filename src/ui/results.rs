use crate::app::App;
use crate::models::Quiz;
use crate::scoring::{ScoreResult, NEGATIVE_MARKING_PENALTY};
use crate::ui::key_style;
use crate::ui::layout::calculate_results_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_results(f: &mut Frame, app: &mut App) {
    let (Some(quiz), Some(result)) = (app.session.quiz(), app.session.score()) else {
        return;
    };
    let layout = calculate_results_chunks(f.area());
    let negative_marking = app.session.settings().negative_marking;

    let title = Paragraph::new("Quiz Results")
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let score = Paragraph::new(score_lines(&result, quiz.len(), negative_marking))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    f.render_widget(score, layout.score_area);

    let review = review_text(app, quiz);
    let review_width = layout.review_area.width.saturating_sub(2) as usize;
    let visible_height = layout.review_area.height.saturating_sub(2) as usize;
    let content_height = estimate_height(&review, review_width);
    let max_scroll = content_height.saturating_sub(visible_height) as u16;
    let scroll = app.results_scroll.min(max_scroll);

    let review_widget = Paragraph::new(review)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Review"));
    f.render_widget(review_widget, layout.review_area);
    app.results_scroll = scroll;

    let help_text = vec![Line::from(vec![
        Span::styled("↑/↓", key_style()),
        Span::from(" Scroll  "),
        Span::styled("Enter/r", key_style()),
        Span::from(" New Quiz  "),
        Span::styled("Esc/q", key_style()),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

fn score_lines(result: &ScoreResult, total: usize, negative_marking: bool) -> Vec<Line<'static>> {
    let score_color = if result.final_score < 0.0 {
        Color::Red
    } else {
        Color::Green
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{:.2} / {}  ({:.0}%)",
                result.final_score,
                total,
                result.percentage(total)
            ),
            Style::default()
                .fg(score_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("✓ {} correct", result.correct_count),
                Style::default().fg(Color::Green),
            ),
            Span::from("   "),
            Span::styled(
                format!("✗ {} incorrect", result.incorrect_count),
                Style::default().fg(Color::Red),
            ),
            Span::from("   "),
            Span::styled(
                format!("– {} unanswered", result.unanswered_count(total)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    if negative_marking {
        lines.push(Line::from(Span::styled(
            format!(
                "Negative marking: -{} per incorrect answer",
                NEGATIVE_MARKING_PENALTY
            ),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}

fn review_text(app: &App, quiz: &Quiz) -> Text<'static> {
    let mut text = Text::default();

    for (i, question) in quiz.questions().iter().enumerate() {
        let answer = app.session.answer_for(i);
        let (mark, color) = match answer {
            Some(a) if a == question.correct_answer() => ("✓", Color::Green),
            Some(_) => ("✗", Color::Red),
            None => ("–", Color::DarkGray),
        };

        text.push_line(Line::from(vec![
            Span::styled(
                format!("{} ", mark),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::from(format!("{}. {}", i + 1, truncate_string(question.text(), 200))),
        ]));
        text.push_line(Line::from(format!(
            "   Your answer: {}",
            answer.unwrap_or("(none)")
        )));
        if answer != Some(question.correct_answer()) {
            text.push_line(Line::from(Span::styled(
                format!("   Correct: {}", question.correct_answer()),
                Style::default().fg(Color::Green),
            )));
        }
        text.push_line(Line::from(""));
    }
    text
}

/// Rough wrapped height, used to bound scrolling.
fn estimate_height(text: &Text, width: usize) -> usize {
    let width = width.max(1);
    text.lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}
