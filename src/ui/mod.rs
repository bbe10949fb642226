pub mod layout;
mod loading;
mod quiz;
mod results;
mod setup;

use crate::app::App;
use crate::models::Screen;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

pub use layout::{calculate_quiz_chunks, calculate_results_chunks, calculate_setup_chunks};
pub use loading::spinner_glyph;

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn draw(f: &mut Frame, app: &mut App) {
    match app.screen() {
        Screen::Setup => setup::draw_setup(f, app),
        Screen::Loading => loading::draw_loading(f, app),
        Screen::Quiz => quiz::draw_quiz(f, app),
        Screen::Results => results::draw_results(f, app),
    }
}
