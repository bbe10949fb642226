use crate::app::App;
use crate::form::{FormField, SourceMode};
use crate::models::{OPTIONS_PER_QUESTION, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const COUNT_PAGE_STEP: usize = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen() {
        Screen::Setup => handle_setup_input(app, key),
        // Nothing to do but wait; there is no cancel while a request is out.
        Screen::Loading => {}
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Results => handle_results_input(app, key),
    }
}

/// Bracketed paste goes into whichever text field has focus.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.screen() != Screen::Setup {
        return;
    }
    let single_line = app.form.focus != FormField::Context
        || app.form.source == SourceMode::Pdf;
    if let Some(field) = app.form.focused_text_mut() {
        if single_line {
            field.insert_str(&text.replace(['\r', '\n'], " "));
        } else {
            field.insert_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        }
    }
}

fn handle_setup_input(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('g') if ctrl => {
            app.generate();
            return;
        }
        KeyCode::Char('u') if ctrl => {
            if let Some(field) = app.form.focused_text_mut() {
                field.clear();
            }
            return;
        }
        KeyCode::Tab => {
            app.form.focus = app.form.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.form.focus = app.form.focus.previous();
            return;
        }
        _ => {}
    }

    match app.form.focus {
        FormField::Source => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                app.form.source = app.form.source.toggled();
            }
            KeyCode::Enter => app.generate(),
            _ => {}
        },
        FormField::Context | FormField::Filter => edit_text(app, key),
        FormField::Count => {
            let Some(settings) = app.session.settings_mut() else {
                return;
            };
            let count = settings.requested_count;
            match key.code {
                KeyCode::Left | KeyCode::Char('-') => {
                    settings.set_requested_count(count.saturating_sub(1))
                }
                KeyCode::Right | KeyCode::Char('+') => settings.set_requested_count(count + 1),
                KeyCode::PageDown => {
                    settings.set_requested_count(count.saturating_sub(COUNT_PAGE_STEP))
                }
                KeyCode::PageUp => settings.set_requested_count(count + COUNT_PAGE_STEP),
                KeyCode::Enter => app.generate(),
                _ => {}
            }
        }
        FormField::Difficulty => match key.code {
            KeyCode::Left => {
                if let Some(settings) = app.session.settings_mut() {
                    settings.difficulty = settings.difficulty.previous();
                }
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                if let Some(settings) = app.session.settings_mut() {
                    settings.difficulty = settings.difficulty.next();
                }
            }
            KeyCode::Enter => app.generate(),
            _ => {}
        },
        FormField::NegativeMarking => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                if let Some(settings) = app.session.settings_mut() {
                    settings.negative_marking = !settings.negative_marking;
                }
            }
            KeyCode::Enter => app.generate(),
            _ => {}
        },
    }
}

fn edit_text(app: &mut App, key: KeyEvent) {
    let multiline = app.form.focus == FormField::Context
        && app.form.source == SourceMode::Text;
    if key.code == KeyCode::Enter && !multiline {
        app.generate();
        return;
    }

    let Some(field) = app.form.focused_text_mut() else {
        return;
    };
    match key.code {
        KeyCode::Enter => field.insert_char('\n'),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.insert_char(c)
        }
        _ => {}
    }
}

pub fn handle_quiz_input(app: &mut App, key: KeyEvent) {
    if app.quiz_view.confirm_cancel {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.quiz_view.confirm_cancel = false;
                app.cancel_quiz();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.quiz_view.confirm_cancel = false;
            }
            _ => {}
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.quiz_view.confirm_cancel = true,
        KeyCode::Char('s') if ctrl => app.submit(),
        KeyCode::Up => {
            app.quiz_view.highlighted = app.quiz_view.highlighted.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.quiz_view.highlighted + 1 < OPTIONS_PER_QUESTION {
                app.quiz_view.highlighted += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.select_option(app.quiz_view.highlighted),
        KeyCode::Char(c @ '1'..='4') => app.select_option(c as usize - '1' as usize),
        KeyCode::Char(c @ 'a'..='d') if !ctrl => app.select_option(c as usize - 'a' as usize),
        KeyCode::Right | KeyCode::Tab | KeyCode::PageDown => app.next_question(),
        KeyCode::Left | KeyCode::BackTab | KeyCode::PageUp => app.previous_question(),
        _ => {}
    }
}

fn handle_results_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('r') => app.restart(),
        KeyCode::Down => app.results_scroll = app.results_scroll.saturating_add(1),
        KeyCode::Up => app.results_scroll = app.results_scroll.saturating_sub(1),
        KeyCode::PageDown => app.results_scroll = app.results_scroll.saturating_add(10),
        KeyCode::PageUp => app.results_scroll = app.results_scroll.saturating_sub(10),
        _ => {}
    }
}
