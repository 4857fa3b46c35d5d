//! Keyboard event handling.
//!
//! `handle_input` dispatches a key event against the current application
//! state and route. Returns `Ok(true)` when the application should quit.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, Route};

pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Modal states first
    match app.state {
        AppState::ShowingHelp => {
            // Any key closes help
            app.state = AppState::Normal;
            return Ok(false);
        }
        AppState::EditingName => return handle_name_input(app, key),
        AppState::EnteringId => return handle_id_input(app, key),
        _ => {}
    }

    // Keys specific to the detail route
    if let Route::Detail(_) = app.route {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter => {
                app.go_back();
                return Ok(false);
            }
            _ => {}
        }
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('/') => {
            app.state = AppState::EditingName;
        }
        KeyCode::Char('s') => {
            app.cycle_species(true);
        }
        KeyCode::Char('S') => {
            app.cycle_species(false);
        }
        KeyCode::Char('x') => {
            app.set_filter_name(String::new());
            app.set_filter_species(String::new());
        }
        KeyCode::Char('g') => {
            app.id_input.clear();
            app.state = AppState::EnteringId;
        }
        KeyCode::Char('r') => {
            app.retry_fetch();
        }
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::PageUp => app.select_page_up(),
        KeyCode::PageDown => app.select_page_down(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }

    Ok(false)
}

/// Live edit of the name filter - every keystroke writes through.
fn handle_name_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            let mut query = app.filter_name.clone();
            query.pop();
            app.set_filter_name(query);
        }
        KeyCode::Char(c) => {
            let mut query = app.filter_name.clone();
            query.push(c);
            app.set_filter_name(query);
        }
        _ => {}
    }
    Ok(false)
}

/// Collect a raw identifier; Enter navigates with it as-is, so the
/// canonical-string guard in resolution is exercised by real input.
fn handle_id_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.id_input.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            let raw = std::mem::take(&mut app.id_input);
            app.state = AppState::Normal;
            app.open_id(raw);
        }
        KeyCode::Backspace => {
            app.id_input.pop();
        }
        KeyCode::Char(c) => {
            app.id_input.push(c);
        }
        _ => {}
    }
    Ok(false)
}
