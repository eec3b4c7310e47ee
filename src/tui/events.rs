use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::state::TuiState;

const PAGE: usize = 10;

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_event(key_event: KeyEvent, state: &mut TuiState) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return matches!(key_event.code, KeyCode::Char('q'));
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => state.view_mode = state.view_mode.next(),
        KeyCode::BackTab => state.view_mode = state.view_mode.prev(),
        KeyCode::Left | KeyCode::Char('j') => state.select(state.selected.saturating_sub(1)),
        KeyCode::Right | KeyCode::Char('k') => state.select(state.selected + 1),
        KeyCode::Home | KeyCode::Char('g') => state.select(0),
        KeyCode::End | KeyCode::Char('G') => state.select(usize::MAX),
        KeyCode::PageUp => state.select(state.selected.saturating_sub(PAGE)),
        KeyCode::PageDown => state.select(state.selected.saturating_add(PAGE)),
        _ => {}
    }
    false
}
