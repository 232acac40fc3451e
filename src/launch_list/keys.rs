//! Key bindings for the launch list.
//!
//! - **Cards**: `↑/k`, `↓/j` move between cards, `enter/space` expands or
//!   collapses the selected card
//! - **Scrolling**: `pgup/b`, `pgdn/f`, `g/home`, `G/end`
//! - **Search**: `/` or `tab` focuses the search field, `esc/enter/tab` leaves it
//! - **Quit**: `q`, or `ctrl+c` from anywhere

use crate::key::Binding;
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone)]
pub struct ListKeyMap {
    pub cursor_up: Binding,
    pub cursor_down: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub go_to_start: Binding,
    pub go_to_end: Binding,
    pub toggle: Binding,
    pub focus_search: Binding,
    pub leave_search: Binding,
    pub quit: Binding,
    pub force_quit: Binding,
}

impl Default for ListKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            cursor_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            page_up: Binding::new(vec![KeyCode::PageUp, KeyCode::Char('b')])
                .with_help("pgup", "page up"),
            page_down: Binding::new(vec![KeyCode::PageDown, KeyCode::Char('f')])
                .with_help("pgdn", "page down"),
            go_to_start: Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "top"),
            go_to_end: Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "bottom"),
            toggle: Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter", "view"),
            focus_search: Binding::new(vec![KeyCode::Char('/'), KeyCode::Tab])
                .with_help("/", "search"),
            leave_search: Binding::new(vec![KeyCode::Esc, KeyCode::Enter, KeyCode::Tab])
                .with_help("esc", "done"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: Binding::new(Vec::<KeyCode>::new())
                .with_press(KeyCode::Char('c'), KeyModifiers::CONTROL)
                .with_help("ctrl+c", "quit"),
        }
    }
}

impl ListKeyMap {
    /// Bindings for the help footer, depending on where input goes.
    pub fn short_help(&self, editing_search: bool) -> Vec<&Binding> {
        if editing_search {
            vec![&self.leave_search, &self.force_quit]
        } else {
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.toggle,
                &self.focus_search,
                &self.page_down,
                &self.quit,
            ]
        }
    }
}
