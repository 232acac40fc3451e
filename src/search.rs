//! Single-line search field.
//!
//! Holds the query the launch list filters by. Editing follows the usual
//! readline keys (ctrl+a/e, ctrl+u, ctrl+w) and the field only accepts input
//! while focused.
//!
//! ```rust
//! use launch_browser::search::Model;
//! use launch_browser::Component;
//! use bubbletea_rs::{KeyMsg, Msg};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut search = Model::new();
//! search.focus();
//!
//! for c in "falcon".chars() {
//!     let msg: Msg = Box::new(KeyMsg { key: KeyCode::Char(c), modifiers: KeyModifiers::NONE });
//!     search.update(&msg);
//! }
//! assert_eq!(search.value(), "falcon");
//! ```

use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

#[derive(Debug, Clone)]
pub struct SearchStyles {
    pub prompt: Style,
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
}

impl Default for SearchStyles {
    fn default() -> Self {
        Self {
            prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            text: Style::new(),
            placeholder: Style::new().foreground(Color::from("240")),
            cursor: Style::new().reverse(true),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    value: Vec<char>,
    pos: usize,
    focus: bool,
    pub prompt: String,
    pub placeholder: String,
    /// Maximum number of characters; 0 means unlimited.
    pub char_limit: usize,
    pub styles: SearchStyles,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            pos: 0,
            focus: false,
            prompt: "> ".to_string(),
            placeholder: "Search...".to_string(),
            char_limit: 128,
            styles: SearchStyles::default(),
        }
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn set_value(&mut self, s: &str) {
        let mut runes: Vec<char> = s.chars().collect();
        if self.char_limit > 0 {
            runes.truncate(self.char_limit);
        }
        self.value = runes;
        self.pos = self.value.len();
    }

    fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    fn insert(&mut self, c: char) -> bool {
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return false;
        }
        self.value.insert(self.pos, c);
        self.pos += 1;
        true
    }

    fn delete_before(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        self.value.remove(self.pos);
        true
    }

    fn delete_at(&mut self) -> bool {
        if self.pos >= self.value.len() {
            return false;
        }
        self.value.remove(self.pos);
        true
    }

    fn delete_to_start(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.value.drain(..self.pos);
        self.pos = 0;
        true
    }

    fn delete_word_before(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let mut start = self.pos;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.pos);
        self.pos = start;
        true
    }

    /// Applies a key press. Returns `true` when the value changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focus {
            return false;
        }
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.key {
            KeyCode::Char('a') if ctrl => {
                self.pos = 0;
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.pos = self.value.len();
                false
            }
            KeyCode::Char('u') if ctrl => self.delete_to_start(),
            KeyCode::Char('w') if ctrl => self.delete_word_before(),
            KeyCode::Char(c) if !ctrl => self.insert(c),
            KeyCode::Backspace => self.delete_before(),
            KeyCode::Delete => self.delete_at(),
            KeyCode::Left => {
                self.pos = self.pos.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.set_cursor(self.pos + 1);
                false
            }
            KeyCode::Home => {
                self.pos = 0;
                false
            }
            KeyCode::End => {
                self.pos = self.value.len();
                false
            }
            _ => false,
        }
    }

    pub fn view(&self) -> String {
        let prompt = self.styles.prompt.render(&self.prompt);

        if self.value.is_empty() {
            let placeholder: String = self.placeholder.clone();
            if !self.focus || placeholder.is_empty() {
                return format!("{prompt}{}", self.styles.placeholder.render(&placeholder));
            }
            let mut chars = placeholder.chars();
            let first = chars.next().map(String::from).unwrap_or_default();
            let rest: String = chars.collect();
            return format!(
                "{prompt}{}{}",
                self.styles.cursor.render(&first),
                self.styles.placeholder.render(&rest)
            );
        }

        let before: String = self.value[..self.pos].iter().collect();
        let mut out = format!("{prompt}{}", self.styles.text.render(&before));
        if !self.focus {
            let after: String = self.value[self.pos..].iter().collect();
            out.push_str(&self.styles.text.render(&after));
            return out;
        }

        match self.value.get(self.pos) {
            Some(c) => {
                out.push_str(&self.styles.cursor.render(&c.to_string()));
                let after: String = self.value[self.pos + 1..].iter().collect();
                out.push_str(&self.styles.text.render(&after));
            }
            None => out.push_str(&self.styles.cursor.render(" ")),
        }
        out
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn ctrl(c: char) -> Msg {
        Box::new(KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        })
    }

    fn typed(text: &str) -> Model {
        let mut search = Model::new();
        search.focus();
        for c in text.chars() {
            search.update(&key(KeyCode::Char(c)));
        }
        search
    }

    #[test]
    fn test_ignores_input_when_blurred() {
        let mut search = Model::new();
        assert!(!search.update(&key(KeyCode::Char('x'))));
        assert_eq!(search.value(), "");
    }

    #[test]
    fn test_editing_keys() {
        let mut search = typed("falcn");
        assert!(!search.update(&key(KeyCode::Left)));
        assert!(search.update(&key(KeyCode::Char('o'))));
        assert_eq!(search.value(), "falcon");

        search.update(&key(KeyCode::Home));
        assert!(search.update(&key(KeyCode::Delete)));
        assert_eq!(search.value(), "alcon");

        search.update(&key(KeyCode::End));
        assert!(search.update(&key(KeyCode::Backspace)));
        assert_eq!(search.value(), "alco");
        assert!(!search.update(&key(KeyCode::Delete)));
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut search = typed("falcon heavy");
        assert!(search.update(&ctrl('w')));
        assert_eq!(search.value(), "falcon ");
        assert!(search.update(&ctrl('u')));
        assert_eq!(search.value(), "");
        assert!(!search.update(&ctrl('u')));
    }

    #[test]
    fn test_char_limit() {
        let mut search = Model::new();
        search.char_limit = 3;
        search.set_value("starlink");
        assert_eq!(search.value(), "sta");
        search.focus();
        assert!(!search.update(&key(KeyCode::Char('r'))));
    }

    #[test]
    fn test_view_placeholder_and_value() {
        let search = Model::new();
        assert_eq!(lipgloss::strip_ansi(&search.view()), "> Search...");

        let search = typed("dragon");
        assert_eq!(lipgloss::strip_ansi(&search.view()), "> dragon ");
    }
}
