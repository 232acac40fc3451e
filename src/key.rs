//! Key bindings and the one-line help footer built from them.
//!
//! A [`Binding`] groups the key presses that trigger one action together
//! with the short help text shown in the footer. Plain key codes match with
//! any modifier except control (so `G` works whether or not the terminal
//! reports shift); presses built with an explicit modifier only match when
//! it is held.
//!
//! ```rust
//! use launch_browser::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let quit = Binding::new(vec![KeyCode::Char('q')])
//!     .with_press(KeyCode::Char('c'), KeyModifiers::CONTROL)
//!     .with_help("q", "quit");
//!
//! let ctrl_c = KeyMsg { key: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
//! let plain_c = KeyMsg { key: KeyCode::Char('c'), modifiers: KeyModifiers::NONE };
//! assert!(quit.matches(&ctrl_c));
//! assert!(!quit.matches(&plain_c));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// One physical key press, optionally requiring modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    /// `None` accepts any modifiers.
    pub modifiers: Option<KeyModifiers>,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: None,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self {
            code,
            modifiers: Some(modifiers),
        }
    }
}

impl KeyPress {
    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        match self.modifiers {
            None => !msg.modifiers.contains(KeyModifiers::CONTROL),
            Some(required) => msg.modifiers.contains(required),
        }
    }
}

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    pub key: String,
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    presses: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            presses: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Adds a press that requires `modifiers`.
    pub fn with_press(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
        self.presses.push((code, modifiers).into());
        self
    }

    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    pub fn help(&self) -> &Help {
        &self.help
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    pub fn enabled(&self) -> bool {
        !self.disabled && !self.presses.is_empty()
    }

    /// Whether `msg` triggers this binding. Disabled bindings never match.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.presses.iter().any(|press| press.matches(msg))
    }
}

/// Styles for the help footer.
#[derive(Debug, Clone)]
pub struct HelpStyles {
    pub key: Style,
    pub desc: Style,
    pub separator: Style,
}

impl Default for HelpStyles {
    fn default() -> Self {
        Self {
            key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// Renders enabled bindings as `key desc • key desc`, dropping trailing
/// entries that would overflow `width` (0 means unlimited).
pub fn short_help(bindings: &[&Binding], styles: &HelpStyles, width: usize) -> String {
    let separator = styles.separator.render(" • ");
    let separator_width = lipgloss::width_visible(&separator);
    let mut out = String::new();
    let mut used = 0;

    for binding in bindings.iter().filter(|b| b.enabled()) {
        let help = binding.help();
        if help.key.is_empty() && help.desc.is_empty() {
            continue;
        }
        let entry = format!(
            "{} {}",
            styles.key.render(&help.key),
            styles.desc.render(&help.desc)
        );
        let entry_width = lipgloss::width_visible(&entry);
        let extra = if out.is_empty() { 0 } else { separator_width };
        if width > 0 && used + extra + entry_width > width {
            break;
        }
        if !out.is_empty() {
            out.push_str(&separator);
        }
        out.push_str(&entry);
        used += extra + entry_width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_plain_binding_ignores_shift() {
        let end = Binding::new(vec![KeyCode::End, KeyCode::Char('G')]);
        assert!(end.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(end.matches(&press(KeyCode::End, KeyModifiers::NONE)));
        assert!(!end.matches(&press(KeyCode::Char('G'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
        quit.set_enabled(false);
        assert!(!quit.matches(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!quit.enabled());
    }

    #[test]
    fn test_short_help_joins_and_truncates() {
        let up = Binding::new(vec![KeyCode::Up]).with_help("↑", "up");
        let down = Binding::new(vec![KeyCode::Down]).with_help("↓", "down");
        let quit = Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit");
        let styles = HelpStyles::default();

        let full = lipgloss::strip_ansi(&short_help(&[&up, &down, &quit], &styles, 0));
        assert_eq!(full, "↑ up • ↓ down • q quit");

        let narrow = lipgloss::strip_ansi(&short_help(&[&up, &down, &quit], &styles, 13));
        assert_eq!(narrow, "↑ up • ↓ down");
    }
}
