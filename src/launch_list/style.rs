//! Styles for the launch list.
//!
//! Badge colors follow the status: cyan for upcoming, green for success,
//! red for failed. Everything else uses adaptive colors so the list reads
//! on light and dark terminals alike.

use crate::key::HelpStyles;
use crate::launch::LaunchStatus;
use lipgloss_extras::prelude::*;

/// Marker drawn in front of every row of the selected card.
pub const SELECTED_MARKER: &str = "┃ ";

/// Marker drawn in front of every row of other cards.
pub const NORMAL_MARKER: &str = "  ";

/// Appended to text cut short to fit the width.
pub const ELLIPSIS: &str = "…";

#[derive(Debug, Clone)]
pub struct ListStyles {
    pub title: Style,
    pub card_title: Style,
    pub selected_marker: Style,
    pub badge_upcoming: Style,
    pub badge_success: Style,
    pub badge_failed: Style,
    pub button: Style,
    pub detail_label: Style,
    pub detail_text: Style,
    pub link: Style,
    pub status_message: Style,
    pub no_items: Style,
    pub help: HelpStyles,
}

impl Default for ListStyles {
    fn default() -> Self {
        let badge = Style::new().foreground(Color::from("#FFFFFF")).padding(0, 1, 0, 1);
        Self {
            title: Style::new()
                .foreground(Color::from("#FFFDF5"))
                .background(Color::from("62"))
                .bold(true)
                .padding(0, 1, 0, 1),
            card_title: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1A1A1A",
                    Dark: "#DDDDDD",
                })
                .bold(true),
            selected_marker: Style::new().foreground(AdaptiveColor {
                Light: "#F793FF",
                Dark: "#AD58B4",
            }),
            badge_upcoming: badge.clone().background(Color::from("#17A2B8")),
            badge_success: badge.clone().background(Color::from("#28A745")),
            badge_failed: badge.background(Color::from("#DC3545")),
            button: Style::new()
                .foreground(Color::from("#FFFFFF"))
                .background(Color::from("#007BFF"))
                .padding(0, 1, 0, 1),
            detail_label: Style::new().bold(true),
            detail_text: Style::new().foreground(AdaptiveColor {
                Light: "#4A4A4A",
                Dark: "#A49FA5",
            }),
            link: Style::new().foreground(Color::from("#007BFF")).underline(true),
            status_message: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            no_items: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            help: HelpStyles::default(),
        }
    }
}

impl ListStyles {
    pub fn badge(&self, status: LaunchStatus) -> &Style {
        match status {
            LaunchStatus::Upcoming => &self.badge_upcoming,
            LaunchStatus::Success => &self.badge_success,
            LaunchStatus::Failed => &self.badge_failed,
        }
    }
}
