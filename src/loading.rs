//! Loading indicator.
//!
//! An animated spinner with a label that is either visible or not. The
//! animation is driven by bubbletea ticks that only keep flowing while the
//! indicator is shown; hiding it lets the current tick chain die out.
//!
//! ```rust
//! use launch_browser::loading::Model;
//!
//! let mut loading = Model::new();
//! assert_eq!(loading.view(), "");
//!
//! let _tick = loading.show(); // start the animation
//! assert!(loading.view().contains("Loading..."));
//!
//! loading.hide();
//! assert_eq!(loading.view(), "");
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Braille dots, one cell wide.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(83);

/// Advances one indicator by a frame.
///
/// `id` routes the tick to its indicator, `tag` drops ticks from an earlier
/// show/hide cycle so the animation never speeds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMsg {
    pub id: i64,
    pub tag: i64,
}

#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,
    frame: usize,
    visible: bool,
    label: String,
    pub style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            frame: 0,
            visible: false,
            label: "Loading...".to_string(),
            style: Style::new().foreground(Color::from("205")),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Makes the indicator visible. Returns the tick that starts the
    /// animation, or `None` if it was already running.
    pub fn show(&mut self) -> Option<Cmd> {
        if self.visible {
            return None;
        }
        self.visible = true;
        self.frame = 0;
        self.tag += 1;
        Some(self.tick())
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Shows or hides the indicator to match `busy`.
    pub fn set_visible(&mut self, busy: bool) -> Option<Cmd> {
        if busy {
            self.show()
        } else {
            self.hide();
            None
        }
    }

    /// Tick message for the current cycle, as the runtime would deliver it.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let msg = self.tick_msg();
        bubbletea_tick(FRAME_INTERVAL, move |_| Box::new(msg) as Msg)
    }

    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if tick.id != self.id || tick.tag != self.tag || !self.visible {
            return None;
        }

        self.frame = (self.frame + 1) % FRAMES.len();
        self.tag += 1;
        Some(self.tick())
    }

    pub fn view(&self) -> String {
        if !self.visible {
            return String::new();
        }
        format!("{} {}", self.style.render(FRAMES[self.frame]), self.label)
    }
}
