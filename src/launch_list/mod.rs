//! # Launch List
//!
//! An infinitely scrolling list of launch cards with search and
//! expandable details.
//!
//! The component is split the same way as its data flow:
//!
//! - [`state`]: pagination, search and expansion state. Pure and synchronous;
//!   it decides *what* to fetch and merges results.
//! - [`render`]: turns launches into card rows for the viewport.
//! - this module: the bubbletea-facing [`Model`] that routes keys, runs
//!   fetches against a [`LaunchSource`] as commands, and lays out the view.
//!
//! ## Loading More
//!
//! The list keeps a scroll subscription alive while mounted. Every time the
//! viewport moves, the current scroll position is dispatched to it; once
//! the window is within the configured number of rows of the bottom, the
//! list is idle, and more pages are believed to exist, the next page is
//! requested.
//!
//! ## Searching
//!
//! Typing in the search field fetches the whole catalog and keeps the
//! launches whose mission name contains the query, ignoring case. While
//! that runs the cards are replaced by a "Searching..." notice.
//!
//! ## Example
//!
//! ```rust
//! use launch_browser::api::MemorySource;
//! use launch_browser::config::Settings;
//! use launch_browser::launch_list::Model;
//! use std::sync::Arc;
//!
//! let source = Arc::new(MemorySource::new(Vec::new()));
//! let mut list = Model::new(&Settings::default(), source);
//! list.set_size(80, 24);
//! let _fetch = list.init(); // mounts and requests the first page
//! assert!(list.state().status().is_busy());
//! ```

pub mod keys;
pub mod render;
pub mod state;
pub mod style;


pub use keys::ListKeyMap;
pub use state::{Applied, FetchRequest, Fetched, ListState, RequestKind, Status};
pub use style::ListStyles;

use crate::api::LaunchSource;
use crate::config::Settings;
use crate::{key, loading, search, viewport, Component};
use bubbletea_rs::{batch, Cmd, KeyMsg, Msg};
use render::Body;
use std::sync::Arc;
use tracing::debug;

/// Rows used by the search field, its spacer, the status line and help.
const CHROME_ROWS: usize = 4;

/// Commands produced by one update, kept apart until handed to the runtime.
#[derive(Default)]
struct Effects {
    fetch: Option<Cmd>,
    tick: Option<Cmd>,
    other: Option<Cmd>,
}

impl Effects {
    fn other(cmd: Option<Cmd>) -> Self {
        Self {
            other: cmd,
            ..Self::default()
        }
    }

    fn into_cmd(self) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = [self.fetch, self.tick, self.other]
            .into_iter()
            .flatten()
            .collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(batch(cmds)),
        }
    }
}

pub struct Model {
    state: ListState,
    source: Arc<dyn LaunchSource>,
    search: search::Model,
    loading: loading::Model,
    viewport: viewport::Model,
    body: Body,
    cursor: usize,
    width: usize,
    height: usize,
    pub keymap: ListKeyMap,
    pub styles: ListStyles,
}

impl Model {
    pub fn new(settings: &Settings, source: Arc<dyn LaunchSource>) -> Self {
        let mut model = Self {
            state: ListState::new(settings.page_size, settings.scroll_threshold),
            source,
            search: search::Model::new(),
            loading: loading::Model::new(),
            viewport: viewport::Model::new(0, 0),
            body: Body::default(),
            cursor: 0,
            width: 0,
            height: 0,
            keymap: ListKeyMap::default(),
            styles: ListStyles::default(),
        };
        model.set_size(80, 24);
        model
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn search_value(&self) -> String {
        self.search.value()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport(&self) -> &viewport::Model {
        &self.viewport
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.viewport
            .set_size(width, height.saturating_sub(CHROME_ROWS).max(1));
        self.refresh();
    }

    /// Mounts the list and requests the first page.
    pub fn init(&mut self) -> Option<Cmd> {
        self.start().into_cmd()
    }

    /// Releases the scroll subscription. Called before the program quits.
    pub fn unmount(&mut self) {
        self.state.unmount();
        self.loading.hide();
    }

    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.handle(msg).into_cmd()
    }

    fn start(&mut self) -> Effects {
        let request = self.state.mount();
        self.run(request)
    }

    fn handle(&mut self, msg: Msg) -> Effects {
        let msg = match msg.downcast::<Fetched>() {
            Ok(fetched) => return self.apply(*fetched),
            Err(msg) => msg,
        };

        if msg.downcast_ref::<loading::TickMsg>().is_some() {
            return Effects::other(self.loading.update(&msg));
        }

        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return Effects::default();
        };
        if self.keymap.force_quit.matches(key) {
            self.unmount();
            return Effects::other(Some(bubbletea_rs::quit()));
        }
        if self.search.focused() {
            return self.update_search(key, &msg);
        }

        if self.keymap.quit.matches(key) {
            self.unmount();
            return Effects::other(Some(bubbletea_rs::quit()));
        }
        if self.keymap.focus_search.matches(key) {
            return Effects::other(self.search.focus());
        }
        if self.keymap.toggle.matches(key) {
            self.toggle_selected();
            return Effects::default();
        }

        if self.keymap.cursor_down.matches(key) {
            if self.cursor + 1 < self.state.items().len() {
                self.select(self.cursor + 1);
            } else {
                self.viewport.scroll_down(1);
            }
        } else if self.keymap.cursor_up.matches(key) {
            if self.cursor > 0 {
                self.select(self.cursor - 1);
            } else {
                self.viewport.scroll_up(1);
            }
        } else if self.keymap.page_down.matches(key) {
            self.viewport.page_down();
            self.select_at_top();
        } else if self.keymap.page_up.matches(key) {
            self.viewport.page_up();
            self.select_at_top();
        } else if self.keymap.go_to_start.matches(key) {
            self.viewport.goto_top();
            self.select_at_top();
        } else if self.keymap.go_to_end.matches(key) {
            self.viewport.goto_bottom();
            let last = self.state.items().len().saturating_sub(1);
            self.cursor = last;
            self.refresh();
        } else {
            return Effects::default();
        }

        let request = self.state.scrolled(self.viewport.position());
        self.run(request)
    }

    fn update_search(&mut self, key: &KeyMsg, msg: &Msg) -> Effects {
        if self.keymap.leave_search.matches(key) {
            self.search.blur();
            return Effects::default();
        }
        if !self.search.update(msg) {
            return Effects::default();
        }
        let query = self.search.value();
        debug!(query = %query, "search changed");
        let request = self.state.set_search(&query);
        self.run(request)
    }

    fn apply(&mut self, fetched: Fetched) -> Effects {
        if let Applied::Replaced(_) = self.state.complete(fetched) {
            self.cursor = 0;
            self.viewport.goto_top();
        }
        self.run(None)
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.state.items().get(self.cursor).map(|launch| launch.id()) else {
            return;
        };
        self.state.toggle(id);
        self.refresh();
        self.reveal_cursor();
    }

    fn select(&mut self, index: usize) {
        self.cursor = index;
        self.refresh();
        self.reveal_cursor();
    }

    fn select_at_top(&mut self) {
        if let Some(index) = self.body.card_at_row(self.viewport.y_offset()) {
            self.cursor = index;
        }
        self.refresh();
    }

    fn reveal_cursor(&mut self) {
        if let Some(&(start, rows)) = self.body.spans.get(self.cursor) {
            self.viewport.ensure_visible(start, rows);
        }
    }

    /// Syncs the loading indicator and view with the state, then turns
    /// `request` into a fetch command.
    fn run(&mut self, request: Option<state::FetchRequest>) -> Effects {
        let tick = self
            .loading
            .set_visible(self.state.status() == Status::Paginating);
        self.refresh();

        Effects {
            fetch: request.map(|request| self.fetch(request)),
            tick,
            other: None,
        }
    }

    /// Runs `request` against the source and reports back as [`Fetched`].
    fn fetch(&self, request: FetchRequest) -> Cmd {
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            let result = match &request.kind {
                RequestKind::Page { limit, offset, .. } => source.fetch_page(*limit, *offset).await,
                RequestKind::Search { .. } => source.fetch_all().await,
            };
            Some(Box::new(request.into_fetched(result)) as Msg)
        })
    }

    /// Re-renders the card rows into the viewport.
    fn refresh(&mut self) {
        let items = self.state.items();
        self.cursor = self.cursor.min(items.len().saturating_sub(1));

        self.body = if self.state.status() == Status::Searching {
            Body {
                lines: vec![render::center(
                    &self.styles.status_message.render("Searching..."),
                    self.width,
                )],
                spans: Vec::new(),
            }
        } else if items.is_empty() && !self.state.status().is_busy() {
            Body {
                lines: vec![self.styles.no_items.render("No launches.")],
                spans: Vec::new(),
            }
        } else {
            let state = &self.state;
            render::body(
                items,
                |launch| state.is_expanded(launch.id()),
                self.cursor,
                &self.styles,
                self.width,
            )
        };
        self.viewport.set_content_lines(self.body.lines.clone());
    }

    fn status_line(&self) -> String {
        match self.state.status() {
            Status::Paginating => self.loading.view(),
            Status::Idle if !self.state.has_more() => render::center(
                &self.styles.status_message.render("End of List"),
                self.width,
            ),
            _ => String::new(),
        }
    }

    pub fn view(&self) -> String {
        let help = key::short_help(
            &self.keymap.short_help(self.search.focused()),
            &self.styles.help,
            self.width,
        );
        [
            self.search.view(),
            String::new(),
            self.viewport.view(),
            self.status_line(),
            help,
        ]
        .join("\n")
    }
}
