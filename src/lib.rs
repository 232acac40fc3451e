//! # launch-browser
//!
//! A terminal browser for the SpaceX launch catalog, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) and lipgloss.
//!
//! ## Overview
//!
//! Launches are shown as cards in an infinitely scrolling list. Scrolling
//! near the bottom loads the next page, typing in the search field filters
//! the whole catalog by mission name, and each card expands to show rocket,
//! date, site, media links and mission details.
//!
//! Every piece follows the Elm Architecture with `update()` and `view()`
//! methods, and fetches run as bubbletea commands whose results come back
//! as messages.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`launch`] | Launch records and status derivation |
//! | [`api`] | Launch sources: HTTP and in-memory |
//! | [`launch_list`] | The list component and its pagination state |
//! | [`app`] | Root model run by the program |
//! | [`search`] | Single-line search field |
//! | [`loading`] | Animated loading indicator |
//! | [`viewport`] | Vertically scrolling window over rendered lines |
//! | [`subscription`] | Scoped event handlers with teardown |
//! | [`key`] | Key bindings and help rendering |
//! | [`config`] | Command line and runtime settings |
//!
//! ## Embedding the list
//!
//! ```rust
//! use launch_browser::prelude::*;
//! use std::sync::Arc;
//!
//! let launches = Arc::new(MemorySource::new(Vec::new()));
//! let mut list = LaunchList::new(&Settings::default(), launches);
//! let _cmd = list.init();
//! assert_eq!(list.state().status(), Status::Paginating);
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod key;
pub mod launch;
pub mod launch_list;
pub mod loading;
pub mod search;
pub mod subscription;
pub mod viewport;

use bubbletea_rs::Cmd;

/// Components that can take keyboard focus.
///
/// A focused component receives key input and draws itself as active;
/// a blurred one ignores keys.
pub trait Component {
    /// Focuses the component, optionally returning a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

pub use api::{HttpLaunchSource, LaunchSource, MemorySource};
pub use app::App;
pub use config::Settings;
pub use error::FetchError;
pub use key::{Binding, KeyPress};
pub use launch::{Launch, LaunchId, LaunchStatus};
pub use launch_list::Model as LaunchList;
pub use launch_list::{ListState, Status};
pub use loading::Model as Loading;
pub use search::Model as Search;
pub use subscription::{Listeners, Subscription};
pub use viewport::Model as Viewport;

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::api::{HttpLaunchSource, LaunchSource, MemorySource};
    pub use crate::app::App;
    pub use crate::config::Settings;
    pub use crate::error::FetchError;
    pub use crate::key::{Binding, KeyPress};
    pub use crate::launch::{Launch, LaunchStatus};
    pub use crate::launch_list::{ListState, Model as LaunchList, Status};
    pub use crate::Component;
}
