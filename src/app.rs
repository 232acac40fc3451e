//! Root model run by the bubbletea program.
//!
//! Wraps the launch list with a title bar and resizes it with the terminal.
//! Because [`bubbletea_rs::Model::init`] takes no arguments, the launch
//! source is installed process-wide with [`install_source`] before the
//! program starts, next to [`config::install`](crate::config::install).

use crate::api::{HttpLaunchSource, LaunchSource};
use crate::config;
use crate::error::{FetchError, Result};
use crate::launch_list;
use bubbletea_rs::{Cmd, KeyMsg, Model, Msg, WindowSizeMsg};
use lipgloss_extras::prelude::*;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{error, info};

/// Widest the card column grows, in terminal columns.
pub const MAX_LIST_WIDTH: usize = 80;

/// Rows taken by the title and the blank line under it.
const HEADER_ROWS: usize = 2;

static SOURCE: OnceCell<Arc<dyn LaunchSource>> = OnceCell::new();

/// Installs the source the app fetches from. Returns `false` if one was
/// already installed.
pub fn install_source(source: Arc<dyn LaunchSource>) -> bool {
    SOURCE.set(source).is_ok()
}

/// The installed source, or an HTTP source built from the current settings.
pub fn source() -> Result<Arc<dyn LaunchSource>> {
    if let Some(source) = SOURCE.get() {
        return Ok(Arc::clone(source));
    }
    let http = HttpLaunchSource::from_settings(&config::current())?;
    Ok(Arc::new(http))
}

pub struct App {
    /// The list, or why it could not be built.
    list: std::result::Result<launch_list::Model, FetchError>,
    width: usize,
    height: usize,
    title: Style,
    failure: Style,
}

impl App {
    pub fn new(source: Arc<dyn LaunchSource>) -> Self {
        Self::with_list(Ok(launch_list::Model::new(&config::current(), source)))
    }

    /// An app that only reports `err` and quits on the next key.
    pub fn failed(err: FetchError) -> Self {
        Self::with_list(Err(err))
    }

    fn with_list(list: std::result::Result<launch_list::Model, FetchError>) -> Self {
        let styles = launch_list::ListStyles::default();
        Self {
            list,
            width: MAX_LIST_WIDTH,
            height: 24,
            title: styles.title,
            failure: styles.badge_failed,
        }
    }

    pub fn list(&self) -> Option<&launch_list::Model> {
        self.list.as_ref().ok()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        if let Ok(list) = &mut self.list {
            list.set_size(
                width.min(MAX_LIST_WIDTH),
                height.saturating_sub(HEADER_ROWS),
            );
        }
    }
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        match source() {
            Ok(source) => {
                let mut app = App::new(source);
                info!("launch browser started");
                let cmd = app.list.as_mut().ok().and_then(|list| list.init());
                (app, cmd)
            }
            Err(err) => {
                error!(error = %err, "cannot build the launch source");
                (App::failed(err), None)
            }
        }
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.resize(size.width as usize, size.height as usize);
            return None;
        }
        match &mut self.list {
            Ok(list) => list.update(msg),
            Err(_) if msg.downcast_ref::<KeyMsg>().is_some() => Some(bubbletea_rs::quit()),
            Err(_) => None,
        }
    }

    fn view(&self) -> String {
        let body = match &self.list {
            Ok(list) => list.view(),
            Err(err) => format!(
                "{}\n\nPress any key to quit.",
                self.failure.render(&format!("Cannot load launches: {err}"))
            ),
        };
        format!("{}\n\n{}", self.title.render("SpaceX Launches"), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemorySource;
    use crate::launch::fixtures::numbered;
    use crossterm::event::{KeyCode, KeyModifiers};
    use lipgloss_extras::lipgloss;

    fn app() -> App {
        App::new(Arc::new(MemorySource::new(numbered(1, 5))))
    }

    #[test]
    fn test_window_size_caps_list_width() {
        let mut app = app();
        let msg: Msg = Box::new(WindowSizeMsg {
            width: 200,
            height: 40,
        });
        assert!(app.update(msg).is_none());
        assert_eq!(app.size(), (200, 40));
        let list = app.list().expect("list built");
        assert_eq!(list.viewport().width, MAX_LIST_WIDTH);
        assert_eq!(list.viewport().height, 34);
    }

    #[test]
    fn test_view_has_title_and_search() {
        let app = app();
        let view = lipgloss::strip_ansi(&app.view());
        let mut lines = view.lines();
        assert!(lines.next().unwrap().contains("SpaceX Launches"));
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().unwrap().contains("Search..."));
    }

    #[test]
    fn test_keys_reach_the_list() {
        let mut app = app();
        let msg: Msg = Box::new(bubbletea_rs::KeyMsg {
            key: KeyCode::Char('/'),
            modifiers: KeyModifiers::NONE,
        });
        app.update(msg);
        assert!(lipgloss::strip_ansi(&app.view()).contains("esc done"));
    }

    #[test]
    fn test_failed_source_reports_and_quits() {
        let mut app = App::failed(FetchError::Url(url::ParseError::RelativeUrlWithoutBase));
        assert!(app.list().is_none());
        let view = lipgloss::strip_ansi(&app.view());
        assert!(view.contains("Cannot load launches: invalid catalog url"));
        assert!(view.contains("Press any key to quit."));

        let resize: Msg = Box::new(WindowSizeMsg {
            width: 100,
            height: 30,
        });
        assert!(app.update(resize).is_none());
        let msg: Msg = Box::new(bubbletea_rs::KeyMsg {
            key: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
        });
        assert!(app.update(msg).is_some());
    }
}
