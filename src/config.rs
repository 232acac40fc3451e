//! Runtime settings.
//!
//! Settings come from the command line (with environment fallbacks) and are
//! installed once per process with [`install`]. The bubbletea runtime builds
//! the root model through an argument-less `init()`, so that is where
//! [`current`] is read.

use clap::Parser;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::time::Duration;

/// Default catalog root; the list endpoint is `{api_url}/launches`.
pub const DEFAULT_API_URL: &str = "https://api.spacexdata.com/v3";

/// Launches requested per pagination step.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rows left below the visible window that count as "near the bottom".
pub const DEFAULT_SCROLL_THRESHOLD: usize = 4;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Effective configuration for the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: usize,
    pub scroll_threshold: usize,
    /// `None` means requests may hang indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            request_timeout: None,
        }
    }
}

/// Command line interface of the `launch-browser` binary.
#[derive(Debug, Parser)]
#[command(name = "launch-browser", version, about = "Browse SpaceX launches in the terminal")]
pub struct Cli {
    /// Root of the launch catalog API
    #[arg(long, env = "LAUNCH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Launches fetched per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Rows from the bottom at which the next page is requested
    #[arg(long, default_value_t = DEFAULT_SCROLL_THRESHOLD)]
    pub scroll_threshold: usize,

    /// Abort requests that take longer than this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// File that receives diagnostic logs
    #[arg(long, env = "LAUNCH_BROWSER_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            api_url: self.api_url.clone(),
            page_size: self.page_size,
            scroll_threshold: self.scroll_threshold,
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Log destination, defaulting to a file in the system temp directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("launch-browser.log"))
    }
}

fn parse_page_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if (1..=100).contains(&n) => Ok(n),
        Ok(n) => Err(format!("page size must be between 1 and 100, got {n}")),
        Err(err) => Err(err.to_string()),
    }
}

/// Installs the process-wide settings. Returns `false` if they were already set.
pub fn install(settings: Settings) -> bool {
    SETTINGS.set(settings).is_ok()
}

/// Installed settings, or the defaults when nothing was installed.
pub fn current() -> Settings {
    SETTINGS.get().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["launch-browser"]);
        let settings = cli.settings();
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.scroll_threshold, DEFAULT_SCROLL_THRESHOLD);
        assert_eq!(settings.request_timeout, None);
        assert!(cli.log_path().ends_with("launch-browser.log"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "launch-browser",
            "--api-url",
            "http://localhost:8080/v3",
            "--page-size",
            "25",
            "--timeout-secs",
            "5",
            "--log-file",
            "/tmp/lb.log",
        ]);
        let settings = cli.settings();
        assert_eq!(settings.api_url, "http://localhost:8080/v3");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(cli.log_path(), PathBuf::from("/tmp/lb.log"));
    }

    #[test]
    fn test_cli_rejects_zero_page_size() {
        assert!(Cli::try_parse_from(["launch-browser", "--page-size", "0"]).is_err());
    }
}
