//! Pagination and search state for the launch list.
//!
//! [`ListState`] is the list's whole data model with no I/O in it. Every
//! operation that needs data returns a [`FetchRequest`]; the caller runs it
//! against a launch source and hands the outcome back through
//! [`ListState::complete`].
//!
//! Two fetch paths exist:
//!
//! - **Page**: `limit`/`offset` window for the current page. The returned
//!   batch is filtered by the query captured at request time, then replaces
//!   the list (page 1) or is appended (later pages). A filtered batch shorter
//!   than the page size ends pagination. Filtering can shorten a full page,
//!   so this can end pagination early; that approximation is deliberate.
//! - **Search**: the whole collection, filtered and replacing the list.
//!
//! Requests carry increasing sequence numbers and only the most recently
//! issued one is ever applied.

use crate::error::FetchError;
use crate::launch::{filter_by_name, Launch, LaunchId};
use crate::subscription::{Listeners, Subscription};
use crate::viewport::ScrollPosition;
use std::collections::HashSet;
use tracing::{debug, error, info};

/// What the list is waiting for. At most one kind of fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Paginating,
    Searching,
}

impl Status {
    pub fn is_busy(self) -> bool {
        self != Status::Idle
    }
}

/// The data a fetch asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Page {
        page: usize,
        limit: usize,
        offset: usize,
        query: String,
    },
    Search {
        query: String,
    },
}

/// A fetch the caller must perform, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub kind: RequestKind,
}

impl FetchRequest {
    /// Pairs this request with its outcome.
    pub fn into_fetched(self, result: Result<Vec<Launch>, FetchError>) -> Fetched {
        Fetched {
            seq: self.seq,
            kind: self.kind,
            result,
        }
    }
}

/// Outcome of a [`FetchRequest`], delivered back to the list as a message.
#[derive(Debug)]
pub struct Fetched {
    pub seq: u64,
    pub kind: RequestKind,
    pub result: Result<Vec<Launch>, FetchError>,
}

/// Effect of a completed fetch on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The list was replaced with this many launches.
    Replaced(usize),
    /// This many launches were appended.
    Appended(usize),
    /// The fetch failed; nothing changed except the status.
    Failed,
    /// A newer request was issued since; the response was dropped.
    Stale,
}

/// Scroll notification fed to the list's scroll subscription.
pub type ScrollEvent = ScrollPosition;

/// Produced by the scroll subscription when the next page should load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    LoadMore,
}

/// Values the current scroll handler closed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScrollCapture {
    busy: bool,
    has_more: bool,
}

#[derive(Debug)]
pub struct ListState {
    items: Vec<Launch>,
    page: usize,
    has_more: bool,
    search: String,
    expanded: Option<LaunchId>,
    status: Status,
    latest_request: u64,
    page_size: usize,
    scroll_threshold: usize,
    scroll: Listeners<ScrollEvent, ScrollAction>,
    scroll_binding: Option<(ScrollCapture, Subscription)>,
    mounted: bool,
}

impl ListState {
    pub fn new(page_size: usize, scroll_threshold: usize) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
            search: String::new(),
            expanded: None,
            status: Status::Idle,
            latest_request: 0,
            page_size: page_size.max(1),
            scroll_threshold,
            scroll: Listeners::new(),
            scroll_binding: None,
            mounted: false,
        }
    }

    /// Listed launches in arrival order.
    pub fn items(&self) -> &[Launch] {
        &self.items
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Whether more pages are believed to exist.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Current search query.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Which fetch, if any, is in flight.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Launches requested per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether [`mount`](Self::mount) ran without a later unmount.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of live scroll handlers (one while mounted, none otherwise).
    pub fn scroll_listeners(&self) -> usize {
        self.scroll.len()
    }

    /// Raw expanded id, which may point at a launch no longer listed.
    pub fn expanded_id(&self) -> Option<LaunchId> {
        self.expanded
    }

    /// The expanded launch, if its id is in the list.
    pub fn expanded(&self) -> Option<&Launch> {
        let id = self.expanded?;
        self.items.iter().find(|launch| launch.id() == id)
    }

    pub fn is_expanded(&self, id: LaunchId) -> bool {
        self.expanded == Some(id) && self.items.iter().any(|launch| launch.id() == id)
    }

    /// Activates the list: binds the scroll handler and loads the current page.
    pub fn mount(&mut self) -> Option<FetchRequest> {
        self.mounted = true;
        let request = self.page_changed();
        self.rebind_scroll();
        request
    }

    /// Deactivates the list and releases its scroll handler.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.rebind_scroll();
    }

    /// Updates the query. A non-empty query starts a search fetch; clearing
    /// it only refetches if that moved the page back to 1. Clearing also
    /// abandons a search still in flight.
    pub fn set_search(&mut self, query: &str) -> Option<FetchRequest> {
        if query == self.search {
            return None;
        }
        self.search = query.to_string();

        let page_moved = self.page != 1;
        self.page = 1;
        self.has_more = true;

        if self.search.is_empty() && self.status == Status::Searching {
            self.abandon_search();
        }

        let request = if !self.search.is_empty() {
            Some(self.issue(RequestKind::Search {
                query: self.search.clone(),
            }))
        } else if page_moved {
            self.page_changed()
        } else {
            None
        };
        self.rebind_scroll();
        request
    }

    /// Routes a scroll event through the scroll subscription.
    pub fn scrolled(&mut self, event: ScrollEvent) -> Option<FetchRequest> {
        let actions = self.scroll.dispatch(&event);
        if !actions.contains(&ScrollAction::LoadMore) {
            return None;
        }
        self.page += 1;
        debug!(page = self.page, "scrolled near the bottom");
        let request = self.page_changed();
        self.rebind_scroll();
        request
    }

    /// Expands `id`, or collapses it if it is already expanded.
    pub fn toggle(&mut self, id: LaunchId) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    /// Applies a finished fetch.
    pub fn complete(&mut self, fetched: Fetched) -> Applied {
        let Fetched { seq, kind, result } = fetched;
        if seq != self.latest_request {
            debug!(seq, latest = self.latest_request, "dropping stale response");
            return Applied::Stale;
        }

        let applied = match result {
            Err(err) => {
                match &kind {
                    RequestKind::Page { page, .. } => {
                        error!(page, error = %err, "error fetching launches")
                    }
                    RequestKind::Search { query } => {
                        error!(query = %query, error = %err, "error fetching search results")
                    }
                }
                Applied::Failed
            }
            Ok(batch) => match kind {
                RequestKind::Page { page, query, .. } => {
                    let fetched = batch.len();
                    let batch = filter_by_name(batch, &query);
                    if batch.len() < self.page_size {
                        self.has_more = false;
                    }
                    info!(page, fetched, kept = batch.len(), "page loaded");
                    if page == 1 {
                        self.items = batch;
                        Applied::Replaced(self.items.len())
                    } else {
                        Applied::Appended(self.append(batch))
                    }
                }
                RequestKind::Search { query } => {
                    let batch = filter_by_name(batch, &query);
                    self.has_more = batch.len() > self.page_size;
                    info!(query = %query, matches = batch.len(), "search loaded");
                    self.items = batch;
                    Applied::Replaced(self.items.len())
                }
            },
        };

        self.status = Status::Idle;
        self.rebind_scroll();
        applied
    }

    fn append(&mut self, batch: Vec<Launch>) -> usize {
        let mut seen: HashSet<LaunchId> = self.items.iter().map(Launch::id).collect();
        let before = self.items.len();
        self.items
            .extend(batch.into_iter().filter(|launch| seen.insert(launch.id())));
        self.items.len() - before
    }

    /// Reacts to a page change: load it unless a search owns the list.
    fn page_changed(&mut self) -> Option<FetchRequest> {
        if self.status == Status::Searching {
            return None;
        }
        Some(self.issue(RequestKind::Page {
            page: self.page,
            limit: self.page_size,
            offset: (self.page - 1) * self.page_size,
            query: self.search.clone(),
        }))
    }

    /// Retires the in-flight search so its response arrives stale.
    fn abandon_search(&mut self) {
        self.latest_request += 1;
        self.status = Status::Idle;
        debug!(seq = self.latest_request, "search abandoned");
    }

    fn issue(&mut self, kind: RequestKind) -> FetchRequest {
        self.status = match kind {
            RequestKind::Page { .. } => Status::Paginating,
            RequestKind::Search { .. } => Status::Searching,
        };
        self.latest_request += 1;
        debug!(seq = self.latest_request, ?kind, "issuing fetch");
        FetchRequest {
            seq: self.latest_request,
            kind,
        }
    }

    /// Keeps the scroll handler in step with the values it captures.
    fn rebind_scroll(&mut self) {
        if !self.mounted {
            self.scroll_binding = None;
            return;
        }

        let capture = ScrollCapture {
            busy: self.status.is_busy(),
            has_more: self.has_more,
        };
        if matches!(&self.scroll_binding, Some((bound, _)) if *bound == capture) {
            return;
        }

        // Release before subscribing so only one handler is ever live.
        self.scroll_binding = None;
        let threshold = self.scroll_threshold;
        let subscription = self.scroll.subscribe(move |event: &ScrollEvent| {
            let near_bottom = event.rows_below() <= threshold;
            (near_bottom && !capture.busy && capture.has_more).then_some(ScrollAction::LoadMore)
        });
        self.scroll_binding = Some((capture, subscription));
    }
}
