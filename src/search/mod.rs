//! Search orchestration
//!
//! Decides, per request, whether the catalog is listed or searched, and keeps the
//! browse view's state: active filters, current page, the last good result list and
//! the loading gate.
//!
//! # Routing
//!
//! ```text
//! filters ──normalize──▶ empty?  ── yes ──▶ GET  /properties?page&limit
//!                                └─ no  ──▶ POST /properties/search {filters.., page, limit}
//! ```
//!
//! # Superseded requests
//!
//! Every fetch is started with [`SearchOrchestrator::begin`], which hands out a
//! [`FetchTicket`] tagged with an increasing sequence number. Only the completion of
//! the most recently issued ticket is applied; anything older is dropped, so a slow
//! response for page 1 can never overwrite the page 2 the user already moved to.

mod page;

pub use page::{Endpoint, ResultPage};

use crate::client::{ApiClient, Result, Transport};
use crate::filters::{FilterSet, ListParams, SearchRequest};
use crate::models::Property;
use crate::notify::{Notice, Notifications};
use tracing::{debug, error, info};

/// Page size of the browse view
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Number of featured listings on the landing view
pub const FEATURED_LIMIT: u32 = 6;

/// The one message shown for any failed fetch
pub const LOAD_ERROR: &str = "Error loading properties";

/// Which endpoint a filter set is served by
pub fn route(filters: &FilterSet) -> Endpoint {
    if filters.is_active() {
        Endpoint::Search
    } else {
        Endpoint::List
    }
}

/// Fetch one page of listings for `filters`.
///
/// Filters are normalized first; an empty result routes to the list endpoint with
/// only `page` and `limit`, anything else to the search endpoint with filters, page
/// and limit in one body.
pub async fn fetch_page<T: Transport>(
    client: &ApiClient<T>,
    filters: &FilterSet,
    page: u32,
    page_size: u32,
) -> Result<ResultPage> {
    let normalized = filters.normalize();
    let endpoint = route(&normalized);

    let items = match endpoint {
        Endpoint::Search => {
            debug!(
                "Searching page {} with filters {:?}",
                page,
                normalized.active_keys()
            );
            client
                .properties()
                .search(&SearchRequest::new(&normalized, page, page_size))
                .await?
        }
        Endpoint::List => {
            debug!("Listing page {}", page);
            client
                .properties()
                .list(&ListParams::page(page, page_size))
                .await?
        }
    };

    Ok(ResultPage {
        items,
        page,
        page_size,
        endpoint,
    })
}

/// Featured listings for the landing view
pub async fn featured<T: Transport>(client: &ApiClient<T>, limit: u32) -> Result<Vec<Property>> {
    client.properties().list(&ListParams::featured(limit)).await
}

/// A fetch that has been started but not applied yet
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    seq: u64,
    filters: FilterSet,
    page: u32,
    page_size: u32,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Perform the request this ticket stands for
    pub async fn fetch<T: Transport>(&self, client: &ApiClient<T>) -> Result<ResultPage> {
        fetch_page(client, &self.filters, self.page, self.page_size).await
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Results replaced the view
    Applied,
    /// A newer fetch was issued meanwhile; ignored
    Stale,
    /// The fetch failed; previous results kept and the user notified
    Failed,
}

/// Browse view state for one catalog view
#[derive(Debug)]
pub struct SearchOrchestrator {
    filters: FilterSet,
    page: u32,
    page_size: u32,
    results: Vec<Property>,
    last_count: usize,
    loading: bool,
    loaded: bool,
    issued: u64,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchOrchestrator {
    /// A fresh view at page 1 with no filters
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: FilterSet::new(),
            page: 1,
            page_size: page_size.max(1),
            results: Vec::new(),
            last_count: 0,
            loading: false,
            loaded: false,
            issued: 0,
        }
    }

    /// A view that starts out with `filters` already applied (nothing fetched yet)
    pub fn with_filters(page_size: u32, filters: FilterSet) -> Self {
        Self {
            filters,
            ..Self::new(page_size)
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Listings currently on display
    pub fn results(&self) -> &[Property] {
        &self.results
    }

    /// Size of the last page that was applied
    pub fn count(&self) -> usize {
        self.last_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Full-page spinner: only while the very first load is pending
    pub fn show_spinner(&self) -> bool {
        self.loading && !self.loaded
    }

    /// A load finished and found nothing: render the empty state with "clear filters"
    pub fn is_empty_result(&self) -> bool {
        self.loaded && self.results.is_empty()
    }

    /// Never true on the last representable page
    pub fn has_next(&self) -> bool {
        self.loaded && self.page < u32::MAX && page::has_next(self.last_count, self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Start a fetch for the current filters and page
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket {
            seq: self.issued,
            filters: self.filters.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Replace the filters; the page always goes back to 1
    pub fn set_filters(&mut self, filters: FilterSet) -> FetchTicket {
        if filters.normalize() != self.filters.normalize() {
            info!("Filters changed: {:?}", filters.active_keys());
        }
        self.filters = filters;
        self.page = 1;
        self.begin()
    }

    /// Move to `page` (clamped to 1)
    pub fn set_page(&mut self, page: u32) -> FetchTicket {
        self.page = page.max(1);
        self.begin()
    }

    /// Apply the outcome of a fetch started with [`begin`](Self::begin)
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<ResultPage>,
        notices: &mut Notifications,
    ) -> Completion {
        if ticket.seq != self.issued {
            debug!(
                "Dropping response #{} (latest is #{})",
                ticket.seq, self.issued
            );
            return Completion::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                debug!(
                    "Page {} via {:?}: {} listings",
                    page.page,
                    page.endpoint,
                    page.count()
                );
                self.last_count = page.count();
                self.results = page.items;
                self.loaded = true;
                Completion::Applied
            }
            Err(e) => {
                error!("Failed to load page {}: {}", ticket.page, e);
                notices.push(Notice::error(LOAD_ERROR));
                Completion::Failed
            }
        }
    }

    /// Fetch the current page and apply it
    pub async fn load<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Completion {
        let ticket = self.begin();
        self.run(ticket, client, notices).await
    }

    /// Replace the filters (page → 1) and load
    pub async fn apply_filters<T: Transport>(
        &mut self,
        filters: FilterSet,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Completion {
        let ticket = self.set_filters(filters);
        self.run(ticket, client, notices).await
    }

    /// Reset the search form to its empty baseline and load the plain catalog
    pub async fn clear_filters<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Completion {
        self.apply_filters(FilterSet::reset(), client, notices).await
    }

    /// Jump to `page` and load
    pub async fn go_to_page<T: Transport>(
        &mut self,
        page: u32,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Completion {
        let ticket = self.set_page(page);
        self.run(ticket, client, notices).await
    }

    /// Next page, if the last one came back full
    pub async fn next_page<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Option<Completion> {
        if !self.has_next() {
            return None;
        }
        let next = self.page.checked_add(1)?;
        Some(self.go_to_page(next, client, notices).await)
    }

    /// Previous page; nothing to do on page 1
    pub async fn previous_page<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Option<Completion> {
        if !self.has_previous() {
            return None;
        }
        Some(self.go_to_page(self.page - 1, client, notices).await)
    }

    async fn run<T: Transport>(
        &mut self,
        ticket: FetchTicket,
        client: &ApiClient<T>,
        notices: &mut Notifications,
    ) -> Completion {
        let outcome = ticket.fetch(client).await;
        self.complete(&ticket, outcome, notices)
    }
}
