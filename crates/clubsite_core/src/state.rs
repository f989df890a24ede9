use serde_json::Value;

use crate::filters::{FilterState, PAGE, PAGE_SIZE};
use crate::pagination;
use crate::view_model::{ListingView, RenderBranch};
use crate::{FetchState, FetchStatus};

/// Rows-per-page default for listing pages.
pub const DEFAULT_PAGE_SIZE: u32 = 5;
/// The choices offered by the rows-per-page selector.
pub const PAGE_SIZE_CHOICES: [u32; 5] = [5, 8, 10, 25, 50];

/// State of one paginated listing page.
///
/// Owns the query-synchronized filters, the fetch state of the current
/// backend request, and the last loaded rows. Mutation happens only
/// through [`crate::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    endpoint: String,
    default_page_size: u32,
    filters: FilterState,
    fetch: FetchState,
    rows: Vec<Value>,
    total_count: u64,
    dirty: bool,
}

impl ListingState {
    /// A listing bound to `endpoint` with the standard page size.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_page_size(endpoint, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(endpoint: impl Into<String>, default_page_size: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            default_page_size: default_page_size.max(1),
            filters: FilterState::new(),
            fetch: FetchState::new(),
            rows: Vec::new(),
            total_count: 0,
            dirty: false,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn fetch(&self) -> &FetchState {
        &self.fetch
    }

    pub fn page(&self) -> u64 {
        self.filters.page()
    }

    pub fn page_size(&self) -> u32 {
        self.filters.page_size(self.default_page_size)
    }

    pub fn total_pages(&self) -> u64 {
        pagination::total_pages(self.total_count, self.page_size())
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ListingView {
        let branch = match self.fetch.status() {
            FetchStatus::Idle | FetchStatus::Loading => RenderBranch::Loading,
            FetchStatus::Failed => RenderBranch::Failed,
            FetchStatus::Success if self.rows.is_empty() => RenderBranch::Empty,
            FetchStatus::Success => RenderBranch::Populated,
        };
        ListingView {
            branch,
            rows: self.rows.clone(),
            error: self.fetch.error().cloned(),
            page: self.page(),
            page_size: self.page_size(),
            total_count: self.total_count,
            total_pages: self.total_pages(),
            controls: pagination::page_controls(self.page(), self.total_pages()),
        }
    }

    /// Returns and clears the dirty flag, for render coalescing.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The backend URL for the current filters. The page number and page
    /// size are always sent, even before they appear in the query string.
    pub(crate) fn request_url(&self) -> String {
        let mut filters = self.filters.clone();
        if filters.get(PAGE).is_none() {
            filters.set(PAGE, Some("1"));
        }
        if filters.get(PAGE_SIZE).is_none() {
            filters.set(PAGE_SIZE, Some(self.default_page_size.to_string().as_str()));
        }
        filters.request_url(&self.endpoint)
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub(crate) fn replace_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.fetch.begin();
        self.dirty = true;
    }

    pub(crate) fn apply_success(&mut self, payload: Value, rows: Vec<Value>, count: u64) {
        self.fetch.succeed(payload);
        self.rows = rows;
        self.total_count = count;
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self, error: crate::ErrorDetail) {
        // Rows are kept: a failed follow-up request (e.g. a rejected
        // delete) must not blank the list the page was showing.
        self.fetch.fail(error);
        self.dirty = true;
    }
}
