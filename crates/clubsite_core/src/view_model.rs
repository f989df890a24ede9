use serde_json::Value;

use crate::pagination::PageControl;
use crate::ErrorDetail;

/// Which of the mutually exclusive page branches to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBranch {
    /// Spinner: a request is in flight (or none has started yet).
    Loading,
    /// Generic error panel.
    Failed,
    /// "No results" view: the request succeeded with an empty list.
    Empty,
    /// The populated table or list.
    Populated,
}

/// Snapshot handed to the presentational layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub branch: RenderBranch,
    pub rows: Vec<Value>,
    pub error: Option<ErrorDetail>,
    pub page: u64,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub controls: Vec<PageControl>,
}
