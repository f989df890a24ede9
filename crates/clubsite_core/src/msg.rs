use serde_json::Value;

use crate::ErrorDetail;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Restore filters from the page's query string on mount.
    QueryRestored(String),
    /// A filter control changed (search submitted, select changed).
    FilterChanged { key: String, value: String },
    /// A page button was clicked.
    PageSelected(u64),
    /// The rows-per-page selector changed.
    PageSizeChanged(u32),
    /// The "clear all filters" button was clicked.
    FiltersCleared,
    /// The backend request for the current filters resolved.
    RequestCompleted { result: Result<Value, ErrorDetail> },
    /// A row on the current page was deleted.
    RowRemoved,
}
