use serde_json::Value;

use crate::ErrorDetail;

/// Where a fetch currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Tri-state result of a single resource fetch.
///
/// `data` and `error` are never both fresh: `begin` clears the previous
/// error, `succeed` replaces the data, and `fail` sets the error while
/// keeping stale data around so a page can keep rendering its last good
/// list under a failed follow-up request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchState {
    status: FetchStatus,
    data: Option<Value>,
    error: Option<ErrorDetail>,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request as started.
    pub fn begin(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// Records a decoded successful payload.
    pub fn succeed(&mut self, data: Value) {
        self.status = FetchStatus::Success;
        self.data = Some(data);
        self.error = None;
    }

    /// Records a failure. Previously loaded data is kept as stale.
    pub fn fail(&mut self, error: ErrorDetail) {
        self.status = FetchStatus::Failed;
        self.error = Some(error);
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.status == FetchStatus::Failed
    }
}
