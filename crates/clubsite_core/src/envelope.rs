use serde::Deserialize;
use serde_json::Value;

/// The paginated envelope list endpoints answer with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageEnvelope {
    pub count: u64,
    pub results: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

impl PageEnvelope {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Extracts the rows and total count from a successful list payload.
///
/// Most list endpoints answer with a `PageEnvelope`; a few answer with a
/// bare array, which counts as a single page. Anything else yields an
/// empty list.
pub fn list_payload(value: &Value) -> (Vec<Value>, u64) {
    if let Some(envelope) = PageEnvelope::from_value(value) {
        let count = envelope.count;
        (envelope.results, count)
    } else if let Some(items) = value.as_array() {
        (items.clone(), items.len() as u64)
    } else {
        (Vec::new(), 0)
    }
}
