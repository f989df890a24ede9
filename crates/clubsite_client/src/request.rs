use clubsite_core::Language;
use reqwest::Method;
use serde_json::Value;

/// Per-resource request configuration.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    /// Overrides the auto-fire default. When unset, a resource fires on
    /// creation exactly when its method is `GET`.
    pub fire_on_create: Option<bool>,
    /// Value of the `Accept-Language` header, read from the persisted
    /// language preference at construction time.
    pub language: Language,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            method: Method::GET,
            fire_on_create: None,
            language: Language::default(),
        }
    }
}

impl RequestConfig {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn fire_on_create(mut self, fire: bool) -> Self {
        self.fire_on_create = Some(fire);
        self
    }

    pub(crate) fn auto_fires(&self) -> bool {
        self.fire_on_create.unwrap_or(self.method == Method::GET)
    }
}

/// A fully resolved request handed to the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: reqwest::Url,
    pub language: Language,
    /// JSON-serialized and sent as the body when present.
    pub body: Option<Value>,
}
