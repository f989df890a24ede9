use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Query key holding the current page number.
pub const PAGE: &str = "page";
/// Query key holding the rows-per-page choice.
pub const PAGE_SIZE: &str = "pageSize";
/// Query key selecting which translation the search runs against.
pub const SEARCH_LANGUAGE: &str = "searchLanguage";

/// Content language for search and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Persian, the site default.
    #[default]
    Fa,
    /// English.
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::Fa => "fa",
            Self::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "fa" => Some(Self::Fa),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The active filters of a listing page, mirrored into the URL query
/// string so reloads and shared links reproduce the same view.
///
/// Keys with empty values are never stored, so they never serialize as
/// `key=`. Page numbers are kept as strings like every other filter;
/// numeric accessors fall back to defaults on malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    entries: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state holding only `page=1` and the given page size, the result
    /// of the "clear all filters" action.
    pub fn cleared(page_size: u32) -> Self {
        let mut state = Self::new();
        state.set(PAGE, Some("1"));
        state.set(PAGE_SIZE, Some(page_size.to_string().as_str()));
        state
    }

    /// Parses a URL query string, dropping empty keys and values.
    /// A leading `?` is tolerated.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let entries = form_urlencoded::parse(query.as_bytes())
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { entries }
    }

    /// Serializes back into a URL query string with the UI-facing keys.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Sets or removes a single key without touching the page number.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.entries.insert(key.to_string(), value.to_string());
            }
            _ => {
                self.entries.remove(key);
            }
        }
    }

    /// Applies a batch of updates as one atomic change.
    ///
    /// Empty or `None` values clear their key. If any updated key is a
    /// content filter (anything other than `page` and `pageSize`), the
    /// page is forced back to `1` in the same change.
    pub fn apply<I, K, V>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut reset_page = false;
        for (key, value) in updates {
            let key = key.as_ref();
            self.set(key, value.as_ref().map(|value| value.as_ref()));
            if key != PAGE && key != PAGE_SIZE {
                reset_page = true;
            }
        }
        if reset_page {
            self.set(PAGE, Some("1"));
        }
    }

    /// The current page number, falling back to `1` on malformed input.
    pub fn page(&self) -> u64 {
        self.get(PAGE)
            .and_then(|value| value.parse().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }

    /// The rows-per-page choice, falling back to the given default.
    pub fn page_size(&self, default: u32) -> u32 {
        self.get(PAGE_SIZE)
            .and_then(|value| value.parse().ok())
            .filter(|size| *size >= 1)
            .unwrap_or(default)
    }

    /// Builds the backend request URL by appending every stored filter as
    /// a URL-encoded query parameter, translating UI keys to their
    /// backend names (`pageSize` to `page_size`, `searchLanguage` to
    /// `search_language`).
    pub fn request_url(&self, base_endpoint: &str) -> String {
        if self.entries.is_empty() {
            return base_endpoint.to_string();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(backend_param(key), value);
        }
        format!("{}?{}", base_endpoint, serializer.finish())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the stored `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

fn backend_param(key: &str) -> &str {
    match key {
        PAGE_SIZE => "page_size",
        SEARCH_LANGUAGE => "search_language",
        other => other,
    }
}
