#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Rewrite the page's query string in place. The shell must commit
    /// this as a history replace, not a push, so filter tweaks do not
    /// pollute back/forward navigation.
    ReplaceQuery { query: String },
    /// Issue a backend request for the derived URL.
    Request { url: String },
}
