//! Clubsite core: pure listing-page state machine and fetch-state model.
mod effect;
mod envelope;
mod error_detail;
mod fetch_state;
mod filters;
mod msg;
mod pagination;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use envelope::{list_payload, PageEnvelope};
pub use error_detail::{ErrorDetail, GENERIC_ERROR};
pub use fetch_state::{FetchState, FetchStatus};
pub use filters::{FilterState, Language, PAGE, PAGE_SIZE, SEARCH_LANGUAGE};
pub use msg::Msg;
pub use pagination::{page_controls, total_pages, PageControl};
pub use state::{ListingState, DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES};
pub use update::update;
pub use view_model::{ListingView, RenderBranch};
