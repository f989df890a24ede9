use crate::envelope::list_payload;
use crate::filters::{FilterState, PAGE, PAGE_SIZE};
use crate::{Effect, ListingState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListingState, msg: Msg) -> (ListingState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryRestored(raw) => {
            state.replace_filters(FilterState::from_query(&raw));
            state.begin_fetch();
            // The query string is the source here, so only the request
            // needs to go out.
            vec![request(&state)]
        }
        Msg::FilterChanged { key, value } => {
            state
                .filters_mut()
                .apply([(key.as_str(), Some(value.as_str()))]);
            state.begin_fetch();
            vec![replace_query(&state), request(&state)]
        }
        Msg::PageSelected(page) => {
            if page == 0 || page > state.total_pages() || page == state.page() {
                return (state, Vec::new());
            }
            state
                .filters_mut()
                .set(PAGE, Some(page.to_string().as_str()));
            state.begin_fetch();
            vec![replace_query(&state), request(&state)]
        }
        Msg::PageSizeChanged(size) => {
            if size == 0 {
                return (state, Vec::new());
            }
            let filters = state.filters_mut();
            filters.set(PAGE_SIZE, Some(size.to_string().as_str()));
            filters.set(PAGE, Some("1"));
            state.begin_fetch();
            vec![replace_query(&state), request(&state)]
        }
        Msg::FiltersCleared => {
            state.replace_filters(FilterState::cleared(state.page_size()));
            state.begin_fetch();
            vec![replace_query(&state), request(&state)]
        }
        Msg::RequestCompleted { result } => {
            match result {
                Ok(payload) => {
                    let (rows, count) = list_payload(&payload);
                    state.apply_success(payload, rows, count);
                }
                Err(error) => state.apply_failure(error),
            }
            Vec::new()
        }
        Msg::RowRemoved => {
            // Deleting the last row of a later page steps back one page;
            // otherwise the current page is re-requested as-is.
            if state.rows().len() == 1 && state.page() > 1 {
                let previous = state.page() - 1;
                state
                    .filters_mut()
                    .set(PAGE, Some(previous.to_string().as_str()));
                state.begin_fetch();
                vec![replace_query(&state), request(&state)]
            } else {
                state.begin_fetch();
                vec![request(&state)]
            }
        }
    };

    (state, effects)
}

fn replace_query(state: &ListingState) -> Effect {
    Effect::ReplaceQuery {
        query: state.filters().to_query(),
    }
}

fn request(state: &ListingState) -> Effect {
    Effect::Request {
        url: state.request_url(),
    }
}
