/// One element of the page-button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Page {
        number: u64,
        /// Whether this is the page currently shown.
        current: bool,
        /// First and last buttons are non-interactive while shown.
        disabled: bool,
    },
    Ellipsis,
}

/// Number of pages needed for `total_items` rows.
///
/// Never zero: an empty result set still renders one page button.
pub fn total_pages(total_items: u64, page_size: u32) -> u64 {
    let size = u64::from(page_size.max(1));
    total_items.div_ceil(size).max(1)
}

/// The page-button row for the given position.
///
/// Page 1 is always shown; the window `[current-1, current+1]` is shown
/// clamped to `[2, total-1]`; the last page is shown whenever there is
/// more than one; ellipses mark the gaps on either side.
pub fn page_controls(current_page: u64, total_pages: u64) -> Vec<PageControl> {
    let current = current_page.max(1);
    let mut controls = vec![PageControl::Page {
        number: 1,
        current: current == 1,
        disabled: current == 1,
    }];

    if current > 3 {
        controls.push(PageControl::Ellipsis);
    }

    let window_start = current.saturating_sub(1).max(2);
    let window_end = (current + 1).min(total_pages.saturating_sub(1));
    for number in window_start..=window_end {
        controls.push(PageControl::Page {
            number,
            current: current == number,
            disabled: false,
        });
    }

    if current + 2 < total_pages && total_pages > 3 {
        controls.push(PageControl::Ellipsis);
    }

    if total_pages > 1 {
        controls.push(PageControl::Page {
            number: total_pages,
            current: current == total_pages,
            disabled: current == total_pages,
        });
    }

    controls
}
