//! Page-number windowing for the table pager.

use std::fmt;

use serde::Serialize;

/// Page counts up to this are shown in full.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// One pager slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// Pager slots for `current` out of `total` pages.
///
/// ```text
/// total <= 5          1 2 3 4 5
/// current <= 3        1 2 3 4 ... N
/// current >= N - 2    1 ... N-3 N-2 N-1 N
/// otherwise           1 ... c-1 c c+1 ... N
/// ```
#[must_use]
pub fn page_numbers(current: u32, total: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        let mut pages: Vec<_> = (1..=4).map(Page).collect();
        pages.extend([Ellipsis, Page(total)]);
        pages
    } else if current >= total - 2 {
        let mut pages = vec![Page(1), Ellipsis];
        pages.extend((total - 3..=total).map(Page));
        pages
    } else {
        let mut pages = vec![Page(1), Ellipsis];
        pages.extend((current - 1..=current + 1).map(Page));
        pages.extend([Ellipsis, Page(total)]);
        pages
    }
}

/// Render slots as a single pager line, bracketing the current page.
#[must_use]
pub fn pager_line(current: u32, total: u32) -> String {
    page_numbers(current, total)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) if n == current => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 3, vec![Page(1), Page(2), Page(3)])]
    #[case(5, 5, vec![Page(1), Page(2), Page(3), Page(4), Page(5)])]
    #[case(1, 10, vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)])]
    #[case(3, 10, vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)])]
    #[case(8, 10, vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)])]
    #[case(10, 10, vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)])]
    #[case(5, 10, vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)])]
    #[case(4, 6, vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)])]
    fn windows_pages(#[case] current: u32, #[case] total: u32, #[case] expected: Vec<PageItem>) {
        assert_eq!(page_numbers(current, total), expected);
    }

    #[test]
    fn zero_pages_is_empty() {
        assert!(page_numbers(1, 0).is_empty());
    }

    #[test]
    fn pager_line_marks_current() {
        assert_eq!(pager_line(5, 10), "1 ... 4 [5] 6 ... 10");
    }
}
