//! Page bookkeeping for the comment list.
//!
//! Everything here is plain data: the page component owns a [`PageState`],
//! asks [`page_window`] for the slice to render, and rebuilds a
//! [`PaginationControl`] only on a full reload.

/// Active page plus page size. Page numbers are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PageState {
    pub active_page: usize,
    pub per_page: usize,
}

impl PageState {
    pub fn new(per_page: usize) -> Self {
        Self {
            active_page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Changing the page size keeps the active page; the next full reload corrects it.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }
}

/// Result of the pagination calculator: corrected active page and the
/// half-open item range `[start, end)` to display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub active_page: usize,
    pub page_count: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// `ceil(total / per_page)`, never less than one page.
pub(crate) fn page_count(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1)).max(1)
}

pub(crate) fn correct_active_page(previous_active: usize, page_count: usize) -> usize {
    if previous_active == 0 || previous_active > page_count {
        1
    } else {
        previous_active
    }
}

/// Item range for `active_page` without correcting it.
///
/// Used after navigation, when the control is kept as-is even if a refreshed
/// collection shrank; the range is clamped so it stays valid.
pub(crate) fn page_range(
    total_items: usize,
    per_page: usize,
    active_page: usize,
) -> (usize, usize) {
    let per_page = per_page.max(1);
    let start = active_page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(total_items);
    let end = start.saturating_add(per_page).min(total_items);
    (start, end)
}

pub(crate) fn page_window(
    total_items: usize,
    per_page: usize,
    previous_active: usize,
) -> PageWindow {
    let page_count = page_count(total_items, per_page);
    let active_page = correct_active_page(previous_active, page_count);
    let (start, end) = page_range(total_items, per_page, active_page);

    PageWindow {
        active_page,
        page_count,
        start,
        end,
    }
}

/// A click on the pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageNav {
    Previous,
    Next,
    Page(usize),
}

impl PageNav {
    pub fn label(&self) -> String {
        match self {
            PageNav::Previous => "Previous".to_string(),
            PageNav::Next => "Next".to_string(),
            PageNav::Page(n) => n.to_string(),
        }
    }
}

/// Applies a navigation click to `active`. Returns the new page, or `None`
/// when the click is a no-op.
pub(crate) fn navigate(active: usize, page_count: usize, nav: PageNav) -> Option<usize> {
    let next = match nav {
        PageNav::Previous if active <= 1 => return None,
        PageNav::Previous => active - 1,
        PageNav::Next if active >= page_count => return None,
        PageNav::Next => active + 1,
        PageNav::Page(n) if n == 0 || n > page_count => return None,
        PageNav::Page(n) => n,
    };

    (next != active).then_some(next)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PageEntry {
    pub nav: PageNav,
    pub active: bool,
}

/// The rendered pagination bar: `Previous`, one entry per page, `Next`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PaginationControl {
    entries: Vec<PageEntry>,
}

impl PaginationControl {
    pub fn build(page_count: usize, active_page: usize) -> Self {
        let page_count = page_count.max(1);
        let active_page = correct_active_page(active_page, page_count);

        let mut entries = Vec::with_capacity(page_count + 2);
        entries.push(PageEntry {
            nav: PageNav::Previous,
            active: false,
        });
        entries.extend((1..=page_count).map(|n| PageEntry {
            nav: PageNav::Page(n),
            active: n == active_page,
        }));
        entries.push(PageEntry {
            nav: PageNav::Next,
            active: false,
        });

        Self { entries }
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn page_count(&self) -> usize {
        self.entries.len() - 2
    }

    pub fn active_page(&self) -> usize {
        self.entries
            .iter()
            .find_map(|e| match e.nav {
                PageNav::Page(n) if e.active => Some(n),
                _ => None,
            })
            .unwrap_or(1)
    }

    /// Moves the active marker without rebuilding the entries.
    pub fn set_active(&mut self, page: usize) {
        if page == 0 || page > self.page_count() {
            return;
        }
        for e in &mut self.entries {
            e.active = e.nav == PageNav::Page(page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceil_with_minimum_one() {
        for per_page in 1..=12 {
            for total in 0usize..=60 {
                let expected = std::cmp::max(1, total.div_ceil(per_page));
                assert_eq!(
                    page_count(total, per_page),
                    expected,
                    "total={total} per_page={per_page}"
                );
            }
        }
    }

    #[test]
    fn active_page_past_the_end_resets_to_one() {
        for total in 0..=40 {
            let pages = page_count(total, 10);
            for previous in (pages + 1)..(pages + 5) {
                assert_eq!(page_window(total, 10, previous).active_page, 1);
            }
        }
    }

    #[test]
    fn zero_active_page_is_corrected() {
        assert_eq!(page_window(30, 10, 0).active_page, 1);
    }

    #[test]
    fn ranges_stay_within_bounds() {
        for per_page in 1..=7 {
            for total in 0..=30 {
                let pages = page_count(total, per_page);
                for active in 1..=pages {
                    let w = page_window(total, per_page, active);
                    assert_eq!(w.active_page, active);
                    assert!(w.start <= w.end);
                    assert!(w.end <= total);
                    assert!(w.end - w.start <= per_page);
                }
            }
        }
    }

    #[test]
    fn twenty_five_items_ten_per_page() {
        let first = page_window(25, 10, 1);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.range(), 0..10);

        let last = page_window(25, 10, 3);
        assert_eq!(last.range(), 20..25);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let w = page_window(0, 10, 1);
        assert_eq!(w.page_count, 1);
        assert_eq!(w.active_page, 1);
        assert_eq!(w.range(), 0..0);
    }

    #[test]
    fn page_range_clamps_stale_active_page() {
        assert_eq!(page_range(12, 5, 4), (12, 12));
    }

    #[test]
    fn previous_on_first_page_is_noop() {
        assert_eq!(navigate(1, 3, PageNav::Previous), None);
        assert_eq!(navigate(2, 3, PageNav::Previous), Some(1));
    }

    #[test]
    fn next_on_last_page_is_noop() {
        assert_eq!(navigate(3, 3, PageNav::Next), None);
        assert_eq!(navigate(2, 3, PageNav::Next), Some(3));
    }

    #[test]
    fn direct_page_jump() {
        assert_eq!(navigate(1, 5, PageNav::Page(4)), Some(4));
        assert_eq!(navigate(4, 5, PageNav::Page(4)), None);
        assert_eq!(navigate(1, 5, PageNav::Page(6)), None);
        assert_eq!(navigate(1, 5, PageNav::Page(0)), None);
    }

    #[test]
    fn control_has_exactly_one_active_page() {
        for pages in 1..=6 {
            for active in 0..=pages + 2 {
                let control = PaginationControl::build(pages, active);
                let active_count = control.entries().iter().filter(|e| e.active).count();
                assert_eq!(active_count, 1);
                assert_eq!(control.page_count(), pages);
                assert!((1..=pages).contains(&control.active_page()));
            }
        }
    }

    #[test]
    fn control_is_framed_by_previous_and_next() {
        let control = PaginationControl::build(2, 1);
        let navs: Vec<PageNav> = control.entries().iter().map(|e| e.nav).collect();
        assert_eq!(
            navs,
            vec![PageNav::Previous, PageNav::Page(1), PageNav::Page(2), PageNav::Next]
        );
    }

    #[test]
    fn set_active_moves_marker_in_place() {
        let mut control = PaginationControl::build(3, 1);
        control.set_active(3);
        assert_eq!(control.active_page(), 3);
        assert_eq!(control.entries().iter().filter(|e| e.active).count(), 1);

        control.set_active(9);
        assert_eq!(control.active_page(), 3);
    }

    #[test]
    fn page_nav_labels() {
        assert_eq!(PageNav::Previous.label(), "Previous");
        assert_eq!(PageNav::Next.label(), "Next");
        assert_eq!(PageNav::Page(2).label(), "2");
    }
}
