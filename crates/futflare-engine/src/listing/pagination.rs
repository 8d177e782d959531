use std::fmt;

/// At most this many page numbers are shown at once.
pub const MAX_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSlot::Page(n) => write!(f, "{}", n),
            PageSlot::Ellipsis => f.write_str("…"),
        }
    }
}

/// Page-number controls for `current` of `total` pages.
///
/// Up to five pages are listed directly. Beyond that the first and last page
/// stay reachable and three pages centred on `current` fill the middle, with
/// an ellipsis wherever pages are skipped.
pub fn page_window(current: u32, total: u32) -> Vec<PageSlot> {
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let middle = MAX_VISIBLE_PAGES - 2;
    let current = current.clamp(1, total);
    let start = current.saturating_sub(middle / 2).clamp(2, total - middle);
    let end = start + middle - 1;

    let mut slots = Vec::with_capacity(MAX_VISIBLE_PAGES as usize + 2);
    slots.push(PageSlot::Page(1));
    if start > 2 {
        slots.push(PageSlot::Ellipsis);
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total - 1 {
        slots.push(PageSlot::Ellipsis);
    }
    slots.push(PageSlot::Page(total));
    slots
}

/// Current position in a paginated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Target of the "previous" control, `None` on the first page. From
    /// beyond the last page this lands on the last page.
    pub fn previous(&self) -> Option<u32> {
        self.has_previous()
            .then(|| (self.page - 1).min(self.total_pages.max(1)))
    }

    /// Target of the "next" control, `None` on the last page.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn window(&self) -> Vec<PageSlot> {
        page_window(self.page, self.total_pages)
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<String> = self
            .window()
            .into_iter()
            .map(|slot| match slot {
                PageSlot::Page(n) if n == self.page => format!("[{}]", n),
                other => other.to_string(),
            })
            .collect();
        f.write_str(&slots.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(slots: &[PageSlot]) -> Vec<u32> {
        slots
            .iter()
            .filter_map(|s| match s {
                PageSlot::Page(n) => Some(*n),
                PageSlot::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_small_totals_show_everything() {
        assert_eq!(
            page_window(2, 3),
            vec![PageSlot::Page(1), PageSlot::Page(2), PageSlot::Page(3)]
        );
        assert!(page_window(1, 0).is_empty());
        assert_eq!(pages(&page_window(5, 5)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_middle_page_gets_ellipses_on_both_sides() {
        let window = page_window(7, 12);
        assert_eq!(
            window,
            vec![
                PageSlot::Page(1),
                PageSlot::Ellipsis,
                PageSlot::Page(6),
                PageSlot::Page(7),
                PageSlot::Page(8),
                PageSlot::Ellipsis,
                PageSlot::Page(12),
            ]
        );
    }

    #[test]
    fn test_edges_keep_five_numbers() {
        assert_eq!(pages(&page_window(1, 12)), vec![1, 2, 3, 4, 12]);
        assert_eq!(pages(&page_window(12, 12)), vec![1, 9, 10, 11, 12]);
        assert_eq!(page_window(1, 12).iter().filter(|s| **s == PageSlot::Ellipsis).count(), 1);
    }

    #[test]
    fn test_every_position_shows_five_pages_including_ends() {
        for total in 6..30 {
            for current in 1..=total {
                let shown = pages(&page_window(current, total));
                assert_eq!(shown.len(), 5, "total={total} current={current}");
                assert_eq!(shown.first(), Some(&1));
                assert_eq!(shown.last(), Some(&total));
                assert!(shown.contains(&current));
            }
        }
    }

    #[test]
    fn test_previous_and_next_stop_at_bounds() {
        let first = Pagination::new(1, 3);
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination::new(3, 3);
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(2));

        let past_end = Pagination::new(99, 4);
        assert_eq!(past_end.previous(), Some(4));
        assert_eq!(past_end.next(), None);
        assert_eq!(Pagination::new(5, 4).previous(), Some(4));
        assert_eq!(Pagination::new(7, 0).previous(), Some(1));

        let empty = Pagination::new(1, 0);
        assert_eq!(empty.next(), None);
        assert_eq!(empty.previous(), None);
    }
}
