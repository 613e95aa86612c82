//! Deterministic windowing of a sorted sequence.

use serde::Serialize;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-indexed page number actually served (after clamping).
    pub current_page: usize,
    /// Total number of pages, never less than 1.
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total_items: usize,
    /// Page size used.
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Number of pages for `count` items; at least one.
#[inline]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Return page `page_number` (1-indexed) of `items`.
///
/// A page beyond the end is clamped to the last page and page 0 to the
/// first; a zero page size is treated as one.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = page_number.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let items_on_page = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items: items_on_page,
        current_page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 50), 1);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
        assert_eq!(total_pages(120, 50), 3);
    }

    #[test]
    fn test_pages_cover_every_item_once() {
        let items: Vec<u32> = (0..123).collect();
        let first = paginate(&items, 50, 1);
        assert_eq!(first.total_pages, 3);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let p = paginate(&items, 50, page);
            assert_eq!(p.current_page, page);
            seen.extend(p.items);
        }
        assert_eq!(seen, items);
        assert_eq!(paginate(&items, 50, 3).items.len(), 23);
    }

    #[test]
    fn test_overflow_clamps_to_last_page() {
        let items: Vec<u32> = (0..75).collect();
        let page = paginate(&items, 50, 9);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items, (50..75).collect::<Vec<_>>());
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_sequence() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 50, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_zero_page_and_zero_size() {
        let items = vec!['a', 'b', 'c'];
        let page = paginate(&items, 2, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items, vec!['a', 'b']);

        let page = paginate(&items, 0, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec!['b']);
    }
}
