//! # Pagination
//!
//! 1-based page cursor shared by the inventory and expense lists.
//!
//! ```text
//! items:  [a b c d e f g h | i j k l m n o p | q r]     page_size = 8
//!          └──── page 1 ───┘ └──── page 2 ───┘ └ 3 ┘
//!
//! prev() on page 1 stays on 1, next() on the last page stays there.
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    /// A zero `page_size` is treated as 1.
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Paginator {
            page: 1,
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn next(&mut self) -> usize {
        self.page = (self.page + 1).min(self.page_count());
        self.page
    }

    pub fn prev(&mut self) -> usize {
        self.page = self.page.saturating_sub(1).max(1);
        self.page
    }

    /// Jumps to a page, clamped to `[1, page_count]`.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.page_count());
        self.page
    }

    /// Index range `[(p-1)*size, p*size)` clipped to the list length.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// The current page's slice of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slices() {
        let items: Vec<u32> = (1..=18).collect();
        let mut pager = Paginator::new(8, items.len());

        assert_eq!(pager.page_count(), 3);
        assert_eq!(pager.slice(&items), &items[0..8]);

        pager.next();
        assert_eq!(pager.slice(&items), &items[8..16]);

        pager.next();
        assert_eq!(pager.slice(&items), &[17, 18]);
    }

    #[test]
    fn test_next_and_prev_clamp() {
        let mut pager = Paginator::new(10, 20);

        assert_eq!(pager.prev(), 1);
        assert!(!pager.has_prev());

        assert_eq!(pager.next(), 2);
        assert_eq!(pager.next(), 2);
        assert!(!pager.has_next());

        assert_eq!(pager.go_to(0), 1);
        assert_eq!(pager.go_to(99), 2);
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        let mut pager = Paginator::new(8, 0);

        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.next(), 1);
        assert!(pager.slice(&items).is_empty());
    }
}
