/// Page sizes offered to the user.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 25, 50];
pub const DEFAULT_ROWS_PER_PAGE: usize = ROWS_PER_PAGE_OPTIONS[0];

/// `ceil(total / size)`; zero games is zero pages.
pub fn total_pages(total_elements: u64, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 0;
    }
    total_elements.div_ceil(rows_per_page as u64) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    page: usize,
    rows_per_page: usize,
    total_elements: u64,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl PaginationController {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            page: 0,
            rows_per_page: if rows_per_page == 0 { DEFAULT_ROWS_PER_PAGE } else { rows_per_page },
            total_elements: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Always derived from the latest count, never cached.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_elements, self.rows_per_page)
    }

    /// Move to `page` if it exists. Returns the page to fetch, or `None` when
    /// the request is out of range or a no-op and must not reach the server.
    pub fn request_page(&mut self, page: usize) -> Option<usize> {
        if page >= self.total_pages() || page == self.page {
            return None;
        }
        self.page = page;
        Some(page)
    }

    pub fn next_page(&mut self) -> Option<usize> {
        self.request_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<usize> {
        self.request_page(self.page.checked_sub(1)?)
    }

    /// A new page size invalidates the current page, so it always restarts
    /// at page 0. Returns false when nothing changed.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> bool {
        if rows_per_page == 0 || rows_per_page == self.rows_per_page {
            return false;
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        true
    }

    /// The next larger (or smaller) entry of `ROWS_PER_PAGE_OPTIONS`, if any.
    pub fn neighbouring_rows_per_page(&self, larger: bool) -> Option<usize> {
        if larger {
            ROWS_PER_PAGE_OPTIONS.iter().copied().find(|n| *n > self.rows_per_page)
        } else {
            ROWS_PER_PAGE_OPTIONS.iter().rev().copied().find(|n| *n < self.rows_per_page)
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Take the count from the latest response. A shrinking listing pulls
    /// the current page back to the new last page.
    pub fn reconcile(&mut self, total_elements: u64) {
        self.total_elements = total_elements;
        self.page = self.page.min(self.total_pages().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        for (total, size, expected) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (49, 25, 2), (50, 25, 2), (101, 50, 3)] {
            assert_eq!(total_pages(total, size), expected, "{total}/{size}");
            let mut pagination = PaginationController::new(size);
            pagination.reconcile(total);
            assert_eq!(pagination.total_pages(), expected);
        }
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut pagination = PaginationController::new(10);
        assert_eq!(pagination.request_page(1), None);

        pagination.reconcile(25);
        assert_eq!(pagination.request_page(2), Some(2));
        assert_eq!(pagination.request_page(3), None);
        assert_eq!(pagination.next_page(), None);
        assert_eq!(pagination.page(), 2);
        assert_eq!(pagination.prev_page(), Some(1));
        assert_eq!(pagination.request_page(1), None);
    }

    #[test]
    fn shrinking_total_clamps_the_current_page() {
        let mut pagination = PaginationController::new(10);
        pagination.reconcile(30);
        assert_eq!(pagination.request_page(2), Some(2));

        pagination.reconcile(5);
        assert_eq!(pagination.page(), 0);
        assert_eq!(pagination.total_pages(), 1);

        pagination.reconcile(0);
        assert_eq!(pagination.page(), 0);
    }

    #[test]
    fn first_page_has_no_previous() {
        let mut pagination = PaginationController::new(10);
        pagination.reconcile(100);
        assert_eq!(pagination.prev_page(), None);
    }

    #[test]
    fn changing_rows_per_page_resets_to_first_page() {
        let mut pagination = PaginationController::new(10);
        pagination.reconcile(100);
        pagination.request_page(4);

        assert!(pagination.set_rows_per_page(25));
        assert_eq!(pagination.page(), 0);
        assert_eq!(pagination.total_pages(), 4);
        assert!(!pagination.set_rows_per_page(25));
    }

    #[test]
    fn rows_per_page_steps_within_options() {
        let mut pagination = PaginationController::new(10);
        assert_eq!(pagination.neighbouring_rows_per_page(false), None);
        assert_eq!(pagination.neighbouring_rows_per_page(true), Some(25));

        pagination.set_rows_per_page(50);
        assert_eq!(pagination.neighbouring_rows_per_page(true), None);
        assert_eq!(pagination.neighbouring_rows_per_page(false), Some(25));

        pagination.set_rows_per_page(30);
        assert_eq!(pagination.neighbouring_rows_per_page(true), Some(50));
        assert_eq!(pagination.neighbouring_rows_per_page(false), Some(25));
    }
}
