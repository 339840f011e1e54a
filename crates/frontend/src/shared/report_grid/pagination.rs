use super::error::ReportGridError;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Current page cursor of a report grid (pages are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationController {
    page: u32,
    page_size: u32,
    total_count: u64,
}

/// Read-only pagination data for the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
    /// 1-based numbers of the first and last record on the page
    pub visible_range: Option<(u64, u64)>,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationController {
    /// Starts on page 1; a zero page size falls back to the default.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            total_count: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// `ceil(total / page_size)`; 0 when there are no rows
    pub fn page_count(&self) -> u32 {
        let pages = self.total_count.div_ceil(self.page_size as u64);
        pages.min(u32::MAX as u64) as u32
    }

    /// Moves to page `n`, clamped into `[1, page_count]` (page 1 when the
    /// result set is empty). Returns the page actually selected.
    pub fn go_to_page(&mut self, n: i64) -> u32 {
        let last = self.page_count().max(1) as i64;
        self.page = n.clamp(1, last) as u32;
        self.page
    }

    pub fn next_page(&mut self) -> u32 {
        self.go_to_page(self.page as i64 + 1)
    }

    pub fn previous_page(&mut self) -> u32 {
        self.go_to_page(self.page as i64 - 1)
    }

    pub fn first_page(&mut self) -> u32 {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> u32 {
        self.go_to_page(self.page_count() as i64)
    }

    /// Sets the page size and returns to page 1.
    pub fn change_page_size(&mut self, page_size: u32) -> Result<(), ReportGridError> {
        if page_size == 0 {
            return Err(ReportGridError::InvalidPagination {
                page: self.page,
                page_size,
            });
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Records the total reported by the data source and re-clamps the
    /// current page. Returns true when the page had to move.
    pub fn sync_total(&mut self, total_count: u64) -> bool {
        self.total_count = total_count;
        let before = self.page;
        self.go_to_page(before as i64) != before
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.total_count == 0 {
            return None;
        }
        let size = self.page_size as u64;
        let start = (self.page as u64 - 1) * size + 1;
        if start > self.total_count {
            return None;
        }
        let end = (start + size - 1).min(self.total_count);
        Some((start, end))
    }

    pub fn view(&self) -> PaginationView {
        PaginationView {
            page: self.page,
            page_size: self.page_size,
            page_count: self.page_count(),
            total_count: self.total_count,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            visible_range: self.visible_range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_total(page_size: u32, total: u64) -> PaginationController {
        let mut p = PaginationController::new(page_size);
        p.sync_total(total);
        p
    }

    #[test]
    fn test_page_count_is_ceiling() {
        assert_eq!(with_total(25, 0).page_count(), 0);
        assert_eq!(with_total(25, 1).page_count(), 1);
        assert_eq!(with_total(25, 25).page_count(), 1);
        assert_eq!(with_total(25, 26).page_count(), 2);
        assert_eq!(with_total(10, 101).page_count(), 11);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut p = with_total(10, 45);
        assert_eq!(p.go_to_page(0), 1);
        assert_eq!(p.go_to_page(-7), 1);
        assert_eq!(p.go_to_page(3), 3);
        assert_eq!(p.go_to_page(99), 5);
    }

    #[test]
    fn test_empty_result_stays_on_page_one() {
        let mut p = with_total(10, 0);
        assert_eq!(p.page_count(), 0);
        assert_eq!(p.go_to_page(4), 1);
        assert_eq!(p.last_page(), 1);
        assert!(!p.has_next());
        assert!(!p.has_previous());
        assert_eq!(p.visible_range(), None);
    }

    #[test]
    fn test_navigation_wrappers() {
        let mut p = with_total(10, 30);
        assert_eq!(p.previous_page(), 1);
        assert_eq!(p.next_page(), 2);
        assert_eq!(p.last_page(), 3);
        assert_eq!(p.next_page(), 3);
        assert!(!p.has_next());
        assert!(p.has_previous());
        assert_eq!(p.first_page(), 1);
    }

    #[test]
    fn test_change_page_size_resets_page() {
        let mut p = with_total(10, 100);
        p.go_to_page(7);
        p.change_page_size(25).unwrap();
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_count(), 4);
        assert!(p.change_page_size(0).is_err());
        assert_eq!(p.page_size(), 25);
    }

    #[test]
    fn test_sync_total_reclamps() {
        let mut p = with_total(10, 100);
        p.go_to_page(10);
        assert!(p.sync_total(35));
        assert_eq!(p.page(), 4);
        assert!(!p.sync_total(40));
    }

    #[test]
    fn test_visible_range() {
        let mut p = with_total(25, 60);
        assert_eq!(p.visible_range(), Some((1, 25)));
        p.last_page();
        assert_eq!(p.visible_range(), Some((51, 60)));
        assert_eq!(p.view().page_count, 3);
    }
}
