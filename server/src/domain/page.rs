use serde::Serialize;

/// Pagination envelope shared by every list endpoint.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Page<T> {
    pub(crate) data: Vec<T>,
    pub(crate) limit: u32,
    pub(crate) page: u32,
    pub(crate) total: i64,
    pub(crate) total_pages: u32,
    pub(crate) has_next: bool,
    pub(crate) has_prev: bool,
}

impl<T> Page<T> {
    /// `limit` and `page` are 1-based and must already be validated as positive.
    pub(crate) fn new(data: Vec<T>, limit: u32, page: u32, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total as u64).div_ceil(limit as u64) as u32
        };

        Self {
            data,
            limit,
            page,
            total: total.max(0),
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            limit: self.limit,
            page: self.page,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn total_pages_is_ceiling_of_total_over_limit() {
        let page = Page::new(vec![1, 2, 3], 10, 1, 31);
        assert_eq!(page.total_pages, 4);

        let page = Page::new(vec![1], 10, 1, 30);
        assert_eq!(page.total_pages, 3);

        let page = Page::new(vec![1], 7, 1, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn has_next_and_has_prev_follow_page_position() {
        let first = Page::new(vec![0; 10], 10, 1, 25);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let middle = Page::new(vec![0; 10], 10, 2, 25);
        assert!(middle.has_next);
        assert!(middle.has_prev);

        let last = Page::new(vec![0; 5], 10, 3, 25);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let page = Page::<i64>::new(vec![], 10, 1, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);

        // page beyond the (empty) data still reports has_prev
        let page = Page::<i64>::new(vec![], 10, 3, 0);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn map_preserves_envelope_fields() {
        let page = Page::new(vec![1, 2], 2, 2, 6).map(|n| n.to_string());
        assert_eq!(page.data, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(page.limit, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 3);
    }
}
