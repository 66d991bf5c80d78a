pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;

/// Paging + optional search filter shared by every list query.
#[derive(Debug, Clone)]
pub(crate) struct ListParams {
    pub(crate) limit: u32,
    pub(crate) page: u32,
    pub(crate) search: Option<String>,
}

impl ListParams {
    pub(crate) fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.limit as i64
    }
}

#[cfg(test)]
mod tests {
    use super::ListParams;

    #[test]
    fn offset_is_zero_based_from_page() {
        let params = ListParams {
            limit: 10,
            page: 3,
            search: None,
        };
        assert_eq!(params.offset(), 20);

        let first = ListParams {
            limit: 10,
            page: 1,
            search: None,
        };
        assert_eq!(first.offset(), 0);
    }
}
