pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;

/// `%`-wrapped pattern for the optional ILIKE filter; `None` disables the
/// filter entirely (`$n IS NULL` short-circuits the predicate).
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"))
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn wraps_term_in_wildcards() {
        assert_eq!(like_pattern(Some("foo")).as_deref(), Some("%foo%"));
    }

    #[test]
    fn blank_or_missing_search_disables_filter() {
        assert_eq!(like_pattern(None), None);
        assert_eq!(like_pattern(Some("   ")), None);
        assert_eq!(like_pattern(Some("")), None);
    }
}
