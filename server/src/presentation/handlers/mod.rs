pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod users;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Common `?limit=&page=&search=` query; `search` is ignored by endpoints
/// without search fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PaginationQuery {
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    pub(crate) search: Option<String>,
}

impl PaginationQuery {
    pub(crate) const DEFAULT_LIMIT: u32 = 10;

    pub(crate) fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}
