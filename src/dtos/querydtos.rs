use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct RequestQueryDto {
    #[validate(range(min = 0, message = "skip cannot be negative"))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl RequestQueryDto {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Query parameters of a listing search. Without `skip`/`limit` the whole
/// matching set is returned.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct SearchQueryDto {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[validate(range(min = 0, message = "skip cannot be negative"))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}
