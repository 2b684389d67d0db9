//! Pagination and filtering query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, StringWithSeparator, formats::CommaSeparator, serde_as};
use validator::Validate;

use crate::domain::entities::SubscriptionStatus;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse numbers from query strings, which keeps them
/// working under `#[serde(flatten)]`.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    /// `-1` lists everything on a single page.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = -1))]
    pub size: Option<i64>,
}

impl PaginationParams {
    /// Applies the defaults: page 1, `default_size` items per page.
    pub fn resolve(&self, default_size: i64) -> PageRequest {
        PageRequest {
            page: self.page.unwrap_or(1),
            size: self.size.unwrap_or(default_size),
        }
    }
}

/// Page requested by the caller, defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

/// Query parameters of the subscriber listings.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SubscribersQueryParams {
    #[serde(flatten)]
    #[validate(nested)]
    pub pagination: PaginationParams,

    /// Comma separated, e.g. `statuses=ACCEPTED,PAUSED`. Absent means all.
    #[serde_as(as = "Option<StringWithSeparator<CommaSeparator, SubscriptionStatus>>")]
    #[serde(default)]
    pub statuses: Option<Vec<SubscriptionStatus>>,
}
