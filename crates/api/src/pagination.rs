//! Pagination envelope and page-size policy.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Error;

/// Uniform envelope for paginated endpoints: `total` is the full
/// filtered count irrespective of pagination, `data` holds at most
/// `limit` elements.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub data: Vec<T>,
}

/// Validated offset/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

/// Page-size ceilings, supplied by configuration and handed to the
/// router state at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Default page size when the caller omits `limit`
    pub default_size: i64,
    /// Ceiling for interactive lookups
    pub interactive_max: i64,
    /// Ceiling for the wide "latest" views (pivot, 10-minute data)
    pub latest_max: i64,
    /// Ceiling for bulk range exports
    pub bulk_max: i64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 20,
            interactive_max: 100,
            latest_max: 500,
            bulk_max: 10_000,
        }
    }
}

impl PageLimits {
    /// Validate a bare `limit` for a "latest N" endpoint against the
    /// interactive ceiling.
    pub fn latest(&self, limit: Option<u32>, default: i64) -> Result<i64, Error> {
        clamp(limit, default, self.interactive_max)
    }

    /// Validate a bare `limit` against the wide-view ceiling.
    pub fn wide_latest(&self, limit: Option<u32>, default: i64) -> Result<i64, Error> {
        clamp(limit, default, self.latest_max)
    }

    /// Validate an offset/limit pair for an interactive paginated
    /// endpoint.
    pub fn page(&self, offset: Option<u32>, limit: Option<u32>) -> Result<Page, Error> {
        self.page_with(offset, limit, self.default_size)
    }

    /// Validate an offset/limit pair for an interactive paginated
    /// endpoint whose default page size differs from the configured
    /// one.
    pub fn page_with(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
        default: i64,
    ) -> Result<Page, Error> {
        Ok(Page {
            offset: offset.unwrap_or(0) as i64,
            limit: clamp(limit, default, self.interactive_max)?,
        })
    }

    /// Validate an offset/limit pair for a bulk range export.
    pub fn bulk_page(&self, offset: Option<u32>, limit: Option<u32>) -> Result<Page, Error> {
        Ok(Page {
            offset: offset.unwrap_or(0) as i64,
            limit: clamp(limit, self.default_size, self.bulk_max)?,
        })
    }
}

fn clamp(limit: Option<u32>, default: i64, max: i64) -> Result<i64, Error> {
    match limit {
        None => Ok(default),
        Some(n) => {
            let n = n as i64;
            if n < 1 || n > max {
                Err(Error::Validation(format!(
                    "limit must be between 1 and {}",
                    max
                )))
            } else {
                Ok(n)
            }
        }
    }
}
