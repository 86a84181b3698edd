//! Pagination types for list operations.

use crate::{NorthwindError, NorthwindResult};
use serde::{Deserialize, Serialize};

/// A validated request for a page of results.
///
/// Pages are 0-indexed and the offset is `page * limit`. Deserialization
/// goes through [`PageRequest::try_new`]; any serialized offset is ignored
/// and recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: i64,
    limit: i64,
    offset: i64,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: i64,
    limit: i64,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = NorthwindError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::try_new(raw.page, raw.limit)
    }
}

impl PageRequest {
    /// Creates a page request, rejecting a negative page, a non-positive
    /// limit, or an offset that does not fit in an `i64`.
    pub fn try_new(page: i64, limit: i64) -> NorthwindResult<Self> {
        if page < 0 {
            return Err(NorthwindError::validation(format!(
                "page must not be negative, got {}",
                page
            )));
        }
        if limit <= 0 {
            return Err(NorthwindError::validation(format!(
                "limit must be positive, got {}",
                limit
            )));
        }
        let offset = page.checked_mul(limit).ok_or_else(|| {
            NorthwindError::validation(format!(
                "offset for page {} with limit {} is out of range",
                page, limit
            ))
        })?;

        Ok(Self { page, limit, offset })
    }

    /// Returns the page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Returns the number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the maximum number of rows in the page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }
}
