//! Offset pagination primitives shared by the catalogue server and client.
//!
//! A [`PageRequest`] is a validated `(page, limit)` pair. Pages are 1-based and
//! the page size is capped at [`MAX_LIMIT`]; requests above the cap are
//! rejected rather than silently clamped. [`PageInfo`] describes the slice a
//! server returned, and [`Page`] pairs it with the items.
//!
//! ```
//! use pagination::{PageInfo, PageRequest};
//!
//! let request = PageRequest::parse(Some("2"), Some("5")).expect("valid request");
//! assert_eq!(request.offset(), 5);
//!
//! let info = PageInfo::new(request, 12);
//! assert_eq!(info.pages, 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page number used when a request omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when a request omits `limit`.
pub const DEFAULT_LIMIT: u32 = 5;
/// Largest page size a request may ask for.
pub const MAX_LIMIT: u32 = 50;

/// Query parameter a pagination error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageField {
    /// The 1-based page number.
    Page,
    /// The page size.
    Limit,
}

impl PageField {
    /// Wire name of the parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for PageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while validating pagination input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The raw value is not an integer.
    #[error("{field} must be a positive integer")]
    NotAnInteger {
        /// Offending parameter.
        field: PageField,
        /// Raw value as received.
        value: String,
    },
    /// The value is zero or negative.
    #[error("{field} must be at least 1")]
    BelowMinimum {
        /// Offending parameter.
        field: PageField,
    },
    /// The page number does not fit the supported range.
    #[error("{field} is out of range")]
    OutOfRange {
        /// Offending parameter.
        field: PageField,
    },
    /// The page size exceeds [`MAX_LIMIT`].
    #[error("limit must not exceed {max}")]
    LimitTooLarge {
        /// Configured maximum.
        max: u32,
        /// Requested page size.
        value: u64,
    },
}

impl PaginationError {
    /// Parameter the error refers to.
    #[must_use]
    pub const fn field(&self) -> PageField {
        match self {
            Self::NotAnInteger { field, .. }
            | Self::BelowMinimum { field }
            | Self::OutOfRange { field } => *field,
            Self::LimitTooLarge { .. } => PageField::Limit,
        }
    }
}

/// Validated 1-based page number and page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Validate a typed page number and page size.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when either value is zero or `limit`
    /// exceeds [`MAX_LIMIT`].
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::BelowMinimum {
                field: PageField::Page,
            });
        }
        if limit == 0 {
            return Err(PaginationError::BelowMinimum {
                field: PageField::Limit,
            });
        }
        if limit > MAX_LIMIT {
            return Err(PaginationError::LimitTooLarge {
                max: MAX_LIMIT,
                value: u64::from(limit),
            });
        }
        Ok(Self { page, limit })
    }

    /// Validate raw query-string values, applying defaults for absent or
    /// blank parameters.
    ///
    /// ```
    /// use pagination::{PageRequest, PaginationError};
    ///
    /// let defaults = PageRequest::parse(None, None).expect("defaults");
    /// assert_eq!((defaults.page(), defaults.limit()), (1, 5));
    ///
    /// let too_large = PageRequest::parse(None, Some("51"));
    /// assert!(matches!(too_large, Err(PaginationError::LimitTooLarge { .. })));
    /// ```
    ///
    /// # Errors
    /// Returns [`PaginationError`] when a value is not an integer, is below 1,
    /// or exceeds the supported range.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = parse_field(page, PageField::Page)?.unwrap_or(u64::from(DEFAULT_PAGE));
        let limit = parse_field(limit, PageField::Limit)?.unwrap_or(u64::from(DEFAULT_LIMIT));

        if limit > u64::from(MAX_LIMIT) {
            return Err(PaginationError::LimitTooLarge {
                max: MAX_LIMIT,
                value: limit,
            });
        }
        let page = u32::try_from(page).map_err(|_| PaginationError::OutOfRange {
            field: PageField::Page,
        })?;
        let limit = u32::try_from(limit).map_err(|_| PaginationError::OutOfRange {
            field: PageField::Limit,
        })?;
        Self::new(page, limit)
    }

    /// Return a request for another page with the same page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::BelowMinimum`] when `page` is zero.
    pub fn with_page(self, page: u32) -> Result<Self, PaginationError> {
        Self::new(page, self.limit)
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

fn parse_field(raw: Option<&str>, field: PageField) -> Result<Option<u64>, PaginationError> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let parsed: i128 = raw.parse().map_err(|_| PaginationError::NotAnInteger {
        field,
        value: raw.to_owned(),
    })?;
    if parsed < 1 {
        return Err(PaginationError::BelowMinimum { field });
    }
    Ok(Some(u64::try_from(parsed).unwrap_or(u64::MAX)))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PaginationError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

/// Number of pages needed to hold `total` records at `limit` per page.
///
/// An empty result set has zero pages.
#[must_use]
pub fn page_count(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

/// Clamp a page number into `1..=pages`.
///
/// When there are no pages the first page is returned so that callers always
/// hold a valid request.
///
/// ```
/// use pagination::clamp_page;
///
/// assert_eq!(clamp_page(3, 2), 2);
/// assert_eq!(clamp_page(3, 0), 1);
/// ```
#[must_use]
pub fn clamp_page(page: u32, pages: u64) -> u32 {
    let last = u32::try_from(pages).unwrap_or(u32::MAX).max(1);
    page.clamp(1, last)
}

/// Description of the slice returned for a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page number that was served.
    pub page: u32,
    /// Page size that was applied.
    pub limit: u32,
    /// Total number of records across all pages.
    pub total: u64,
    /// Number of pages, `ceil(total / limit)`.
    pub pages: u64,
}

impl PageInfo {
    /// Describe `request` against a collection holding `total` records.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: page_count(total, request.limit),
        }
    }

    /// Whether a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of items plus its [`PageInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in collection order.
    pub data: Vec<T>,
    /// Position of this page within the collection.
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Pair items with their page description.
    #[must_use]
    pub fn new(data: Vec<T>, pagination: PageInfo) -> Self {
        Self { data, pagination }
    }

    /// Convert every item, keeping the page description.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Unit coverage for request parsing and page maths.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 5)]
    #[case(Some("3"), None, 3, 5)]
    #[case(None, Some("50"), 1, 50)]
    #[case(Some(" 2 "), Some(""), 2, 5)]
    fn parse_applies_defaults(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::parse(page, limit).expect("valid request");
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(Some("0"), None, PageField::Page)]
    #[case(Some("-4"), None, PageField::Page)]
    #[case(None, Some("0"), PageField::Limit)]
    fn parse_rejects_values_below_one(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] field: PageField,
    ) {
        let err = PageRequest::parse(page, limit).expect_err("below minimum");
        assert_eq!(err, PaginationError::BelowMinimum { field });
    }

    #[rstest]
    fn parse_rejects_non_integers() {
        let err = PageRequest::parse(Some("1.5"), None).expect_err("not an integer");
        assert_eq!(err.field(), PageField::Page);
        assert_eq!(err.to_string(), "page must be a positive integer");
    }

    #[rstest]
    #[case("51")]
    #[case("100")]
    #[case("99999999999999999999")]
    fn parse_rejects_limits_over_the_cap(#[case] limit: &str) {
        let err = PageRequest::parse(None, Some(limit)).expect_err("over the cap");
        assert!(matches!(err, PaginationError::LimitTooLarge { max: 50, .. }));
        assert_eq!(err.to_string(), "limit must not exceed 50");
    }

    #[rstest]
    #[case(1, 5, 0)]
    #[case(2, 5, 5)]
    #[case(4, 10, 30)]
    fn offset_skips_preceding_pages(#[case] page: u32, #[case] limit: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(12, 5, 3)]
    #[case(10, 5, 2)]
    #[case(1, 50, 1)]
    fn page_count_rounds_up(#[case] total: u64, #[case] limit: u32, #[case] pages: u64) {
        assert_eq!(page_count(total, limit), pages);
    }

    #[rstest]
    #[case(1, 3, 1)]
    #[case(4, 3, 3)]
    #[case(0, 3, 1)]
    #[case(2, 0, 1)]
    fn clamp_page_stays_within_bounds(#[case] page: u32, #[case] pages: u64, #[case] expected: u32) {
        assert_eq!(clamp_page(page, pages), expected);
    }

    #[rstest]
    fn page_info_serialises_with_wire_names() {
        let request = PageRequest::new(1, 5).expect("valid request");
        let info = PageInfo::new(request, 12);
        let value = serde_json::to_value(info).expect("serialise page info");
        assert_eq!(
            value,
            serde_json::json!({ "page": 1, "limit": 5, "total": 12, "pages": 3 })
        );
        assert!(info.has_next());
        assert!(!info.has_previous());
    }

    #[rstest]
    fn page_request_deserialisation_enforces_the_cap() {
        let result: Result<PageRequest, _> =
            serde_json::from_value(serde_json::json!({ "page": 1, "limit": 80 }));
        assert!(result.is_err());
    }
}
