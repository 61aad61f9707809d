//! Offset pagination primitives shared by list operations.

use serde::Serialize;
use utoipa::ToSchema;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Zero-based page selector.
///
/// # Examples
/// ```
/// use volunteer_service::domain::PageRequest;
///
/// let page = PageRequest::new(Some(2), Some(500));
/// assert_eq!(page.page(), 2);
/// assert_eq!(page.size(), 100);
/// assert_eq!(page.offset(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request, applying defaults and clamping `size` to
    /// `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the totals needed to render pagers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the slice returned by a store.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_items,
            total_pages: total_items.div_ceil(u64::from(request.size())),
        }
    }
}
