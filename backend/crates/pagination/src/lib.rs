//! Page-number pagination primitives.
//!
//! Pages are 1-indexed. [`paginate`] is a plain slice operation and does
//! **not** clamp its page number: callers are expected to clamp with
//! [`clamp_page`] against [`page_count`] first. An out-of-range page yields
//! an empty slice rather than wrapping or panicking. [`Page::from_items`]
//! bundles the clamp-then-slice sequence for callers that want an envelope.
//!
//! # Example
//!
//! ```
//! use pagination::{clamp_page, page_count, paginate};
//!
//! let items: Vec<u32> = (1..=23).collect();
//! assert_eq!(paginate(&items, 5, 3), &[11, 12, 13, 14, 15]);
//! assert_eq!(paginate(&items, 5, 5), &[21, 22, 23]);
//!
//! // Page 9 does not exist; clamp before slicing.
//! let last = clamp_page(9, page_count(items.len(), 5));
//! assert_eq!(last, 5);
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page sizes must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Returns the `page_number`-th page of `items`, counting from 1.
///
/// The page number is used as given. Page 0, pages past the end, and a zero
/// page size all produce an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> &[T] {
    let Some(zero_based) = page_number.checked_sub(1) else {
        return &[];
    };
    let start = zero_based.saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed to show `total_items` items, `page_size` at a time.
///
/// Returns 0 for an empty collection or a zero page size.
#[must_use]
pub const fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Clamps `page` to `[1, max(1, page_count)]`.
///
/// An empty collection still has a first (empty) page to show.
#[must_use]
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// A validated request for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: NonZeroUsize,
}

impl PageRequest {
    /// Builds a request for `page` with `page_size` items per page.
    ///
    /// The page number is not validated here; [`Page::from_items`] clamps it
    /// against the actual collection size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] if `page_size` is zero.
    pub fn new(page: usize, page_size: usize) -> Result<Self, PaginationError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(PaginationError::ZeroPageSize)?;
        Ok(Self { page, page_size })
    }

    /// Requested page number, before clamping.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }
}

/// One page of items together with the totals a pager needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page number actually served, after clamping.
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Size of the whole collection.
    pub total_items: usize,
    /// Number of pages in the whole collection.
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Clamps the requested page against `items` and slices it out.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let items: Vec<u32> = (1..=7).collect();
    /// let request = PageRequest::new(4, 5).expect("non-zero page size");
    /// let page = Page::from_items(&items, request);
    ///
    /// assert_eq!(page.page, 2);
    /// assert_eq!(page.items, vec![6, 7]);
    /// assert!(!page.has_next());
    /// ```
    #[must_use]
    pub fn from_items(items: &[T], request: PageRequest) -> Self {
        let page_size = request.page_size();
        let total_pages = page_count(items.len(), page_size);
        let page = clamp_page(request.page(), total_pages);
        Self {
            items: paginate(items, page_size, page).to_vec(),
            page,
            page_size,
            total_items: items.len(),
            total_pages,
        }
    }
}

impl<T> Page<T> {
    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn items() -> Vec<u32> {
        (1..=23).collect()
    }

    #[rstest]
    #[case(1, vec![1, 2, 3, 4, 5])]
    #[case(3, vec![11, 12, 13, 14, 15])]
    #[case(5, vec![21, 22, 23])]
    #[case(6, vec![])]
    #[case(0, vec![])]
    fn paginate_slices_one_indexed_pages(
        items: Vec<u32>,
        #[case] page: usize,
        #[case] expected: Vec<u32>,
    ) {
        assert_eq!(paginate(&items, 5, page), expected.as_slice());
    }

    #[rstest]
    fn paginate_does_not_clamp(items: Vec<u32>) {
        assert!(paginate(&items, 5, 99).is_empty());
        assert!(paginate(&items, 5, usize::MAX).is_empty());
    }

    #[rstest]
    fn zero_page_size_yields_nothing(items: Vec<u32>) {
        assert!(paginate(&items, 0, 1).is_empty());
        assert_eq!(page_count(items.len(), 0), 0);
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(5, 5, 1)]
    #[case(6, 5, 2)]
    #[case(23, 5, 5)]
    fn page_count_rounds_up(#[case] total: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(page_count(total, size), expected);
    }

    #[rstest]
    #[case(0, 5, 1)]
    #[case(3, 5, 3)]
    #[case(9, 5, 5)]
    #[case(4, 0, 1)]
    fn clamp_page_stays_in_range(#[case] page: usize, #[case] count: usize, #[case] expected: usize) {
        assert_eq!(clamp_page(page, count), expected);
    }

    #[test]
    fn page_request_rejects_zero_size() {
        assert_eq!(PageRequest::new(1, 0), Err(PaginationError::ZeroPageSize));
    }

    #[rstest]
    fn page_envelope_reports_totals(items: Vec<u32>) {
        let request = PageRequest::new(3, 5).expect("valid request");
        let page = Page::from_items(&items, request);
        assert_eq!(page.items, vec![11, 12, 13, 14, 15]);
        assert_eq!(page.total_items, 23);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn empty_collection_serves_an_empty_first_page() {
        let request = PageRequest::new(3, 5).expect("valid request");
        let page = Page::<u32>::from_items(&[], request);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn page_serializes_to_camel_case() {
        let request = PageRequest::new(1, 2).expect("valid request");
        let page = Page::from_items(&[1_u32, 2, 3], request);
        let json = serde_json::to_string(&page).expect("serialize");
        assert!(json.contains("\"pageSize\":2"));
        assert!(json.contains("\"totalPages\":2"));
    }
}
