//! Conversion between user-facing page numbers and the API's 1-based start
//! indices. Pages are 10-wide buckets; the mapping from start index to page
//! is many-to-one.

pub const PAGE_SIZE: u32 = 10;

/// Number of page links offered regardless of how many results exist.
pub const NAVIGABLE_PAGES: u32 = 10;

/// Highest page whose start index fits in a `u32`.
pub const MAX_PAGE: u32 = u32::MAX / PAGE_SIZE + 1;

/// Page 1 starts at index 1, page N at `(N - 1) * 10`.
///
/// Pages up to [`MAX_PAGE`] map exactly; larger pages saturate at the
/// highest representable start index and no longer round-trip.
pub fn page_to_start_index(page: u32) -> u32 {
    if page <= 1 {
        return 1;
    }
    (page - 1).saturating_mul(PAGE_SIZE)
}

pub fn start_index_to_page(start_index: u32) -> u32 {
    if start_index < PAGE_SIZE {
        return 1;
    }
    start_index / PAGE_SIZE + 1
}

pub fn is_same_page(start_index: u32, page: u32) -> bool {
    start_index_to_page(start_index) == page
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub current_page: u32,
    pub pages: Vec<u32>,
}

impl PageMetadata {
    pub fn from_start_index(start_index: u32) -> PageMetadata {
        // TODO: derive the page count from total_results once product decides
        // whether the fixed ten links are intentional.
        PageMetadata {
            current_page: start_index_to_page(start_index),
            pages: (1..=NAVIGABLE_PAGES).collect(),
        }
    }
}

#[test]
fn test_page_to_start_index() {
    assert_eq!(page_to_start_index(1), 1);
    assert_eq!(page_to_start_index(2), 10);
    assert_eq!(page_to_start_index(5), 40);
    assert_eq!(page_to_start_index(0), 1);
}

#[test]
fn test_page_range_limit() {
    assert_eq!(page_to_start_index(MAX_PAGE), (MAX_PAGE - 1) * PAGE_SIZE);
    assert_eq!(start_index_to_page(page_to_start_index(MAX_PAGE)), MAX_PAGE);
    assert_eq!(page_to_start_index(u32::MAX), u32::MAX);
}

#[test]
fn test_start_index_to_page() {
    assert_eq!(start_index_to_page(1), 1);
    assert_eq!(start_index_to_page(9), 1);
    assert_eq!(start_index_to_page(10), 2);
    assert_eq!(start_index_to_page(15), 2);
    assert_eq!(start_index_to_page(19), 2);
    assert_eq!(start_index_to_page(21), 3);
}

#[test]
fn test_page_metadata_is_fixed_width() {
    let meta = PageMetadata::from_start_index(21);
    assert_eq!(meta.current_page, 3);
    assert_eq!(meta.pages, (1..=10).collect::<Vec<u32>>());
}
