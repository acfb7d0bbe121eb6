use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

/// One page of a sequence plus the derived page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Number of pages needed for `len` items; 0 for an empty sequence.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice `[(page_number - 1) * page_size, page_number * page_size)` of
/// `items`, clamped to its bounds. Page 0, a zero page size and pages past
/// the end give an empty slice.
pub fn paginate<T>(items: &[T], page_number: usize, page_size: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    if page_number == 0 || page_size == 0 {
        return Page { items: &[], total_pages };
    }

    let start = (page_number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return Page { items: &[], total_pages };
    }
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_pages() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 1, 10);
        assert_eq!(page.items, &items[0..10]);
        assert_eq!(page.total_pages, 3);

        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let items: Vec<u32> = (1..=25).collect();

        assert!(paginate(&items, 4, 10).items.is_empty());
        assert_eq!(paginate(&items, 4, 10).total_pages, 3);
        assert!(paginate(&items, 0, 10).items.is_empty());
        assert!(paginate(&items, usize::MAX, 10).items.is_empty());
        assert!(paginate(&items, 1, 0).items.is_empty());
    }

    #[test]
    fn test_empty_sequence() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_pages_cover_sequence_exactly_once() {
        for len in [0usize, 1, 9, 10, 11, 37] {
            for size in [1usize, 3, 10, 50] {
                let items: Vec<usize> = (0..len).collect();
                let total = paginate(&items, 1, size).total_pages;

                let rebuilt: Vec<usize> = (1..=total)
                    .flat_map(|n| paginate(&items, n, size).items.iter().copied())
                    .collect();
                assert_eq!(rebuilt, items, "len={} size={}", len, size);
            }
        }
    }
}
