use serde::Serialize;

/// Items per page on every listing endpoint
pub const PAGE_SIZE: usize = 5;

/// Listings never expose more than this many results
pub const HARD_CAP: usize = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Page {requested} does not exist (total pages: {total_pages})")]
    OutOfRange { requested: i64, total_pages: u32 },
}

/// One window of a capped, ordered result set
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    /// Number of results after capping
    pub count: usize,
    pub total_pages: u32,
    pub current_page: u32,
    pub results: Vec<T>,
}

/// Cuts the requested 1-based page out of `items`.
///
/// The input is truncated to [`HARD_CAP`] before totals are computed, so `count`
/// and `total_pages` describe the capped set. An empty input still has one
/// (empty) page; any other page outside `1..=total_pages` is an error.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Result<Page<T>, PageError> {
    let mut items = items;
    items.truncate(HARD_CAP);

    let count = items.len();
    let total_pages = count.div_ceil(PAGE_SIZE).max(1) as u32;

    if page < 1 || page > i64::from(total_pages) {
        return Err(PageError::OutOfRange {
            requested: page,
            total_pages,
        });
    }

    let current_page = page as u32;
    let start = (current_page as usize - 1) * PAGE_SIZE;
    let results: Vec<T> = items.into_iter().skip(start).take(PAGE_SIZE).collect();

    Ok(Page {
        count,
        total_pages,
        current_page,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_before_counting() {
        let items: Vec<u32> = (1..=23).collect();
        let page = paginate(items.clone(), 1).unwrap();
        assert_eq!(page.count, 20);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.results, vec![1, 2, 3, 4, 5]);

        let last = paginate(items.clone(), 4).unwrap();
        assert_eq!(last.results, vec![16, 17, 18, 19, 20]);

        assert_eq!(
            paginate(items, 5),
            Err(PageError::OutOfRange {
                requested: 5,
                total_pages: 4
            })
        );
    }

    #[test]
    fn test_partial_last_page() {
        let page = paginate((1..=7).collect::<Vec<u32>>(), 2).unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.results, vec![6, 7]);
    }

    #[test]
    fn test_empty_input_has_one_empty_page() {
        let page = paginate(Vec::<u32>::new(), 1).unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.results.is_empty());
        assert!(paginate(Vec::<u32>::new(), 2).is_err());
    }

    #[test]
    fn test_pages_below_one_are_out_of_range() {
        for page in [0, -1, i64::MIN] {
            assert_eq!(
                paginate(vec![1u32], page),
                Err(PageError::OutOfRange {
                    requested: page,
                    total_pages: 1
                })
            );
        }
    }
}
