//! Abstractions for page-number pagination.

use std::num::NonZeroUsize;

use derive_more::{Display, Error};

/// Pagination arguments selecting a single page of an ordered sequence.
///
/// Pages are 1-indexed: the page `n` of size `s` covers the 0-indexed
/// offsets `(n - 1) * s` through `(n - 1) * s + s - 1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// 1-indexed number of the requested page.
    page: NonZeroUsize,

    /// Maximum number of items on the requested page.
    size: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`] out of the provided `page` number and `size`.
    ///
    /// # Errors
    ///
    /// With an [`InvalidPaginationError`] if either `page` or `size` is not a
    /// positive integer.
    pub fn new<Num>(page: Num, size: Num) -> Result<Self, InvalidPaginationError>
    where
        Num: TryInto<usize>,
    {
        let page = page
            .try_into()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(InvalidPaginationError::Page)?;
        let size = size
            .try_into()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(InvalidPaginationError::Size)?;
        Ok(Self { page, size })
    }

    /// Returns the 1-indexed page number requested by these [`Arguments`].
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page.get()
    }

    /// Returns the page size requested by these [`Arguments`].
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size.get()
    }

    /// Returns the 0-indexed offset of the first item on the requested page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page.get() - 1).saturating_mul(self.size.get())
    }

    /// Selects the requested page out of the provided ordered `items`.
    ///
    /// Returns an empty page if the offset is past the end of `items`.
    pub fn paginate<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.size())
            .collect()
    }
}

/// Selects the `page` of the provided `size` out of the ordered `items`.
///
/// # Errors
///
/// With an [`InvalidPaginationError`] if either `page` or `size` is not a
/// positive integer.
pub fn paginate<T, Num>(
    items: impl IntoIterator<Item = T>,
    page: Num,
    size: Num,
) -> Result<Vec<T>, InvalidPaginationError>
where
    Num: TryInto<usize>,
{
    Arguments::new(page, size).map(|args| args.paginate(items))
}

/// Error of malformed pagination [`Arguments`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidPaginationError {
    /// Page number is not a positive integer.
    #[display("page number must be a positive integer")]
    Page,

    /// Page size is not a positive integer.
    #[display("page size must be a positive integer")]
    Size,
}

#[cfg(test)]
mod spec {
    use super::{paginate, Arguments, InvalidPaginationError};

    #[test]
    fn selects_requested_page() {
        let items = (1..=7).collect::<Vec<_>>();

        assert_eq!(paginate(items.clone(), 1, 3).unwrap(), [1, 2, 3]);
        assert_eq!(paginate(items.clone(), 2, 3).unwrap(), [4, 5, 6]);
        assert_eq!(paginate(items.clone(), 3, 3).unwrap(), [7]);
        assert_eq!(paginate(items, 1, 10).unwrap(), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn returns_empty_page_past_the_end() {
        let items = vec!["a", "b"];

        assert!(paginate(items.clone(), 2, 2).unwrap().is_empty());
        assert!(paginate(items, 100, 1).unwrap().is_empty());
        assert!(paginate(Vec::<u8>::new(), 1, 5).unwrap().is_empty());
    }

    #[test]
    fn pages_reconstruct_sequence() {
        let items = (0..23).collect::<Vec<_>>();

        for size in 1..=25 {
            let pages = items.len().div_ceil(size);
            let mut joined = Vec::new();
            for page in 1..=pages {
                let chunk = paginate(items.iter().copied(), page, size).unwrap();
                assert!(chunk.len() <= size, "page {page} of size {size}");
                joined.extend(chunk);
            }
            assert_eq!(joined, items, "size {size}");
        }
    }

    #[test]
    fn rejects_non_positive_arguments() {
        assert_eq!(
            paginate(vec![1], 0, 1).unwrap_err(),
            InvalidPaginationError::Page,
        );
        assert_eq!(
            paginate(vec![1], 1, 0).unwrap_err(),
            InvalidPaginationError::Size,
        );
        assert_eq!(
            Arguments::new(-1_i64, 5).unwrap_err(),
            InvalidPaginationError::Page,
        );
        assert_eq!(
            Arguments::new(1_i64, -5).unwrap_err(),
            InvalidPaginationError::Size,
        );
    }

    #[test]
    fn offset_does_not_overflow() {
        let args = Arguments::new(usize::MAX, usize::MAX).unwrap();

        assert_eq!(args.offset(), usize::MAX);
        assert!(args.paginate(vec![1, 2, 3]).is_empty());
    }
}
