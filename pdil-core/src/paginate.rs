pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Fixed-size, 1-based pagination over an already filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

/// One slice of the sequence. `first_row` is the 1-based position of the
/// first item within the whole sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub number: usize,
    pub first_row: usize,
    pub items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items paired with their row number in the whole sequence.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let (first_row, items) = (self.first_row, self.items);
        items
            .iter()
            .enumerate()
            .map(move |(i, item)| (first_row + i, item))
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Clamps a page number into `[1, max(1, total_pages)]`.
    pub fn clamp(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.total_pages(len).max(1))
    }

    pub fn next(&self, page: usize, len: usize) -> usize {
        let page = self.clamp(page, len);
        if page * self.page_size < len {
            page + 1
        } else {
            page
        }
    }

    pub fn prev(&self, page: usize, len: usize) -> usize {
        self.clamp(page.saturating_sub(1), len)
    }

    /// Slices `[(page-1)*size, page*size)`. A page past the end comes back
    /// short or empty. Page 0 is read as page 1.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> Page<'a, T> {
        let number = page.max(1);
        let start = (number - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        Page {
            number,
            first_row: (number - 1).saturating_mul(self.page_size).saturating_add(1),
            items: &items[start..end],
        }
    }
}
