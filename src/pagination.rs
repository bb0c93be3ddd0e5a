//! Offset pagination primitives shared by the repository and service layers.

use crate::domain::types::TypeConstraintError;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 2000;

/// Zero-based page number paired with a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Validates raw request values. Negative pages and non-positive sizes are rejected.
    pub fn new(page: i64, size: i64) -> Result<Self, TypeConstraintError> {
        let page = usize::try_from(page).map_err(|_| {
            TypeConstraintError::InvalidValue(format!("page must not be negative, got {page}"))
        })?;
        let size = usize::try_from(size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!("size must be positive, got {size}"))
            })?;

        Ok(Self { page, size })
    }

    /// Builds a request from values already known to be valid.
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total: usize) -> Self {
        Self {
            content,
            request,
            total,
        }
    }

    /// Builds a page whose total is computed only when `content` cannot
    /// determine it. See [`resolve_total`].
    pub fn with_deferred_total<E, F>(
        content: Vec<T>,
        request: PageRequest,
        count: F,
    ) -> Result<Self, E>
    where
        F: FnOnce() -> Result<usize, E>,
    {
        let total = resolve_total(request, content.len(), count)?;
        Ok(Self::new(content, request, total))
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_elements(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.request.size())
    }

    pub fn number(&self) -> usize {
        self.request.page()
    }

    pub fn size(&self) -> usize {
        self.request.size()
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.request.page() == 0
    }

    pub fn is_last(&self) -> bool {
        self.request.page() + 1 >= self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Works out the total row count for a page, calling `count` only when the
/// page content alone is not enough.
///
/// The count is skipped when the first page is not full (the content is the
/// whole result) and when a later page is non-empty but not full (the total is
/// `offset + content_len`).
pub fn resolve_total<E, F>(request: PageRequest, content_len: usize, count: F) -> Result<usize, E>
where
    F: FnOnce() -> Result<usize, E>,
{
    let limit = request.limit();
    let offset = request.offset();

    if offset == 0 {
        if content_len < limit {
            return Ok(content_len);
        }
        return count();
    }

    if content_len != 0 && content_len < limit {
        return Ok(offset + content_len);
    }

    count()
}
