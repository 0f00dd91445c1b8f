//! Offset and cursor pagination.
//!
//! Both modes own only the sort, skip and limit of the query they rewrite;
//! the condition, columns and entity name pass through untouched.

use crate::Config;

use semimap_core::{
    stmt::{Cursor, PageRequest, SelectQuery},
    Error, Result,
};

use tracing::trace;

/// One page fetched by offset.
#[derive(Debug, Clone)]
pub struct Page<M> {
    content: Vec<M>,
    request: PageRequest,
    has_next: bool,
}

/// One page fetched by cursor.
#[derive(Debug, Clone)]
pub struct CursorPage<M> {
    content: Vec<M>,
    request: PageRequest,
    next: Option<Cursor>,
    previous: Option<Cursor>,
}

impl<M> Page<M> {
    pub(crate) fn new(content: Vec<M>, request: PageRequest, has_next: bool) -> Self {
        Self {
            content,
            request,
            has_next,
        }
    }

    pub fn content(&self) -> &[M] {
        &self.content
    }

    pub fn into_content(self) -> Vec<M> {
        self.content
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_next.then(|| self.request.next())
    }
}

impl<M> CursorPage<M> {
    pub(crate) fn new(
        content: Vec<M>,
        request: PageRequest,
        next: Option<Cursor>,
        previous: Option<Cursor>,
    ) -> Self {
        Self {
            content,
            request,
            next,
            previous,
        }
    }

    pub fn content(&self) -> &[M] {
        &self.content
    }

    pub fn into_content(self) -> Vec<M> {
        self.content
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Cursor after the last object of this page.
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.next.as_ref()
    }

    /// Cursor before the first object of this page.
    pub fn previous_cursor(&self) -> Option<&Cursor> {
        self.previous.as_ref()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn next_request(&self) -> Option<PageRequest> {
        let cursor = self.next.clone()?;
        let page = self.request.page().saturating_add(1);
        PageRequest::after_cursor(cursor, page, self.request.size()).ok()
    }

    pub fn previous_request(&self) -> Option<PageRequest> {
        let cursor = self.previous.clone()?;
        let page = self.request.page().saturating_sub(1).max(1);
        PageRequest::before_cursor(cursor, page, self.request.size()).ok()
    }
}

/// Rewrites `query` for an offset page. One extra entity is requested to
/// learn whether another page follows.
pub(crate) fn offset(mut query: SelectQuery, request: &PageRequest) -> Result<SelectQuery> {
    if request.is_cursor() {
        return Err(Error::illegal_argument(
            "offset pagination requires an offset page request",
        ));
    }

    query.skip = request.offset();
    query.limit = request.size().saturating_add(1);

    trace!(entity = %query.name, skip = query.skip, limit = query.limit, "offset page");
    Ok(query)
}

/// Checks `query` can be paged by cursor and clears its skip.
pub(crate) fn cursor(mut query: SelectQuery, config: &Config) -> Result<SelectQuery> {
    match query.sorts.len() {
        0 => {
            return Err(Error::precondition_failed(format!(
                "cursor pagination on `{}` requires at least one sort",
                query.name
            )))
        }
        1 => {}
        n if !config.cursor_multiple_sorts => {
            return Err(Error::precondition_failed(format!(
                "cursor pagination on `{}` has {n} sorts but supports only one by default; \
                 set `{}` to enable multiple sorts",
                query.name,
                Config::CURSOR_MULTIPLE_SORTS
            )))
        }
        _ => {}
    }

    query.skip = 0;

    trace!(entity = %query.name, sorts = query.sorts.len(), "cursor page");
    Ok(query)
}
