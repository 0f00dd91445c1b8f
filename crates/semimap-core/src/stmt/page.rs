use super::{CommunicationEntity, CriteriaCondition, Sort, Value};
use crate::{Error, Result};

/// How a [`PageRequest`] moves through results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Skip `(page - 1) * size` entities
    Offset,

    /// Entities after the cursor, in sort order
    CursorNext,

    /// Entities before the cursor, in sort order
    CursorPrevious,
}

/// A request for one page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    page: u64,
    size: u64,
    mode: PageMode,
    cursor: Option<Cursor>,
}

/// Sort-key values of the entity a cursor page continues from, one per sort.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    values: Vec<Value>,
}

/// A page fetched with cursor pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct CursoredPage {
    pub entities: Vec<CommunicationEntity>,

    /// The request that produced this page
    pub request: PageRequest,

    /// Continues after the last entity, if more may follow
    pub next: Option<Cursor>,

    /// Continues before the first entity, if any precede it
    pub previous: Option<Cursor>,
}

impl PageRequest {
    /// An offset request for the 1-based `page`.
    pub fn of_page(page: u64, size: u64) -> Result<Self> {
        if page == 0 {
            return Err(Error::illegal_argument("page numbers start at 1"));
        }

        Ok(Self {
            page,
            size: Self::check_size(size)?,
            mode: PageMode::Offset,
            cursor: None,
        })
    }

    /// The first page of `size` entities.
    pub fn of_size(size: u64) -> Result<Self> {
        Self::of_page(1, size)
    }

    /// A cursor request for the entities after `cursor`.
    pub fn after_cursor(cursor: Cursor, page: u64, size: u64) -> Result<Self> {
        Ok(Self {
            page,
            size: Self::check_size(size)?,
            mode: PageMode::CursorNext,
            cursor: Some(cursor),
        })
    }

    /// A cursor request for the entities before `cursor`.
    pub fn before_cursor(cursor: Cursor, page: u64, size: u64) -> Result<Self> {
        Ok(Self {
            page,
            size: Self::check_size(size)?,
            mode: PageMode::CursorPrevious,
            cursor: Some(cursor),
        })
    }

    fn check_size(size: u64) -> Result<u64> {
        if size == 0 {
            return Err(Error::illegal_argument("page size must be at least 1"));
        }

        Ok(size)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn is_cursor(&self) -> bool {
        !matches!(self.mode, PageMode::Offset)
    }

    /// Number of entities an offset request skips.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// The following page. Cursor requests keep their mode and need a new
    /// cursor, see [`CursoredPage::next_request`].
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    /// Switches an offset request into cursor mode, starting from the first
    /// entity in sort order.
    pub fn into_cursor(mut self) -> Self {
        if !self.is_cursor() {
            self.mode = PageMode::CursorNext;
        }
        self
    }
}

impl Cursor {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Reads the sort-key values of `entity`. A missing key reads as null.
    pub fn from_entity(entity: &CommunicationEntity, sorts: &[Sort]) -> Self {
        Self {
            values: sorts
                .iter()
                .map(|sort| entity.find_path(&sort.name).cloned().unwrap_or_default())
                .collect(),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds the keyset condition selecting entities strictly after the
    /// cursor (`forward`) or strictly before it, under `sorts`.
    ///
    /// For keys `k1..kn` the condition is
    /// `(k1 > v1) OR (k1 = v1 AND k2 > v2) OR ..`, with the comparison
    /// flipped for descending keys and backward pages.
    pub fn condition(&self, sorts: &[Sort], forward: bool) -> Result<CriteriaCondition> {
        if self.values.len() != sorts.len() {
            return Err(Error::illegal_argument(format!(
                "cursor holds {} values but the query sorts by {} keys",
                self.values.len(),
                sorts.len()
            )));
        }

        let mut branches = vec![];

        for (i, sort) in sorts.iter().enumerate() {
            let mut operands: Vec<_> = sorts[..i]
                .iter()
                .zip(&self.values)
                .map(|(prev, value)| CriteriaCondition::eq(&prev.name, value.clone()))
                .collect();

            let value = self.values[i].clone();
            operands.push(if sort.is_asc() == forward {
                CriteriaCondition::gt(&sort.name, value)
            } else {
                CriteriaCondition::lt(&sort.name, value)
            });

            branches.extend(CriteriaCondition::and_from_vec(operands));
        }

        CriteriaCondition::or_from_vec(branches)
            .ok_or_else(|| Error::precondition_failed("cursor pagination requires a sort"))
    }
}

impl CursoredPage {
    /// A request for the page after this one, if there may be one.
    pub fn next_request(&self) -> Option<PageRequest> {
        let cursor = self.next.clone()?;
        let page = self.request.page.saturating_add(1);
        PageRequest::after_cursor(cursor, page, self.request.size).ok()
    }

    /// A request for the page before this one, if there is one.
    pub fn previous_request(&self) -> Option<PageRequest> {
        let cursor = self.previous.clone()?;
        let page = self.request.page.saturating_sub(1).max(1);
        PageRequest::before_cursor(cursor, page, self.request.size).ok()
    }
}
