use super::{Field, Resolver, Where};
use crate::{CursorPage, ModelStream, Page, Template};

use semimap_core::{
    schema::Mapped,
    stmt::{Direction, PageRequest, SelectQuery},
    Result,
};

use std::marker::PhantomData;

/// Builds and runs a select for `M`.
///
/// ```ignore
/// let people = template
///     .select::<Person>()
///     .filter("age").between(10, 20)
///     .or("name").eq("Ada")
///     .order_by("name").asc()
///     .result()
///     .await?;
/// ```
#[derive(Debug)]
pub struct MapperSelect<'a, M> {
    template: &'a Template,
    filter: Where,
    sorts: Vec<(Field, Direction)>,
    skip: u64,
    limit: u64,
    _p: PhantomData<M>,
}

/// Pending sort returned by [`MapperSelect::order_by`].
#[derive(Debug)]
pub struct OrderBy<'a, M> {
    select: MapperSelect<'a, M>,
    field: Field,
}

where_methods!(MapperSelect);

impl<'a, M: Mapped> MapperSelect<'a, M> {
    pub(crate) fn new(template: &'a Template) -> Self {
        Self {
            template,
            filter: Where::default(),
            sorts: vec![],
            skip: 0,
            limit: 0,
            _p: PhantomData,
        }
    }

    pub fn order_by(self, field: impl Into<Field>) -> OrderBy<'a, M> {
        OrderBy {
            select: self,
            field: field.into(),
        }
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Caps the number of results. `0` means unbounded.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Builds the query without running it.
    pub fn to_query(self) -> Result<SelectQuery> {
        let metadata = self.template.metadata::<M>()?;
        let resolver = Resolver::new(self.template.registry().as_ref(), &metadata);

        let mut query = SelectQuery::new(metadata.name());
        query.condition = self.filter.build(&resolver)?;
        query.sorts = self
            .sorts
            .iter()
            .map(|(field, direction)| resolver.sort(field, *direction))
            .collect::<Result<_>>()?;
        query.skip = self.skip;
        query.limit = self.limit;

        Ok(query)
    }

    pub async fn result(self) -> Result<Vec<M>> {
        let template = self.template;
        template.all(self.to_query()?).await
    }

    pub async fn stream(self) -> Result<ModelStream<M>> {
        let template = self.template;
        template.stream(self.to_query()?).await
    }

    /// Returns the only match, `None` when nothing matches and a non-unique
    /// result error when more than one does.
    pub async fn single_result(self) -> Result<Option<M>> {
        let template = self.template;
        template.single(self.to_query()?).await
    }

    pub async fn count(self) -> Result<u64> {
        let template = self.template;
        template.count(self.to_query()?).await
    }

    pub async fn exists(self) -> Result<bool> {
        let template = self.template;
        template.exists(self.to_query()?).await
    }

    /// Fetches one page by offset. Any `skip` or `limit` set on the builder
    /// is replaced by the page's.
    pub async fn page(self, request: PageRequest) -> Result<Page<M>> {
        let template = self.template;
        template.select_offset(self.to_query()?, request).await
    }

    /// Fetches one page by cursor over the builder's sorts.
    pub async fn cursor(self, request: PageRequest) -> Result<CursorPage<M>> {
        let template = self.template;
        template.select_cursor(self.to_query()?, request).await
    }
}

impl<'a, M: Mapped> OrderBy<'a, M> {
    pub fn asc(self) -> MapperSelect<'a, M> {
        self.direction(Direction::Asc)
    }

    pub fn desc(self) -> MapperSelect<'a, M> {
        self.direction(Direction::Desc)
    }

    fn direction(self, direction: Direction) -> MapperSelect<'a, M> {
        let mut select = self.select;
        select.sorts.push((self.field, direction));
        select
    }
}
