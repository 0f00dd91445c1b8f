mod capability;
pub use capability::Capability;

use crate::{
    async_trait,
    stmt::{
        CommunicationEntity, Cursor, CursoredPage, DeleteQuery, EntityStream, PageMode,
        PageRequest, SelectQuery, UpdateQuery,
    },
    Error, Result,
};

use std::{fmt::Debug, time::Duration};

/// A storage back-end executing storage-agnostic queries.
///
/// Only the single-entity writes, `delete`, `update_where` and `select` are
/// required. The remaining operations have defaults built on those.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Describes what the store can evaluate.
    fn capability(&self) -> &Capability;

    /// Stores a new entity and returns it as persisted. With a `ttl` the
    /// entity expires after the given duration.
    async fn insert(
        &self,
        entity: CommunicationEntity,
        ttl: Option<Duration>,
    ) -> Result<CommunicationEntity>;

    async fn insert_all(
        &self,
        entities: Vec<CommunicationEntity>,
        ttl: Option<Duration>,
    ) -> Result<Vec<CommunicationEntity>> {
        let mut ret = Vec::with_capacity(entities.len());

        for entity in entities {
            ret.push(self.insert(entity, ttl).await?);
        }

        Ok(ret)
    }

    /// Replaces a stored entity, matched by its `_id` element.
    async fn update(&self, entity: CommunicationEntity) -> Result<CommunicationEntity>;

    async fn update_all(
        &self,
        entities: Vec<CommunicationEntity>,
    ) -> Result<Vec<CommunicationEntity>> {
        let mut ret = Vec::with_capacity(entities.len());

        for entity in entities {
            ret.push(self.update(entity).await?);
        }

        Ok(ret)
    }

    /// Applies the assignments to every matching entity. Returns the number
    /// of entities changed.
    async fn update_where(&self, query: UpdateQuery) -> Result<u64>;

    async fn delete(&self, query: DeleteQuery) -> Result<()>;

    async fn select(&self, query: SelectQuery) -> Result<EntityStream>;

    /// Counts the entities matching the query.
    async fn count(&self, mut query: SelectQuery) -> Result<u64> {
        query.count = false;
        query.sorts.clear();
        let entities = self.select(query).await?.collect().await?;
        Ok(entities.len() as u64)
    }

    async fn count_all(&self, name: &str) -> Result<u64> {
        self.count(SelectQuery::new(name)).await
    }

    async fn exists(&self, mut query: SelectQuery) -> Result<bool> {
        query.limit = 1;
        let mut stream = self.select(query).await?;

        match stream.next().await {
            Some(res) => res.map(|_| true),
            None => Ok(false),
        }
    }

    /// Fetches one page by keyset pagination over the query's sorts.
    ///
    /// The query must be sorted. Any skip is ignored. The page holds at most
    /// `request.size()` entities, in sort order for both directions.
    async fn select_cursor(
        &self,
        mut query: SelectQuery,
        request: PageRequest,
    ) -> Result<CursoredPage> {
        if query.sorts.is_empty() {
            return Err(Error::precondition_failed(
                "cursor pagination requires at least one sort",
            ));
        }

        let sorts = query.sorts.clone();
        let forward = request.mode() != PageMode::CursorPrevious;

        if let Some(cursor) = request.cursor() {
            query.and(cursor.condition(&sorts, forward)?);
        }

        if !forward {
            query.sorts = sorts.iter().map(|sort| sort.reverse()).collect();
        }

        query.skip = 0;
        query.limit = request.size();

        let mut entities = self.select(query).await?.collect().await?;

        if !forward {
            entities.reverse();
        }

        let full = entities.len() as u64 >= request.size();
        let first = entities.first().map(|e| Cursor::from_entity(e, &sorts));
        let last = entities.last().map(|e| Cursor::from_entity(e, &sorts));

        let (next, previous) = match (request.cursor(), forward) {
            (None, _) => (last.filter(|_| full), None),
            (Some(_), true) => (last.filter(|_| full), first),
            (Some(_), false) => (last, first.filter(|_| full)),
        };

        Ok(CursoredPage {
            entities,
            request,
            next,
            previous,
        })
    }
}
