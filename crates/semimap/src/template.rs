//! The facade application code talks to.

mod builder;
pub use builder::Builder;

use crate::{
    mapper::{MapperDelete, MapperSelect, MapperUpdate, Resolver},
    page, Config, CursorPage, EntityConverter, EventHooks, ModelStream, Page, TextQuery,
};

use semimap_core::{
    driver::Driver,
    schema::{EntitiesMetadata, EntityMetadata, IntoAttribute, Mapped, TypeKey},
    stmt::{
        CommunicationEntity, CursoredPage, DeleteQuery, Element, EntityStream, PageRequest,
        QueryParser, SelectQuery, UpdateQuery,
    },
    Error, Result,
};

use std::{sync::Arc, time::Duration};
use tracing::debug;

/// Runs mapped objects and queries against one driver.
///
/// Cheap to clone; clones share their collaborators.
#[derive(Debug, Clone)]
pub struct Template {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    driver: Arc<dyn Driver>,
    converter: EntityConverter,
    config: Config,
    events: Arc<dyn EventHooks>,
    parser: Option<Arc<dyn QueryParser>>,
}

impl Template {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.shared.driver
    }

    pub fn registry(&self) -> &Arc<dyn EntitiesMetadata> {
        self.shared.converter.registry()
    }

    pub fn converter(&self) -> &EntityConverter {
        &self.shared.converter
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    pub(crate) fn parser(&self) -> Option<&Arc<dyn QueryParser>> {
        self.shared.parser.as_ref()
    }

    pub fn metadata<M: Mapped>(&self) -> Result<Arc<EntityMetadata>> {
        self.registry().get(TypeKey::of::<M>())
    }

    pub fn select<M: Mapped>(&self) -> MapperSelect<'_, M> {
        MapperSelect::new(self)
    }

    pub fn delete<M: Mapped>(&self) -> MapperDelete<'_, M> {
        MapperDelete::new(self)
    }

    pub fn update<M: Mapped>(&self) -> MapperUpdate<'_, M> {
        MapperUpdate::new(self)
    }

    /// Prepares a text query through the configured parser.
    pub fn query(&self, text: &str) -> Result<TextQuery<'_>> {
        TextQuery::new(self, text)
    }

    pub async fn insert<M: Mapped>(&self, model: M) -> Result<M> {
        let entity = self.to_communication(&model)?;
        debug!(entity = %entity.name(), "insert");
        let entity = self.shared.driver.insert(entity, None).await?;
        self.from_persisted(entity)
    }

    /// Inserts an object that expires after `ttl`. Fails when the driver
    /// does not support expiry.
    pub async fn insert_with_ttl<M: Mapped>(&self, model: M, ttl: Duration) -> Result<M> {
        let capability = self.shared.driver.capability();

        if !capability.ttl {
            return Err(Error::unsupported_operation(format!(
                "`{}` does not support time to live",
                capability.database
            )));
        }

        let entity = self.to_communication(&model)?;
        debug!(entity = %entity.name(), ttl = ?ttl, "insert");
        let entity = self.shared.driver.insert(entity, Some(ttl)).await?;
        self.from_persisted(entity)
    }

    pub async fn insert_all<M: Mapped>(&self, models: impl IntoIterator<Item = M>) -> Result<Vec<M>> {
        let entities = models
            .into_iter()
            .map(|model| self.to_communication(&model))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = entities.len(), "insert all");
        let entities = self.shared.driver.insert_all(entities, None).await?;
        entities.into_iter().map(|e| self.from_persisted(e)).collect()
    }

    pub async fn update_entity<M: Mapped>(&self, model: M) -> Result<M> {
        let entity = self.to_communication(&model)?;
        debug!(entity = %entity.name(), "update");
        let entity = self.shared.driver.update(entity).await?;
        self.from_persisted(entity)
    }

    pub async fn update_all<M: Mapped>(&self, models: impl IntoIterator<Item = M>) -> Result<Vec<M>> {
        let entities = models
            .into_iter()
            .map(|model| self.to_communication(&model))
            .collect::<Result<Vec<_>>>()?;

        debug!(count = entities.len(), "update all");
        let entities = self.shared.driver.update_all(entities).await?;
        entities.into_iter().map(|e| self.from_persisted(e)).collect()
    }

    /// Inserts the object, or updates it when an entity with its id is
    /// already stored. An object without an id value is always inserted.
    pub async fn save<M: Mapped>(&self, model: M) -> Result<M> {
        let metadata = self.metadata::<M>()?;
        let id = metadata.expect_id()?;
        let value = model.get(&id.name).unwrap_or_default();

        if value.is_null() {
            return self.insert(model).await;
        }

        let exists = self.exists_by_id::<M>(value).await?;
        debug!(entity = %metadata.name(), exists, "save");

        if exists {
            self.update_entity(model).await
        } else {
            self.insert(model).await
        }
    }

    pub async fn find_by_id<M: Mapped>(&self, id: impl IntoAttribute) -> Result<Option<M>> {
        self.by_id::<M>(id)?.single_result().await
    }

    pub async fn exists_by_id<M: Mapped>(&self, id: impl IntoAttribute) -> Result<bool> {
        self.by_id::<M>(id)?.exists().await
    }

    pub async fn delete_by_id<M: Mapped>(&self, id: impl IntoAttribute) -> Result<()> {
        let metadata = self.metadata::<M>()?;
        let id_field = metadata.expect_id()?;

        self.delete::<M>()
            .filter(id_field.name.as_str())
            .eq(id)
            .execute()
            .await
    }

    fn by_id<M: Mapped>(&self, id: impl IntoAttribute) -> Result<MapperSelect<'_, M>> {
        let metadata = self.metadata::<M>()?;
        let id_field = metadata.expect_id()?;
        Ok(self.select::<M>().filter(id_field.name.as_str()).eq(id))
    }

    pub async fn find_all<M: Mapped>(&self) -> Result<Vec<M>> {
        self.select::<M>().result().await
    }

    pub async fn delete_all<M: Mapped>(&self) -> Result<()> {
        self.delete::<M>().execute().await
    }

    pub async fn count_all<M: Mapped>(&self) -> Result<u64> {
        let metadata = self.metadata::<M>()?;

        if metadata.subtype_inheritance().is_some() {
            return self.select::<M>().count().await;
        }

        debug!(entity = %metadata.name(), "count all");
        self.shared.driver.count_all(metadata.name()).await
    }

    /// Runs a select and reads the matches lazily.
    pub async fn stream<M: Mapped>(&self, query: SelectQuery) -> Result<ModelStream<M>> {
        let entities = self.select_entities(query).await?;
        Ok(ModelStream::new(self.shared.converter.clone(), entities))
    }

    pub async fn all<M: Mapped>(&self, query: SelectQuery) -> Result<Vec<M>> {
        self.stream(query).await?.collect().await
    }

    /// Runs a select that must match at most one entity.
    pub async fn single<M: Mapped>(&self, query: SelectQuery) -> Result<Option<M>> {
        let name = query.name.clone();
        self.stream(query).await?.single(&name).await
    }

    pub async fn count(&self, mut query: SelectQuery) -> Result<u64> {
        self.verify_select(&query)?;
        query.count = true;
        debug!(entity = %query.name, "count");
        self.shared.driver.count(query).await
    }

    pub async fn exists(&self, query: SelectQuery) -> Result<bool> {
        self.verify_select(&query)?;
        debug!(entity = %query.name, "exists");
        self.shared.driver.exists(query).await
    }

    pub async fn delete_where(&self, query: DeleteQuery) -> Result<()> {
        if let Some(condition) = &query.condition {
            self.shared.driver.capability().verify_condition(condition)?;
        }

        debug!(entity = %query.name, "delete");
        self.shared.driver.delete(query).await
    }

    /// Returns the number of updated entities.
    pub async fn update_where(&self, query: UpdateQuery) -> Result<u64> {
        if let Some(condition) = &query.condition {
            self.shared.driver.capability().verify_condition(condition)?;
        }

        debug!(entity = %query.name, assignments = query.set.len(), "update where");
        self.shared.driver.update_where(query).await
    }

    pub async fn select_offset<M: Mapped>(
        &self,
        query: SelectQuery,
        request: PageRequest,
    ) -> Result<Page<M>> {
        let (entities, has_next) = self.offset_entities(query, &request).await?;
        let content = self.read_all::<M>(&entities)?;
        Ok(Page::new(content, request, has_next))
    }

    /// Fetches one page by keyset pagination. An offset request starts at
    /// the first entity in sort order.
    pub async fn select_cursor<M: Mapped>(
        &self,
        query: SelectQuery,
        request: PageRequest,
    ) -> Result<CursorPage<M>> {
        let page = self.cursor_entities(query, request).await?;
        let content = self.read_all::<M>(&page.entities)?;
        Ok(CursorPage::new(content, page.request, page.next, page.previous))
    }

    fn read_all<M: Mapped>(&self, entities: &[CommunicationEntity]) -> Result<Vec<M>> {
        entities
            .iter()
            .map(|entity| self.shared.converter.to_entity::<M>(entity))
            .collect()
    }

    /// Returns the page's entities and whether another page follows.
    pub(crate) async fn offset_entities(
        &self,
        query: SelectQuery,
        request: &PageRequest,
    ) -> Result<(Vec<CommunicationEntity>, bool)> {
        let query = page::offset(query, request)?;
        let mut entities = self.select_entities(query).await?.collect().await?;

        let has_next = entities.len() as u64 > request.size();
        entities.truncate(request.size() as usize);

        Ok((entities, has_next))
    }

    pub(crate) async fn cursor_entities(
        &self,
        query: SelectQuery,
        request: PageRequest,
    ) -> Result<CursoredPage> {
        let query = page::cursor(query, &self.shared.config)?;
        self.verify_select(&query)?;

        debug!(entity = %query.name, size = request.size(), mode = ?request.mode(), "select cursor");
        self.shared
            .driver
            .select_cursor(query, request.into_cursor())
            .await
    }

    pub(crate) async fn select_entities(
        &self,
        query: SelectQuery,
    ) -> Result<EntityStream> {
        self.verify_select(&query)?;
        debug!(entity = %query.name, skip = query.skip, limit = query.limit, "select");
        self.shared.driver.select(query).await
    }

    fn verify_select(&self, query: &SelectQuery) -> Result<()> {
        let capability = self.shared.driver.capability();

        if let Some(condition) = &query.condition {
            capability.verify_condition(condition)?;
        }

        capability.verify_sorts(&query.sorts)
    }

    pub(crate) fn resolver<'a>(&'a self, metadata: &'a EntityMetadata) -> Resolver<'a> {
        Resolver::new(self.registry().as_ref(), metadata)
    }

    /// Converts an object for a write. Every entity of an inheritance
    /// hierarchy is stamped with its discriminator.
    fn to_communication<M: Mapped>(&self, model: &M) -> Result<CommunicationEntity> {
        self.shared.events.pre_persist(model);

        let metadata = self.metadata::<M>()?;
        let mut entity = self.shared.converter.to_communication(model)?;

        if let Some(inheritance) = metadata.inheritance() {
            entity.set(Element::new(
                &inheritance.discriminator_column,
                inheritance.discriminator_value.as_str(),
            ));
        }

        self.shared.events.pre_entity(&entity);
        Ok(entity)
    }

    fn from_persisted<M: Mapped>(&self, entity: CommunicationEntity) -> Result<M> {
        self.shared.events.post_entity(&entity);
        let model = self.shared.converter.to_entity::<M>(&entity)?;
        self.shared.events.post_persist(&model);
        Ok(model)
    }
}
