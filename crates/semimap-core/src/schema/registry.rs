use super::{EntityMetadata, FieldMetadata, MappingKind, Mapped, TypeKey};
use crate::{Error, Result};

use dashmap::DashMap;
use indexmap::IndexMap;
use std::{fmt::Debug, sync::Arc};

/// Read access to the metadata of every mapped type.
pub trait EntitiesMetadata: Debug + Send + Sync + 'static {
    /// Metadata of the given type, failing with `class_information_not_found`.
    fn get(&self, key: TypeKey) -> Result<Arc<EntityMetadata>>;

    /// Looks a type up by storage name, simple name or class name.
    fn find_by_name(&self, name: &str) -> Option<Arc<EntityMetadata>>;

    fn find_by_simple_name(&self, name: &str) -> Option<Arc<EntityMetadata>>;

    fn find_by_class_name(&self, name: &str) -> Option<Arc<EntityMetadata>>;

    /// Every type in the hierarchy rooted at `parent`, keyed by
    /// discriminator value.
    fn find_by_parent_group_by_discriminator_value(
        &self,
        parent: TypeKey,
    ) -> Arc<IndexMap<String, Arc<EntityMetadata>>>;

    /// Resolves a dotted field path to its dotted column path.
    ///
    /// Embedded fields contribute no segment since their columns are stored
    /// flat in the parent. Nested entity fields keep their column as a
    /// segment.
    fn column_path(&self, entity: &EntityMetadata, path: &str) -> Result<String> {
        walk_path(self, entity, path).map(|(columns, _)| columns)
    }

    /// Resolves a dotted field path to the metadata of its last field.
    fn field_path(&self, entity: &EntityMetadata, path: &str) -> Result<FieldMetadata> {
        walk_path(self, entity, path).map(|(_, field)| field)
    }
}

fn walk_path<R>(registry: &R, entity: &EntityMetadata, path: &str) -> Result<(String, FieldMetadata)>
where
    R: EntitiesMetadata + ?Sized,
{
    let mut columns = vec![];
    let mut current: Option<Arc<EntityMetadata>> = None;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let owner = current.as_deref().unwrap_or(entity);
        let field = owner.expect_field(segment)?;

        if segments.peek().is_none() {
            columns.push(field.column.clone());
            return Ok((columns.join("."), field.clone()));
        }

        let target = match field.kind {
            MappingKind::Embedded => field.target,
            MappingKind::Entity | MappingKind::EmbeddedGroup => {
                columns.push(field.column.clone());
                field.target
            }
            MappingKind::Collection | MappingKind::Array | MappingKind::Map => {
                columns.push(field.column.clone());
                field.embeddable_element()
            }
            MappingKind::Default => None,
        };

        let Some(target) = target else {
            let rest = segments.collect::<Vec<_>>().join(".");
            return Err(Error::field_not_found(owner.simple_name(), rest));
        };

        current = Some(registry.get(target)?);
    }

    Err(Error::field_not_found(entity.simple_name(), path))
}

/// A statically built [`EntitiesMetadata`].
///
/// Metadata is immutable once built. Name lookups are memoized in concurrent
/// maps so that first access from several threads settles on one entry.
#[derive(Debug, Default)]
pub struct Registry {
    entities: IndexMap<TypeKey, Arc<EntityMetadata>>,
    by_name: DashMap<String, Option<TypeKey>>,
    groups: DashMap<TypeKey, Arc<IndexMap<String, Arc<EntityMetadata>>>>,
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entities: IndexMap<TypeKey, Arc<EntityMetadata>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Arc<EntityMetadata>> {
        self.entities.values()
    }

    fn find_by(&self, cache_key: String, pred: impl Fn(&EntityMetadata) -> bool) -> Option<Arc<EntityMetadata>> {
        let key = *self
            .by_name
            .entry(cache_key)
            .or_insert_with(|| self.entities.values().find(|e| pred(e)).map(|e| e.key()));

        key.and_then(|key| self.entities.get(&key).cloned())
    }
}

impl EntitiesMetadata for Registry {
    fn get(&self, key: TypeKey) -> Result<Arc<EntityMetadata>> {
        self.entities
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::class_information_not_found(key.class_name()))
    }

    fn find_by_name(&self, name: &str) -> Option<Arc<EntityMetadata>> {
        self.find_by(format!("name:{name}"), |e| e.name() == name)
            .or_else(|| self.find_by_simple_name(name))
            .or_else(|| self.find_by_class_name(name))
    }

    fn find_by_simple_name(&self, name: &str) -> Option<Arc<EntityMetadata>> {
        self.find_by(format!("simple:{name}"), |e| e.simple_name() == name)
    }

    fn find_by_class_name(&self, name: &str) -> Option<Arc<EntityMetadata>> {
        self.find_by(format!("class:{name}"), |e| e.class_name() == name)
    }

    fn find_by_parent_group_by_discriminator_value(
        &self,
        parent: TypeKey,
    ) -> Arc<IndexMap<String, Arc<EntityMetadata>>> {
        self.groups
            .entry(parent)
            .or_insert_with(|| {
                Arc::new(
                    self.entities
                        .values()
                        .filter_map(|e| {
                            let inheritance = e.inheritance()?;
                            (inheritance.parent == parent)
                                .then(|| (inheritance.discriminator_value.clone(), e.clone()))
                        })
                        .collect(),
                )
            })
            .clone()
    }
}

impl RegistryBuilder {
    /// Registers a type using its own description.
    pub fn register<T: Mapped>(self) -> Self {
        self.entity(T::metadata())
    }

    pub fn entity(mut self, metadata: EntityMetadata) -> Self {
        self.entities.insert(metadata.key(), Arc::new(metadata));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entities: self.entities,
            ..Registry::default()
        }
    }
}
