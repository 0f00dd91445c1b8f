//! Repository methods turned into storage operations.
//!
//! A [`RepositoryMethod`] describes one call: the method name, an optional
//! declared query and the arguments. [`Repository::invoke`] derives exactly
//! one operation from it, runs it through the template and shapes the
//! result.

mod method;
pub use method::{Argument, RepositoryMethod, ResultKind};

pub mod method_name;
pub use method_name::MethodName;

mod plan;
use plan::{Plan, Projected, Shape, Write};

use crate::{CursorPage, Page, Template};

use semimap_core::{
    schema::{Attribute, EntitiesMetadata, EntityMetadata, Mapped, MappingKind, Model},
    stmt::{CommunicationEntity, Value},
    Error, Result,
};

use std::{marker::PhantomData, sync::Arc};

/// Dispatches repository methods for the entity `M`.
#[derive(Debug, Clone)]
pub struct Repository<M> {
    template: Template,
    _p: PhantomData<M>,
}

/// Dispatches query methods for an entity found from the method's declared
/// types.
#[derive(Debug, Clone)]
pub struct DynRepository {
    template: Template,
}

/// The shaped result of one repository method.
#[derive(Debug)]
pub enum Outcome<T> {
    List(Vec<T>),
    One(Option<T>),
    Page(Page<T>),
    CursorPage(CursorPage<T>),

    /// Projected rows: scalars for one field, lists for several
    Values(Vec<Value>),

    /// A projected single result
    Value(Option<Value>),

    Count(u64),
    Exists(bool),
    Unit,
}

impl<M: Mapped> Repository<M> {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            _p: PhantomData,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub async fn invoke(&self, method: RepositoryMethod) -> Result<Outcome<M>> {
        let metadata = self.template.metadata::<M>()?;

        match plan::plan(&self.template, &metadata, &method)? {
            Plan::Write(write) => self.write(&metadata, write, &method).await,
            plan => {
                let converter = self.template.converter();
                execute(&self.template, plan, |entity| converter.to_entity::<M>(entity)).await
            }
        }
    }

    async fn write(
        &self,
        metadata: &EntityMetadata,
        write: Write,
        method: &RepositoryMethod,
    ) -> Result<Outcome<M>> {
        let mut models = vec![];

        for (_, value) in method.values() {
            match value.clone() {
                Attribute::List(items) | Attribute::Array(items) => {
                    for item in items {
                        models.push(item.into_field::<M>()?);
                    }
                }
                value => models.push(value.into_field::<M>()?),
            }
        }

        let single = |models: Vec<M>| -> Result<M> {
            match <[M; 1]>::try_from(models) {
                Ok([model]) => Ok(model),
                Err(models) => Err(arity(method, models.len())),
            }
        };

        let template = &self.template;

        Ok(match write {
            Write::Save => Outcome::One(Some(template.save(single(models)?).await?)),
            Write::Insert => Outcome::One(Some(template.insert(single(models)?).await?)),
            Write::Update => Outcome::One(Some(template.update_entity(single(models)?).await?)),
            Write::InsertAll => Outcome::List(template.insert_all(models).await?),
            Write::UpdateAll => Outcome::List(template.update_all(models).await?),
            Write::SaveAll => {
                let mut saved = Vec::with_capacity(models.len());

                for model in models {
                    saved.push(template.save(model).await?);
                }

                Outcome::List(saved)
            }
            Write::Delete | Write::DeleteAll => {
                if write == Write::Delete && models.len() != 1 {
                    return Err(arity(method, models.len()));
                }

                let id = metadata.expect_id()?;

                for model in models {
                    let value = model.get(&id.name).unwrap_or_default();
                    template.delete_by_id::<M>(value).await?;
                }

                Outcome::Unit
            }
        })
    }
}

impl DynRepository {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Runs a query method, reading results as the entity named by the
    /// method's return type, or failing that its parameter types.
    pub async fn invoke(&self, method: RepositoryMethod) -> Result<Outcome<Box<dyn Model>>> {
        let metadata = resolve_entity(self.template.registry().as_ref(), &method)
            .ok_or_else(|| {
                Error::class_information_not_found(format!("entity of `{}`", method.name))
            })?;

        match plan::plan(&self.template, &metadata, &method)? {
            Plan::Write(_) => Err(Error::unsupported_operation(format!(
                "`{}` writes entities and needs a typed repository",
                method.name
            ))),
            plan => {
                let converter = self.template.converter();
                let key = metadata.key();
                execute(&self.template, plan, |entity| converter.to_model(entity, key)).await
            }
        }
    }
}

fn arity(method: &RepositoryMethod, count: usize) -> Error {
    Error::illegal_argument(format!(
        "`{}` takes exactly one entity, got {count}",
        method.name
    ))
}

/// The first registered entity among the method's return types, then its
/// parameter types. Embeddable types are passed over.
pub fn resolve_entity(
    registry: &dyn EntitiesMetadata,
    method: &RepositoryMethod,
) -> Option<Arc<EntityMetadata>> {
    method
        .return_types
        .iter()
        .chain(&method.parameter_types)
        .find_map(|key| {
            registry
                .get(*key)
                .ok()
                .filter(|metadata| !metadata.is_embeddable())
        })
}

async fn execute<T>(
    template: &Template,
    plan: Plan,
    read: impl Fn(&CommunicationEntity) -> Result<T>,
) -> Result<Outcome<T>> {
    let (query, shape, projection) = match plan {
        Plan::Select {
            query,
            shape,
            projection,
        } => (query, shape, projection),
        Plan::Count(query) => return Ok(Outcome::Count(template.count(query).await?)),
        Plan::Exists(query) => return Ok(Outcome::Exists(template.exists(query).await?)),
        Plan::Delete(query) => {
            template.delete_where(query).await?;
            return Ok(Outcome::Unit);
        }
        Plan::Update(query) => return Ok(Outcome::Count(template.update_where(query).await?)),
        Plan::Write(_) => return Err(Error::unsupported_operation("entity writes are not queries")),
    };

    let name = query.name.clone();

    Ok(match shape {
        Shape::Many => {
            let entities = template.select_entities(query).await?.collect().await?;

            if projection.is_empty() {
                Outcome::List(entities.iter().map(read).collect::<Result<_>>()?)
            } else {
                Outcome::Values(
                    entities
                        .iter()
                        .map(|entity| project(entity, &projection))
                        .collect::<Result<_>>()?,
                )
            }
        }
        Shape::Single => {
            let mut entities = template.select_entities(query).await?;
            let first = entities.next().await.transpose()?;

            if first.is_some() && entities.next().await.transpose()?.is_some() {
                return Err(Error::non_unique_result(name));
            }

            if projection.is_empty() {
                Outcome::One(first.as_ref().map(read).transpose()?)
            } else {
                Outcome::Value(first.map(|e| project(&e, &projection)).transpose()?)
            }
        }
        Shape::Page(request) => {
            let (entities, has_next) = template.offset_entities(query, &request).await?;
            let content = entities.iter().map(read).collect::<Result<_>>()?;
            Outcome::Page(Page::new(content, request, has_next))
        }
        Shape::Cursor(request) => {
            let page = template.cursor_entities(query, request).await?;
            let content = page.entities.iter().map(read).collect::<Result<_>>()?;
            Outcome::CursorPage(CursorPage::new(content, page.request, page.next, page.previous))
        }
    })
}

/// Extracts the projected fields from one entity.
fn project(entity: &CommunicationEntity, projection: &[Projected]) -> Result<Value> {
    let mut values = projection
        .iter()
        .map(|projected| projected_value(entity.find_path(&projected.column), projected))
        .collect::<Result<Vec<_>>>()?;

    Ok(match values.len() {
        1 => values.remove(0),
        _ => Value::List(values),
    })
}

fn projected_value(value: Option<&Value>, projected: &Projected) -> Result<Value> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return Ok(Value::Null);
    };

    let field = &projected.field;

    match (&field.converter, field.kind) {
        (Some(converter), _) => converter.to_attribute(value.clone())?.into_value(),
        (None, MappingKind::Default) => value.clone().coerce(&field.ty),
        _ => Ok(value.clone()),
    }
}

impl<T> Outcome<T> {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::List(_) => "List",
            Self::One(_) => "One",
            Self::Page(_) => "Page",
            Self::CursorPage(_) => "CursorPage",
            Self::Values(_) => "Values",
            Self::Value(_) => "Value",
            Self::Count(_) => "Count",
            Self::Exists(_) => "Exists",
            Self::Unit => "Unit",
        }
    }

    pub fn into_list(self) -> Result<Vec<T>> {
        match self {
            Self::List(list) => Ok(list),
            other => Err(other.mismatch("List")),
        }
    }

    pub fn into_one(self) -> Result<Option<T>> {
        match self {
            Self::One(one) => Ok(one),
            other => Err(other.mismatch("One")),
        }
    }

    pub fn into_page(self) -> Result<Page<T>> {
        match self {
            Self::Page(page) => Ok(page),
            other => Err(other.mismatch("Page")),
        }
    }

    pub fn into_cursor_page(self) -> Result<CursorPage<T>> {
        match self {
            Self::CursorPage(page) => Ok(page),
            other => Err(other.mismatch("CursorPage")),
        }
    }

    pub fn into_values(self) -> Result<Vec<Value>> {
        match self {
            Self::Values(values) => Ok(values),
            other => Err(other.mismatch("Values")),
        }
    }

    pub fn into_value(self) -> Result<Option<Value>> {
        match self {
            Self::Value(value) => Ok(value),
            other => Err(other.mismatch("Value")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            other => Err(other.mismatch("Count")),
        }
    }

    pub fn into_exists(self) -> Result<bool> {
        match self {
            Self::Exists(exists) => Ok(exists),
            other => Err(other.mismatch("Exists")),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(self.variant_name(), expected)
    }
}
