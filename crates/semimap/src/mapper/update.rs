use super::{Resolver, Where};
use crate::Template;

use semimap_core::{
    schema::{Attribute, IntoAttribute, Mapped},
    stmt::UpdateQuery,
    Result,
};

use std::marker::PhantomData;

/// Builds and runs an update for `M`.
///
/// ```ignore
/// template
///     .update::<Person>()
///     .set("name").to("Ada")
///     .filter("age").eq(30)
///     .execute()
///     .await?;
/// ```
#[derive(Debug)]
pub struct MapperUpdate<'a, M> {
    template: &'a Template,
    assignments: Vec<(String, Attribute)>,
    filter: Where,
    _p: PhantomData<M>,
}

/// Pending assignment returned by [`MapperUpdate::set`].
#[derive(Debug)]
pub struct UpdateSet<'a, M> {
    update: MapperUpdate<'a, M>,
    field: String,
}

where_methods!(MapperUpdate);

impl<'a, M: Mapped> MapperUpdate<'a, M> {
    pub(crate) fn new(template: &'a Template) -> Self {
        Self {
            template,
            assignments: vec![],
            filter: Where::default(),
            _p: PhantomData,
        }
    }

    pub fn set(self, field: impl Into<String>) -> UpdateSet<'a, M> {
        UpdateSet {
            update: self,
            field: field.into(),
        }
    }

    pub fn to_query(self) -> Result<UpdateQuery> {
        let metadata = self.template.metadata::<M>()?;
        let resolver = Resolver::new(self.template.registry().as_ref(), &metadata);

        let mut query = UpdateQuery::new(metadata.name());

        for (field, value) in self.assignments {
            query.set.push(resolver.assignment(&field, value)?);
        }

        query.condition = self.filter.build(&resolver)?;
        Ok(query)
    }

    /// Returns the number of updated entities.
    pub async fn execute(self) -> Result<u64> {
        let template = self.template;
        template.update_where(self.to_query()?).await
    }
}

impl<'a, M: Mapped> UpdateSet<'a, M> {
    pub fn to(self, value: impl IntoAttribute) -> MapperUpdate<'a, M> {
        let mut update = self.update;
        update.assignments.push((self.field, value.into_attribute()));
        update
    }
}
