use super::{Resolver, Where};
use crate::Template;

use semimap_core::{schema::Mapped, stmt::DeleteQuery, Result};

use std::marker::PhantomData;

/// Builds and runs a delete for `M`.
#[derive(Debug)]
pub struct MapperDelete<'a, M> {
    template: &'a Template,
    filter: Where,
    _p: PhantomData<M>,
}

where_methods!(MapperDelete);

impl<'a, M: Mapped> MapperDelete<'a, M> {
    pub(crate) fn new(template: &'a Template) -> Self {
        Self {
            template,
            filter: Where::default(),
            _p: PhantomData,
        }
    }

    pub fn to_query(self) -> Result<DeleteQuery> {
        let metadata = self.template.metadata::<M>()?;
        let resolver = Resolver::new(self.template.registry().as_ref(), &metadata);

        let mut query = DeleteQuery::new(metadata.name());
        query.condition = self.filter.build(&resolver)?;
        Ok(query)
    }

    pub async fn execute(self) -> Result<()> {
        let template = self.template;
        template.delete_where(self.to_query()?).await
    }
}
