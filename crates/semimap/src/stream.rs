use crate::EntityConverter;

use semimap_core::{schema::Mapped, stmt::EntityStream, Result};

use std::marker::PhantomData;
use tokio_stream::Stream;

/// Typed objects read from a driver's entity stream, converted one at a
/// time.
#[derive(Debug)]
pub struct ModelStream<M> {
    converter: EntityConverter,
    entities: EntityStream,
    _p: PhantomData<M>,
}

impl<M: Mapped> ModelStream<M> {
    pub(crate) fn new(converter: EntityConverter, entities: EntityStream) -> Self {
        Self {
            converter,
            entities,
            _p: PhantomData,
        }
    }

    pub async fn next(&mut self) -> Option<Result<M>> {
        Some(match self.entities.next().await? {
            Ok(entity) => self.converter.to_entity::<M>(&entity),
            Err(e) => Err(e),
        })
    }

    pub async fn collect(mut self) -> Result<Vec<M>> {
        let mut ret = Vec::with_capacity(self.entities.min_len());

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }

    /// Returns the only object, `None` when there is none.
    pub(crate) async fn single(mut self, entity: &str) -> Result<Option<M>> {
        let Some(first) = self.next().await.transpose()? else {
            return Ok(None);
        };

        match self.entities.next().await {
            None => Ok(Some(first)),
            Some(Err(e)) => Err(e),
            Some(Ok(_)) => Err(semimap_core::Error::non_unique_result(entity)),
        }
    }

    pub fn into_stream(mut self) -> impl Stream<Item = Result<M>> + Send + 'static {
        async_stream::stream! {
            while let Some(res) = self.next().await {
                yield res;
            }
        }
    }
}
