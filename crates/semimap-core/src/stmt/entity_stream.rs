use super::CommunicationEntity;

use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// Entities returned by a driver, either buffered or pulled lazily from an
/// underlying stream.
#[derive(Default)]
pub struct EntityStream {
    buffer: VecDeque<CommunicationEntity>,
    stream: Option<DynStream>,
}

type DynStream = Pin<Box<dyn Stream<Item = crate::Result<CommunicationEntity>> + Send + 'static>>;

impl EntityStream {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_vec(entities: Vec<CommunicationEntity>) -> Self {
        Self {
            buffer: entities.into(),
            stream: None,
        }
    }

    pub fn from_stream<T>(stream: T) -> Self
    where
        T: Stream<Item = crate::Result<CommunicationEntity>> + Send + 'static,
    {
        Self {
            buffer: VecDeque::new(),
            stream: Some(Box::pin(stream)),
        }
    }

    /// Returns the next entity in the stream
    pub async fn next(&mut self) -> Option<crate::Result<CommunicationEntity>> {
        StreamExt::next(self).await
    }

    /// Peek at the next entity in the stream
    pub async fn peek(&mut self) -> Option<crate::Result<&CommunicationEntity>> {
        if self.buffer.is_empty() {
            match self.next().await {
                Some(Ok(entity)) => self.buffer.push_back(entity),
                Some(Err(e)) => return Some(Err(e)),
                None => return None,
            }
        }

        self.buffer.front().map(Ok)
    }

    /// The stream will contain at least this number of entities
    pub fn min_len(&self) -> usize {
        let (ret, _) = self.size_hint();
        ret
    }

    pub async fn collect(mut self) -> crate::Result<Vec<CommunicationEntity>> {
        let mut ret = Vec::with_capacity(self.min_len());

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }
}

impl Stream for EntityStream {
    type Item = crate::Result<CommunicationEntity>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(next) = self.buffer.pop_front() {
            Poll::Ready(Some(Ok(next)))
        } else if let Some(stream) = self.stream.as_mut() {
            Pin::new(stream).poll_next(cx)
        } else {
            Poll::Ready(None)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (mut low, mut high) = match &self.stream {
            Some(stream) => stream.size_hint(),
            None => (0, Some(0)),
        };

        let buffered = self.buffer.len();

        low += buffered;

        if let Some(high) = high.as_mut() {
            *high += buffered;
        }

        (low, high)
    }
}

impl From<Vec<CommunicationEntity>> for EntityStream {
    fn from(value: Vec<CommunicationEntity>) -> Self {
        Self::from_vec(value)
    }
}

impl fmt::Debug for EntityStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStream")
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
