//! Lazy cursor paginator
//!
//! Wraps a page-fetching function and hands out items one at a time,
//! requesting the next page only once the current one is drained.

use super::types::Page;
use crate::error::ClassifiedError;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;

/// Future returned by a boxed page fetcher
pub type PageFuture<T> = BoxFuture<'static, Result<Page<T>, ClassifiedError>>;

/// Type-erased page fetcher, as produced by the HTTP layer
pub type PageFetcher<T> = Box<dyn FnMut(Option<String>) -> PageFuture<T> + Send>;

/// Paginator over a type-erased fetcher
pub type BoxPaginator<T> = Paginator<T, PageFetcher<T>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    /// Nothing fetched yet
    Start,
    /// Next fetch uses this cursor
    Cursor(String),
    /// Last page seen, or a fetch failed
    Finished,
}

/// Single-pass, forward-only sequence over a cursor-paginated listing
///
/// The first pull calls `fetch(None)`. Later fetches pass the previous
/// page's `next_cursor`. A fetch error is handed to the consumer once and
/// ends the sequence. To walk the listing again, build a new paginator.
pub struct Paginator<T, F> {
    fetch: F,
    buffer: VecDeque<T>,
    position: Position,
    pages_fetched: usize,
}

impl<T, F> Paginator<T, F> {
    /// Number of fetch calls issued so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Check if the sequence has nothing more to give
    pub fn is_finished(&self) -> bool {
        self.buffer.is_empty() && self.position == Position::Finished
    }
}

impl<T, F, Fut> Paginator<T, F>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ClassifiedError>>,
{
    /// Create a paginator; nothing is fetched until the first pull
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            buffer: VecDeque::new(),
            position: Position::Start,
            pages_fetched: 0,
        }
    }

    /// Pull the next item
    ///
    /// Returns `None` once the listing is exhausted or after an error has
    /// been returned.
    pub async fn next_item(&mut self) -> Option<Result<T, ClassifiedError>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }

            // Position only moves once the fetch resolves, so a pull that is
            // dropped mid-fetch retries the same cursor next time
            let cursor = match &self.position {
                Position::Start => None,
                Position::Cursor(cursor) => Some(cursor.clone()),
                Position::Finished => return None,
            };

            self.pages_fetched += 1;
            match (self.fetch)(cursor).await {
                Ok(page) => {
                    self.position = match page.continuation() {
                        Some(next) => Position::Cursor(next.to_string()),
                        None => Position::Finished,
                    };
                    // Empty pages with a cursor fall through to another fetch
                    self.buffer.extend(page.items);
                }
                Err(e) => {
                    self.position = Position::Finished;
                    return Some(Err(e));
                }
            }
        }
    }

    /// Drain every remaining item, stopping at the first error
    pub async fn collect_all(mut self) -> Result<Vec<T>, ClassifiedError> {
        let mut items = Vec::new();
        while let Some(item) = self.next_item().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Turn the paginator into a [`Stream`]
    ///
    /// Stream adapters like `take(n)` stop polling once satisfied, so no
    /// page past the n-th item is requested. The stream is boxed and can be
    /// polled with `StreamExt::next` without pinning it first.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ClassifiedError>> + Unpin {
        Box::pin(stream::unfold(self, |mut paginator| async move {
            paginator
                .next_item()
                .await
                .map(|item| (item, paginator))
        }))
    }
}

impl<T: Send + 'static> Paginator<T, PageFetcher<T>> {
    /// Create a paginator over a `Send` fetcher, erasing its type
    pub fn boxed<F, Fut>(mut fetch: F) -> Self
    where
        F: FnMut(Option<String>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Page<T>, ClassifiedError>> + Send + 'static,
    {
        Paginator::new(Box::new(move |cursor| fetch(cursor).boxed()) as PageFetcher<T>)
    }
}

impl<T, F> fmt::Debug for Paginator<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("buffered", &self.buffer.len())
            .field("position", &self.position)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
