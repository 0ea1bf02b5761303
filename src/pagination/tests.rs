//! Tests for pagination module

use super::*;
use crate::error::{ClassifiedError, ErrorKind};
use futures::future::{ready, Ready};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type FetchResult = Result<Page<u32>, ClassifiedError>;

/// Serves pages keyed by cursor (`""` for the first page) and records calls.
struct ScriptedPages {
    pages: HashMap<String, FetchResult>,
    calls: Arc<AtomicUsize>,
    cursors: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedPages {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            cursors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn page(mut self, cursor: &str, result: FetchResult) -> Self {
        self.pages.insert(cursor.to_string(), result);
        self
    }

    fn fetcher(&self) -> impl FnMut(Option<String>) -> Ready<FetchResult> {
        let pages = self.pages.clone();
        let calls = self.calls.clone();
        let cursors = self.cursors.clone();
        move |cursor| {
            calls.fetch_add(1, Ordering::SeqCst);
            cursors.lock().unwrap().push(cursor.clone());
            let key = cursor.unwrap_or_default();
            ready(
                pages
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| panic!("unexpected fetch for cursor {key:?}")),
            )
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Three pages of three items chained "" -> "c1" -> "c2" -> end
fn three_pages() -> ScriptedPages {
    ScriptedPages::new()
        .page("", Ok(Page::new(vec![1, 2, 3], "c1")))
        .page("c1", Ok(Page::new(vec![4, 5, 6], "c2")))
        .page("c2", Ok(Page::last(vec![7, 8, 9])))
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_last() {
    let page = Page::last(vec![1, 2]);
    assert!(page.is_last());
    assert_eq!(page.len(), 2);
    assert!(page.continuation().is_none());
}

#[test]
fn test_page_with_cursor() {
    let page: Page<u32> = Page::new(vec![], "abc");
    assert!(!page.is_last());
    assert!(page.is_empty());
    assert_eq!(page.continuation(), Some("abc"));
}

#[test]
fn test_page_empty_cursor_is_last() {
    let page: Page<u32> = Page::new(vec![1], "");
    assert!(page.is_last());
}

#[test]
fn test_page_deserialize() {
    let page: Page<serde_json::Value> = serde_json::from_value(json!({
        "items": [{"id": "a"}, {"id": "b"}],
        "next_cursor": "eyJza2lwIjoyfQ"
    }))
    .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.next_cursor.as_deref(), Some("eyJza2lwIjoyfQ"));

    let page: Page<serde_json::Value> = serde_json::from_value(json!({})).unwrap();
    assert!(page.is_empty());
    assert!(page.is_last());
}

#[test]
fn test_list_params_query() {
    assert!(ListParams::new().to_query().is_empty());

    let query = ListParams::new()
        .cursor(Some("abc".to_string()))
        .limit(50)
        .to_query();
    assert_eq!(
        query,
        vec![
            ("cursor".to_string(), "abc".to_string()),
            ("limit".to_string(), "50".to_string()),
        ]
    );
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[tokio::test]
async fn test_paginator_yields_all_pages_in_order() {
    let script = three_pages();
    let items = Paginator::new(script.fetcher()).collect_all().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(script.calls(), 3);
    assert_eq!(
        *script.cursors.lock().unwrap(),
        vec![None, Some("c1".to_string()), Some("c2".to_string())]
    );
}

#[tokio::test]
async fn test_paginator_nothing_fetched_until_pulled() {
    let script = three_pages();
    let paginator = Paginator::new(script.fetcher());

    assert_eq!(paginator.pages_fetched(), 0);
    assert_eq!(script.calls(), 0);
    assert!(!paginator.is_finished());
}

#[tokio::test]
async fn test_paginator_take_four_fetches_two_pages() {
    let script = three_pages();
    let items: Vec<_> = Paginator::new(script.fetcher())
        .into_stream()
        .take(4)
        .collect()
        .await;

    let items: Vec<u32> = items.into_iter().map(Result::unwrap).collect();
    assert_eq!(items, vec![1, 2, 3, 4]);
    assert_eq!(script.calls(), 2);
}

#[tokio::test]
async fn test_paginator_page_boundary_does_not_prefetch() {
    let script = three_pages();
    let mut paginator = Paginator::new(script.fetcher());

    for expected in 1..=3 {
        assert_eq!(paginator.next_item().await.unwrap().unwrap(), expected);
    }

    assert_eq!(paginator.pages_fetched(), 1);
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn test_paginator_empty_first_page() {
    let script = ScriptedPages::new().page("", Ok(Page::last(vec![])));
    let mut paginator = Paginator::new(script.fetcher());

    assert!(paginator.next_item().await.is_none());
    assert!(paginator.next_item().await.is_none());
    assert!(paginator.is_finished());
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn test_paginator_continues_past_empty_page_with_cursor() {
    let script = ScriptedPages::new()
        .page("", Ok(Page::new(vec![1], "c1")))
        .page("c1", Ok(Page::new(vec![], "c2")))
        .page("c2", Ok(Page::last(vec![2])));

    let items = Paginator::new(script.fetcher()).collect_all().await.unwrap();
    assert_eq!(items, vec![1, 2]);
    assert_eq!(script.calls(), 3);
}

#[tokio::test]
async fn test_paginator_surfaces_error_after_first_page() {
    let script = ScriptedPages::new()
        .page("", Ok(Page::new(vec![1, 2, 3], "c1")))
        .page("c1", Err(ClassifiedError::server_error(502, "bad gateway")))
        .page("c2", Ok(Page::last(vec![7, 8, 9])));

    let mut paginator = Paginator::new(script.fetcher());
    let mut seen = Vec::new();
    let mut error = None;
    while let Some(item) = paginator.next_item().await {
        match item {
            Ok(v) => seen.push(v),
            Err(e) => error = Some(e),
        }
    }

    assert_eq!(seen, vec![1, 2, 3]);
    let error = error.expect("error should surface");
    assert_eq!(error.kind(), ErrorKind::ServerError);
    assert_eq!(error.http_status(), Some(502));
    assert_eq!(script.calls(), 2);
    assert!(paginator.is_finished());
}

#[tokio::test]
async fn test_paginator_collect_all_returns_error() {
    let script = ScriptedPages::new()
        .page("", Ok(Page::new(vec![1], "c1")))
        .page("c1", Err(ClassifiedError::unauthorized("bad key")));

    let err = Paginator::new(script.fetcher())
        .collect_all()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_paginator_fresh_instance_restarts_from_first_page() {
    let script = three_pages();

    let first = Paginator::new(script.fetcher()).collect_all().await.unwrap();
    let second = Paginator::new(script.fetcher()).collect_all().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(script.calls(), 6);
}

#[tokio::test]
async fn test_boxed_paginator_stream() {
    let script = three_pages();
    let mut fetch = script.fetcher();
    let paginator: BoxPaginator<u32> = Paginator::boxed(move |cursor| fetch(cursor));

    let mut stream = paginator.into_stream();
    let mut total = 0;
    while let Some(item) = stream.next().await {
        total += item.unwrap();
    }
    assert_eq!(total, 45);
}

#[tokio::test(start_paused = true)]
async fn test_paginator_dropped_pull_keeps_cursor() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut paginator = Paginator::new(move |cursor: Option<String>| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move {
            match cursor.as_deref() {
                None => Ok::<_, ClassifiedError>(Page::new(vec![1, 2, 3], "p2")),
                _ => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(Page::last(vec![4, 5, 6]))
                }
            }
        }
    });

    for expected in 1..=3 {
        assert_eq!(paginator.next_item().await.unwrap().unwrap(), expected);
    }

    // Page 2 is still in flight when the pull is abandoned
    let abandoned = tokio::time::timeout(Duration::from_millis(5), paginator.next_item()).await;
    assert!(abandoned.is_err());
    assert!(!paginator.is_finished());

    let rest = paginator.collect_all().await.unwrap();
    assert_eq!(rest, vec![4, 5, 6]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_stream_polls_without_pinning() {
    let script = three_pages();
    let mut stream = Paginator::new(script.fetcher()).into_stream();

    assert_eq!(stream.next().await.unwrap().unwrap(), 1);
}
