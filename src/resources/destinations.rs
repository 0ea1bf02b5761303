//! Destination endpoints

use super::models::{Destination, NewDestination, UpdateDestination};
use super::{endpoint, to_body, ApiResult};
use crate::http::HttpClient;
use crate::pagination::BoxPaginator;
use serde_json::json;

/// `/destinations`
#[derive(Debug, Clone, Copy)]
pub struct Destinations<'a> {
    http: &'a HttpClient,
}

impl<'a> Destinations<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub fn list(&self) -> BoxPaginator<Destination> {
        self.http.paginate("destinations")
    }

    pub async fn get(&self, id: &str) -> ApiResult<Destination> {
        self.http.get(&endpoint(&["destinations", id])).await
    }

    pub async fn create(&self, destination: &NewDestination) -> ApiResult<Destination> {
        self.http.post("destinations", to_body(destination)?).await
    }

    pub async fn update(&self, id: &str, update: &UpdateDestination) -> ApiResult<Destination> {
        self.http
            .patch(&endpoint(&["destinations", id]), to_body(update)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.http
            .delete(&endpoint(&["destinations", id]))
            .await
            .map(|_| ())
    }

    /// Re-run connection tests; results land in `extra["setup_tests"]`
    pub async fn run_setup_tests(&self, id: &str) -> ApiResult<Destination> {
        self.http
            .post(&endpoint(&["destinations", id, "test"]), json!({}))
            .await
    }
}
