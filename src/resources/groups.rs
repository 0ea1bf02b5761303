//! Group endpoints

use super::models::{Connector, Group, NewGroup, UpdateGroup};
use super::{endpoint, to_body, ApiResult};
use crate::http::HttpClient;
use crate::pagination::BoxPaginator;

/// `/groups`
#[derive(Debug, Clone, Copy)]
pub struct Groups<'a> {
    http: &'a HttpClient,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Every group in the account
    pub fn list(&self) -> BoxPaginator<Group> {
        self.http.paginate("groups")
    }

    pub async fn get(&self, id: &str) -> ApiResult<Group> {
        self.http.get(&endpoint(&["groups", id])).await
    }

    pub async fn create(&self, group: &NewGroup) -> ApiResult<Group> {
        self.http.post("groups", to_body(group)?).await
    }

    pub async fn update(&self, id: &str, update: &UpdateGroup) -> ApiResult<Group> {
        self.http
            .patch(&endpoint(&["groups", id]), to_body(update)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.http.delete(&endpoint(&["groups", id])).await.map(|_| ())
    }

    /// Connectors belonging to a group
    pub fn connectors(&self, group_id: &str) -> BoxPaginator<Connector> {
        self.http.paginate(endpoint(&["groups", group_id, "connectors"]))
    }
}
