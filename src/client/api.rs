//! Transport seam between the list controller and `/api/<resource>`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::ClientError;
use crate::envelope::ApiResponse;
use crate::query::ListQuery;

/// Remote operations a list view needs.
#[async_trait]
pub trait ListApi<T>: Send + Sync {
    /// `GET /api/<resource>?<query>`.
    async fn fetch(
        &self,
        resource: &str,
        query: &ListQuery,
        token: &str,
    ) -> Result<ApiResponse<Vec<T>>, ClientError>;

    /// `DELETE /api/<resource>/<id>`.
    async fn delete(
        &self,
        resource: &str,
        id: i32,
        token: &str,
    ) -> Result<ApiResponse<()>, ClientError>;
}

/// [`ListApi`] over HTTP with `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpListApi {
    client: Client,
    base_url: String,
}

impl HttpListApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/api/{}", self.base_url, resource.trim_matches('/'))
    }
}

async fn read_envelope<D: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<D>, ClientError> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    // Error statuses still carry the envelope with a message.
    Ok(response.json::<ApiResponse<D>>().await?)
}

#[async_trait]
impl<T> ListApi<T> for HttpListApi
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(
        &self,
        resource: &str,
        query: &ListQuery,
        token: &str,
    ) -> Result<ApiResponse<Vec<T>>, ClientError> {
        let url = format!("{}?{}", self.resource_url(resource), query.to_query_string()?);
        log::debug!("GET {url}");

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        read_envelope(response).await
    }

    async fn delete(
        &self,
        resource: &str,
        id: i32,
        token: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        let url = format!("{}/{}", self.resource_url(resource), id);
        log::debug!("DELETE {url}");

        let response = self.client.delete(&url).bearer_auth(token).send().await?;
        read_envelope(response).await
    }
}
