use crate::config::toml_config::DEFAULT_PRODUCTS_BASE_URL;
use crate::domain::model::{FacetQuery, FacetResponse, FacetValueResponse};
use crate::domain::ports::ProductsApi;
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Client for the product database facet endpoints.
#[derive(Debug, Clone)]
pub struct ProductsClient {
    client: Client,
    base_url: String,
}

impl ProductsClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_PRODUCTS_BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so `#`, `?` and `/` inside a facet or value stay part of the path.
    pub(crate) fn facet_url(&self, segments: &[&str]) -> Result<Url> {
        let invalid = |reason: &str| ClientError::InvalidConfigValueError {
            field: "products.base_url".to_string(),
            value: self.base_url.clone(),
            reason: reason.to_string(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &FacetQuery) -> Result<T> {
        tracing::debug!("📡 GET {} {:?}", url, query);

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ Product API request failed with status: {}", status);
            return Err(ClientError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProductsApi for ProductsClient {
    async fn get_facet(&self, facet: &str, query: &FacetQuery) -> Result<FacetResponse> {
        let file = format!("{}.json", facet);
        let url = self.facet_url(&["facets", file.as_str()])?;
        self.get_json(url, query).await
    }

    async fn get_facet_value(
        &self,
        facet: &str,
        value: &str,
        query: &FacetQuery,
    ) -> Result<FacetValueResponse> {
        let file = format!("{}.json", value);
        let url = self.facet_url(&["facets", facet, file.as_str()])?;
        self.get_json(url, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FacetSortOption;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_get_facet_forwards_query() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/facets/brands.json")
                .query_param("page", "2")
                .query_param("page_size", "10")
                .query_param("sort_by", "popularity");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "count": 2,
                    "tags": [
                        {"id": "ferrero", "name": "Ferrero", "products": 1200, "known": 0},
                        {"id": "nestle", "name": "Nestlé", "products": 900}
                    ]
                }));
        });

        let client = ProductsClient::with_base_url(Client::new(), server.base_url());
        let query = FacetQuery::new()
            .page(2)
            .page_size(10)
            .sort_by(FacetSortOption::Popularity);
        let result = client.get_facet("brands", &query).await.unwrap();

        api_mock.assert();
        assert_eq!(result.count, Some(2));
        assert_eq!(result.tags[0].id, "ferrero");
        assert_eq!(result.tags[1].products, Some(900));
    }

    #[tokio::test]
    async fn test_get_facet_value_path() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/facets/categories/en:sugars.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "count": 1,
                    "page": 1,
                    "page_size": 24,
                    "products": [{"code": "3017620422003"}],
                    "skip": 0
                }));
        });

        let client = ProductsClient::with_base_url(Client::new(), server.base_url());
        let result = client
            .get_facet_value("categories", "en:sugars", &FacetQuery::default())
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result.products.len(), 1);
        assert_eq!(result.page_size, Some(24));
        assert_eq!(result.extra["skip"], 0);
    }

    #[test]
    fn test_facet_url_encodes_segments() {
        let client =
            ProductsClient::with_base_url(Client::new(), "https://world.openfoodfacts.org/");
        let url = client
            .facet_url(&["facets", "labels", "en:fair#trade?x/y.json"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://world.openfoodfacts.org/facets/labels/en:fair%23trade%3Fx%2Fy.json"
        );
    }

    #[tokio::test]
    async fn test_get_facet_value_keeps_hash_in_path() {
        let server = MockServer::start();
        let truncated = server.mock(|when, then| {
            when.method(GET).path("/facets/labels/en:fair");
            then.status(404).body("wrong path");
        });
        let encoded_path =
            regex::Regex::new(r"^/facets/labels/en:fair(%23|#)trade\.json$").unwrap();
        let encoded = server.mock(|when, then| {
            when.method(GET).path_matches(encoded_path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"count": 7, "products": []}));
        });

        let client = ProductsClient::with_base_url(Client::new(), server.base_url());
        let result = client
            .get_facet_value("labels", "en:fair#trade", &FacetQuery::default())
            .await
            .unwrap();

        truncated.assert_hits(0);
        encoded.assert();
        assert_eq!(result.count, Some(7));
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let client = ProductsClient::with_base_url(Client::new(), "not a url");
        let err = client.facet_url(&["facets", "labels.json"]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/facets/nope.json");
            then.status(404).body("unknown facet");
        });

        let client = ProductsClient::with_base_url(Client::new(), server.base_url());
        let err = client
            .get_facet("nope", &FacetQuery::default())
            .await
            .unwrap_err();

        match err {
            ClientError::StatusError { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "unknown facet");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
