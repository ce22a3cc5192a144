use crate::config::toml_config::DEFAULT_KNOWLEDGE_PANEL_HOST;
use crate::config::ClientConfig;
use crate::core::http::join_url;
use crate::core::products::ProductsClient;
use crate::domain::model::{
    FacetKnowledgePanelResponse, FacetQuery, FacetResponse, FacetValueResponse,
};
use crate::domain::ports::ProductsApi;
use crate::utils::error::{ClientError, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

pub struct FacetsClient<P: ProductsApi = ProductsClient> {
    products: P,
    client: Client,
    knowledge_panel_host: String,
}

impl FacetsClient<ProductsClient> {
    pub fn new(client: Client) -> Self {
        Self::with_products(ProductsClient::new(client.clone()), client)
    }

    pub fn from_config(client: Client, config: &ClientConfig) -> Self {
        Self::with_products(
            ProductsClient::with_base_url(client.clone(), config.products.base_url.clone()),
            client,
        )
        .with_knowledge_panel_host(config.facets.knowledge_panel_host.clone())
    }
}

impl<P: ProductsApi> FacetsClient<P> {
    pub fn with_products(products: P, client: Client) -> Self {
        Self {
            products,
            client,
            knowledge_panel_host: DEFAULT_KNOWLEDGE_PANEL_HOST.to_string(),
        }
    }

    pub fn with_knowledge_panel_host(mut self, host: impl Into<String>) -> Self {
        self.knowledge_panel_host = host.into();
        self
    }

    pub async fn get_facet(&self, facet: &str, opts: Option<&FacetQuery>) -> Result<FacetResponse> {
        let default_query = FacetQuery::default();
        self.products
            .get_facet(facet, opts.unwrap_or(&default_query))
            .await
    }

    pub async fn get_facet_value(
        &self,
        facet: &str,
        value: &str,
        opts: &FacetQuery,
    ) -> Result<FacetValueResponse> {
        self.products.get_facet_value(facet, value, opts).await
    }

    fn knowledge_panels_request(&self, facet: &str, value: Option<&str>) -> RequestBuilder {
        let mut params = vec![("facet_tag", facet)];
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            params.push(("value_tag", value));
        }

        let url = join_url(&self.knowledge_panel_host, "/knowledge_panel");
        self.client.get(url).query(&params)
    }

    /// 取得 facet（或 facet 值）的知識面板。
    ///
    /// A non-2xx answer is only accepted when its body still carries a
    /// `knowledge_panels` object; anything else is a `StatusError`.
    pub async fn get_facet_knowledge_panels(
        &self,
        facet: &str,
        value: Option<&str>,
    ) -> Result<FacetKnowledgePanelResponse> {
        let request = self.knowledge_panels_request(facet, value);
        tracing::debug!("📡 Fetching knowledge panels for facet {} ({:?})", facet, value);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        tracing::warn!("🔶 Knowledge panel host answered with status: {}", status);
        match serde_json::from_str::<Value>(&body) {
            Ok(value) if value.get("knowledge_panels").is_some() => {
                Ok(serde_json::from_value(value)?)
            }
            _ => Err(ClientError::StatusError {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

pub async fn get_facet(
    client: &Client,
    facet: &str,
    opts: Option<&FacetQuery>,
) -> Result<FacetResponse> {
    FacetsClient::new(client.clone()).get_facet(facet, opts).await
}

pub async fn get_facet_value(
    client: &Client,
    facet: &str,
    value: &str,
    opts: &FacetQuery,
) -> Result<FacetValueResponse> {
    FacetsClient::new(client.clone())
        .get_facet_value(facet, value, opts)
        .await
}

pub async fn get_facet_knowledge_panels(
    client: &Client,
    facet: &str,
    value: Option<&str>,
) -> Result<FacetKnowledgePanelResponse> {
    FacetsClient::new(client.clone())
        .get_facet_knowledge_panels(facet, value)
        .await
}
