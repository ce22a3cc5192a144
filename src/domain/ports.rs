use crate::domain::model::{FacetQuery, FacetResponse, FacetValueResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Facet listing operations of the shared product API.
#[async_trait]
pub trait ProductsApi: Send + Sync {
    async fn get_facet(&self, facet: &str, query: &FacetQuery) -> Result<FacetResponse>;

    async fn get_facet_value(
        &self,
        facet: &str,
        value: &str,
        query: &FacetQuery,
    ) -> Result<FacetValueResponse>;
}
