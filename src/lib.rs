pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{is_configured, BackendConfig, ClientConfig};
pub use crate::core::facets::{get_facet, get_facet_knowledge_panels, get_facet_value, FacetsClient};
pub use crate::core::http::build_http_client;
pub use crate::core::prices::PricesApi;
pub use crate::core::products::ProductsClient;
pub use crate::core::response::ApiResponse;
pub use crate::domain::model::{FacetQuery, FacetSortOption};
pub use crate::utils::error::{ClientError, Result};
