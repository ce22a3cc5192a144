pub mod facets;
pub mod http;
pub mod prices;
pub mod products;
pub mod response;

pub use crate::domain::model::{
    Credentials, FacetKnowledgePanelResponse, FacetQuery, FacetResponse, FacetSortOption,
    FacetValueResponse, KnowledgePanel, Page, Price, ProofFile, QueryParams,
};
pub use crate::domain::ports::ProductsApi;
pub use crate::utils::error::Result;
