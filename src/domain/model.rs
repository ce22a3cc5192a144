use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Sort keys accepted by facet queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacetSortOption {
    #[serde(rename = "last_modified_t")]
    LastModified,
    #[serde(rename = "popularity")]
    Popularity,
    #[serde(rename = "environmental_score_score")]
    EnvironmentalScore,
    #[serde(rename = "created_t")]
    Created,
    #[serde(rename = "product_name")]
    ProductName,
    /// Accepted by the product API but missing from its published schema.
    /// Once the schema lists it, `is_upstream` should return true for it.
    #[serde(rename = "nutriscore_score")]
    NutriscoreScore,
}

impl FacetSortOption {
    pub const ALL: [FacetSortOption; 6] = [
        FacetSortOption::LastModified,
        FacetSortOption::Popularity,
        FacetSortOption::EnvironmentalScore,
        FacetSortOption::Created,
        FacetSortOption::ProductName,
        FacetSortOption::NutriscoreScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetSortOption::LastModified => "last_modified_t",
            FacetSortOption::Popularity => "popularity",
            FacetSortOption::EnvironmentalScore => "environmental_score_score",
            FacetSortOption::Created => "created_t",
            FacetSortOption::ProductName => "product_name",
            FacetSortOption::NutriscoreScore => "nutriscore_score",
        }
    }

    /// Whether the upstream product schema already declares this key.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, FacetSortOption::NutriscoreScore)
    }
}

impl fmt::Display for FacetSortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetSortOption {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        FacetSortOption::ALL
            .iter()
            .copied()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| ClientError::InvalidConfigValueError {
                field: "sort_by".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unsupported sort option. Valid options: {}",
                    FacetSortOption::ALL
                        .iter()
                        .map(|o| o.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<FacetSortOption>,
}

impl FacetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort_by(mut self, sort_by: FacetSortOption) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetTag {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub products: Option<u64>,
    #[serde(default)]
    pub known: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub tags: Vec<FacetTag>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetValueResponse {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePanel {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub panel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_element: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetKnowledgePanelResponse {
    #[serde(default)]
    pub knowledge_panels: HashMap<String, KnowledgePanel>,
}

/// Price records are defined by the prices service schema and passed through as-is.
pub type Price = serde_json::Value;

/// List envelope used by the prices service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
}

/// Query string pairs, forwarded in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// 解析 `key=value` 形式的參數
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => Err(ClientError::InvalidConfigValueError {
                field: "query".to_string(),
                value: pair.to_string(),
                reason: "Expected key=value".to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A proof document to upload, sent as the `file` part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ProofFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("proof")
            .to_string();
        let content_type = match path.extension().and_then(|ext| ext.to_str()) {
            Some("jpg") | Some("jpeg") => Some("image/jpeg"),
            Some("png") => Some("image/png"),
            Some("webp") => Some("image/webp"),
            Some("pdf") => Some("application/pdf"),
            _ => None,
        };

        Ok(Self {
            file_name,
            content_type: content_type.map(str::to_string),
            bytes,
        })
    }
}
