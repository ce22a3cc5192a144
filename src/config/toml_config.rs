use crate::config::backend::BackendConfig;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PRODUCTS_BASE_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_KNOWLEDGE_PANEL_HOST: &str = "https://facets-kp.openfoodfacts.org";
pub const DEFAULT_USER_AGENT: &str = concat!("foodfacts-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub products: ProductsSettings,
    #[serde(default)]
    pub facets: FacetsSettings,
    #[serde(default)]
    pub prices: PricesSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsSettings {
    #[serde(default = "default_products_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsSettings {
    #[serde(default = "default_knowledge_panel_host")]
    pub knowledge_panel_host: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricesSettings {
    pub url: Option<String>,
    pub local_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_products_base_url() -> String {
    DEFAULT_PRODUCTS_BASE_URL.to_string()
}

fn default_knowledge_panel_host() -> String {
    DEFAULT_KNOWLEDGE_PANEL_HOST.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ProductsSettings {
    fn default() -> Self {
        Self {
            base_url: default_products_base_url(),
        }
    }
}

impl Default for FacetsSettings {
    fn default() -> Self {
        Self {
            knowledge_panel_host: default_knowledge_panel_host(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRICES_API_URL})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Prices backend settings; values still holding a `${...}` placeholder count as unset.
    pub fn backend(&self) -> BackendConfig {
        let resolved = |value: &Option<String>| value.clone().filter(|v| !v.contains("${"));
        BackendConfig::new(resolved(&self.prices.local_url), resolved(&self.prices.url))
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("products.base_url", &self.products.base_url)?;
        validate_url("facets.knowledge_panel_host", &self.facets.knowledge_panel_host)?;

        let backend = self.backend();
        if let Some(local) = &backend.local_url {
            validate_url("prices.local_url", local)?;
        }
        if let Some(remote) = &backend.remote_url {
            validate_url("prices.url", remote)?;
        }

        if let Some(timeout) = self.http.timeout_seconds {
            validate_positive_number("http.timeout_seconds", timeout, 1)?;
        }
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        Ok(())
    }
}
