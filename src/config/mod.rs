pub mod backend;
#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use backend::{is_configured, BackendConfig};
#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::{ClientConfig, HttpSettings};
