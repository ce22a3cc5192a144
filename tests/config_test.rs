use anyhow::Result;
use foodfacts_client::utils::validation::Validate;
use foodfacts_client::{is_configured, BackendConfig, ClientConfig, ClientError, PricesApi};
use reqwest::Client;
use tempfile::TempDir;

#[test]
fn test_load_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("foodfacts.toml");
    std::fs::write(
        &config_path,
        r#"
[products]
base_url = "https://world.openfoodfacts.net"

[prices]
url = "https://prices.openfoodfacts.org"
local_url = "http://localhost:8000"

[http]
timeout_seconds = 10
user_agent = "foodfacts-tests/1.0"
"#,
    )?;

    let config = ClientConfig::from_file(&config_path)?;
    config.validate()?;

    assert_eq!(config.products.base_url, "https://world.openfoodfacts.net");
    assert_eq!(config.http.timeout_seconds, Some(10));
    assert_eq!(config.http.user_agent, "foodfacts-tests/1.0");
    assert_eq!(config.backend().resolve(), Some("http://localhost:8000"));
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let err = ClientConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ClientError::IoError(_)));
}

#[test]
fn test_resolution_table() {
    let local = Some("http://localhost:8000".to_string());
    let remote = Some("https://prices.openfoodfacts.org".to_string());

    let both = BackendConfig::new(local.clone(), remote.clone());
    let remote_only = BackendConfig::new(None, remote.clone());
    let neither = BackendConfig::new(None, None);

    assert_eq!(both.resolve(), local.as_deref());
    assert_eq!(remote_only.resolve(), remote.as_deref());
    assert_eq!(neither.resolve(), None);

    for config in [&both, &remote_only, &neither] {
        assert_eq!(
            is_configured(config),
            PricesApi::new(Client::new(), config).is_ok()
        );
    }
}

#[test]
fn test_resolution_is_evaluated_per_call() {
    let mut config = BackendConfig::remote("https://prices.openfoodfacts.org");
    assert_eq!(config.resolve(), Some("https://prices.openfoodfacts.org"));

    config.local_url = Some("http://localhost:8000".to_string());
    assert_eq!(config.resolve(), Some("http://localhost:8000"));
}
