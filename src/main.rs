use anyhow::Context;
use clap::Parser;
use foodfacts_client::config::cli::{Command, PricesCommand};
use foodfacts_client::core::{Credentials, FacetQuery, ProofFile, QueryParams};
use foodfacts_client::utils::error::{ClientError, ErrorSeverity};
use foodfacts_client::utils::{logger, validation::Validate};
use foodfacts_client::{
    build_http_client, ApiResponse, CliConfig, ClientConfig, FacetSortOption, FacetsClient,
    PricesApi,
};
use serde::Serialize;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Config file: {:?}", cli.config);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<ClientError>() {
            Some(err) => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 Suggestion: {}", err.recovery_suggestion());

                let exit_code = match err.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    config.validate()?;

    let http = build_http_client(&config.http)?;

    match &cli.command {
        Command::Facet { facet, query } => {
            let facets = FacetsClient::from_config(http, &config);
            let query = FacetQuery::from(query);
            print_json(&facets.get_facet(facet, Some(&query)).await?)?;
        }
        Command::FacetValue {
            facet,
            value,
            query,
        } => {
            let facets = FacetsClient::from_config(http, &config);
            let result = facets
                .get_facet_value(facet, value, &FacetQuery::from(query))
                .await?;
            print_json(&result)?;
        }
        Command::FacetPanels { facet, value } => {
            let facets = FacetsClient::from_config(http, &config);
            let panels = facets
                .get_facet_knowledge_panels(facet, value.as_deref())
                .await?;
            tracing::info!("📋 Received {} knowledge panels", panels.knowledge_panels.len());
            print_json(&panels)?;
        }
        Command::SortOptions => {
            for option in FacetSortOption::ALL {
                println!("{}", option);
            }
        }
        Command::Prices(command) => {
            let backend = cli.backend_overrides(config.backend());
            let prices = PricesApi::new(http, &backend)?;
            run_prices(&prices, command).await?;
        }
    }

    Ok(())
}

async fn run_prices(prices: &PricesApi, command: &PricesCommand) -> anyhow::Result<()> {
    match command {
        PricesCommand::List { params } => {
            print_response(prices.get_prices(&parse_params(params)?).await?)?
        }
        PricesCommand::Get { id } => print_response(prices.get_price_by_id(*id).await?)?,
        PricesCommand::Create { file } => {
            let body = read_json(file)?;
            print_response(prices.create_price(&body).await?)?
        }
        PricesCommand::Update { id, file } => {
            let body = read_json(file)?;
            print_response(prices.update_price(*id, &body).await?)?
        }
        PricesCommand::Delete { id } => print_response(prices.delete_price(*id).await?)?,
        PricesCommand::Stats { params } => {
            print_response(prices.get_price_stats(&parse_params(params)?).await?)?
        }
        PricesCommand::Login { username, password } => {
            let credentials = Credentials {
                username: username.clone(),
                password: password.clone(),
            };
            let response = prices.login(&credentials).await?;
            if response.is_success() {
                tracing::info!("✅ Logged in as {}", username);
                tracing::info!("🔑 Session ends with this process; reuse the access_token below");
            }
            print_response(response)?
        }
        PricesCommand::UploadProof { file } => {
            let proof = ProofFile::from_path(file).await?;
            tracing::info!(
                "📤 Uploading proof {} ({} bytes)",
                proof.file_name,
                proof.bytes.len()
            );
            print_response(prices.upload_proof(proof).await?)?
        }
        PricesCommand::Proofs => print_response(prices.get_proofs().await?)?,
        PricesCommand::Session => println!("{}", prices.is_authenticated().await?),
        PricesCommand::Status => print_json(&prices.get_status().await?)?,
        PricesCommand::BackendUrl => println!("{}", prices.backend_url().unwrap_or_default()),
    }

    Ok(())
}

fn parse_params(params: &[String]) -> anyhow::Result<QueryParams> {
    Ok(params
        .iter()
        .map(|pair| QueryParams::parse_pair(pair))
        .collect::<Result<QueryParams, _>>()?)
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_response<T: Serialize>(response: ApiResponse<T>) -> anyhow::Result<()> {
    match response.into_result() {
        Ok(data) => print_json(&data),
        Err(e) => Err(e.into()),
    }
}
