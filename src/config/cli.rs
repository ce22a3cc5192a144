use crate::config::backend::BackendConfig;
use crate::domain::model::{FacetQuery, FacetSortOption};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "foodfacts")]
#[command(about = "Query food facets and the prices service from the command line")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "PRICES_API_URL", help = "Remote prices backend URL")]
    pub prices_url: Option<String>,

    #[arg(
        long,
        global = true,
        env = "PRICES_API_LOCAL_URL",
        help = "Local prices backend URL (takes precedence)"
    )]
    pub prices_local_url: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔中的 prices URL
    pub fn backend_overrides(&self, base: BackendConfig) -> BackendConfig {
        BackendConfig {
            local_url: self.prices_local_url.clone().or(base.local_url),
            remote_url: self.prices_url.clone().or(base.remote_url),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the values of a facet
    Facet {
        facet: String,
        #[command(flatten)]
        query: FacetArgs,
    },
    /// List products for one facet value
    FacetValue {
        facet: String,
        value: String,
        #[command(flatten)]
        query: FacetArgs,
    },
    /// Fetch knowledge panels for a facet or facet value
    FacetPanels { facet: String, value: Option<String> },
    /// Print the accepted facet sort options
    SortOptions,
    /// Prices service operations
    #[command(subcommand)]
    Prices(PricesCommand),
}

#[derive(Debug, Clone, Args)]
pub struct FacetArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    #[arg(long)]
    pub sort_by: Option<FacetSortOption>,
}

impl From<&FacetArgs> for FacetQuery {
    fn from(args: &FacetArgs) -> Self {
        FacetQuery {
            page: args.page,
            page_size: args.page_size,
            sort_by: args.sort_by,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum PricesCommand {
    /// List prices; filters are passed as key=value
    List {
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
    },
    Get { id: u64 },
    /// Create a price from a JSON file
    Create { file: PathBuf },
    /// Patch a price with the fields in a JSON file
    Update { id: u64, file: PathBuf },
    Delete { id: u64 },
    Stats {
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
    },
    /// Log in and print the token response.
    ///
    /// The session cookie only lives for this process, so a later `prices session`
    /// run starts logged out; reuse the printed `access_token` instead.
    Login {
        username: String,
        #[arg(long, env = "PRICES_API_PASSWORD", hide_env_values = true)]
        password: String,
    },
    UploadProof { file: PathBuf },
    Proofs,
    /// Check the session of this process (always logged out in a fresh run)
    Session,
    Status,
    BackendUrl,
}
