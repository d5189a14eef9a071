use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use clap::{Parser, Subcommand};
use earn_config_builder::core::pool::sort_tokens;
use earn_config_builder::core::types::PoolTokens;
use earn_config_builder::orchestrator::{
    build_strat_config, parse_address, parse_addresses, resolve_from_snapshot, validate_request,
};
use earn_config_builder::types::{BuilderConfig, StratConfig, StratConfigRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Parser)]
#[command(name = "earn-config-builder", about = "Generates a MinichefV2 StratX4 config")]
struct Cli {
    /// Builder configuration file, created with defaults if missing
    #[arg(long, env = "EARN_CONFIG", default_value = "earn_config.toml")]
    config: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the farm pool from chain and print its strat config
    Build {
        #[arg(short = 'c', long)]
        chain_id: u64,

        /// Write the strat config under the configured output directory
        #[arg(short, long)]
        write: bool,

        /// Write every pair read during resolution to this CSV file
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        farm_name: String,
        farm_contract_address: String,
        pid: u64,
        #[arg(required = true)]
        reward_addresses: Vec<String>,
    },
    /// Resolve earn configs offline from a reserve snapshot
    Resolve {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        token0: String,
        #[arg(long)]
        token1: String,
        #[arg(long)]
        intermediary: String,
        #[arg(required = true)]
        reward_addresses: Vec<String>,
    },
    /// Serve strat configs over HTTP
    Serve,
}

// Hold configuration
#[derive(Clone)]
struct BuilderConfigState {
    config: Arc<BuilderConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(strat_config),
    components(schemas(StratConfigRequest)),
    tags(
        (name = "strat config", description = "StratX4 configs for a farm pool")
    )
)]
struct ApiDoc;

#[utoipa::path(
    post,
    path = "/strat_config",
    request_body = StratConfigRequest,
    responses(
        (status = 200, description = "Strat config with one earn config per reward token"),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Chain read or route resolution failed")
    ),
    tag = "strat config"
)]
async fn strat_config(
    State(state): State<BuilderConfigState>,
    Json(request): Json<StratConfigRequest>,
) -> Result<Json<StratConfig>, (StatusCode, String)> {
    let validated = validate_request(state.config.as_ref(), &request)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{:#}", e)))?;

    let strat_config = build_strat_config(state.config.as_ref(), &validated, None)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)))?;
    Ok(Json(strat_config))
}

async fn serve(config: BuilderConfig) -> anyhow::Result<()> {
    let openapi = ApiDoc::openapi();
    let listen_addr = config.listen_addr.clone();
    let config_state = BuilderConfigState {
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/strat_config", post(strat_config))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .with_state(config_state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("Server running on http://{}", listen_addr);
    info!("Swagger UI available at http://{}/swagger-ui/", listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn setup_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    // stdout carries the generated JSON
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_level);
    let config = BuilderConfig::load_from(cli.config)?;

    match cli.command {
        Command::Build {
            chain_id,
            write,
            snapshot_out,
            farm_name,
            farm_contract_address,
            pid,
            reward_addresses,
        } => {
            let request = StratConfigRequest {
                chainId: chain_id,
                farmName: farm_name,
                farmContractAddress: farm_contract_address,
                pid,
                rewardAddresses: reward_addresses,
                write,
            };
            let validated = validate_request(&config, &request)?;
            let strat_config = build_strat_config(&config, &validated, snapshot_out).await?;
            println!("{}", serde_json::to_string_pretty(&strat_config)?);
        }
        Command::Resolve {
            snapshot,
            token0,
            token1,
            intermediary,
            reward_addresses,
        } => {
            let (token0, token1) = sort_tokens(parse_address(&token0)?, parse_address(&token1)?);
            let pool = PoolTokens::new(token0, token1);
            let rewards = parse_addresses(&reward_addresses)?;
            let earn_configs =
                resolve_from_snapshot(snapshot, pool, &rewards, parse_address(&intermediary)?)
                    .await?;
            println!("{}", serde_json::to_string_pretty(&earn_configs)?);
        }
        Command::Serve => serve(config).await?,
    }
    Ok(())
}
