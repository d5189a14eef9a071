use super::core::earn::build_earn_config;
use super::core::error::RouteError;
use super::core::indexer::pool::write_poolmap_data_on_disk;
use super::core::onchain::{connect, read_farm_pool, FarmPool, OnchainReserveProvider};
use super::core::optimization::{normalize_routes, select_best_route};
use super::core::pair::{fetch_hop_reserves, PairReserveProvider};
use super::core::paths::{enumerate_candidates, materialize_paths, required_hops, Candidates};
use super::core::pool::SnapshotReserveProvider;
use super::core::types::{EarnConfig, PoolTokens, Route};
use super::types::{BuilderConfig, ChainConfig, Strat, StratConfig, StratConfigRequest};
use alloy::primitives::Address;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// A request whose chain and addresses have been checked.
#[derive(Clone, Debug)]
pub struct ValidatedRequest {
    pub chain: ChainConfig,
    pub intermediary: Address,
    pub farm_name: String,
    pub farm: Address,
    pub pid: u64,
    pub rewards: Vec<Address>,
    pub write: bool,
}

pub fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim()).map_err(|e| anyhow!("Invalid address {}: {}", value, e))
}

pub fn parse_addresses(values: &[String]) -> Result<Vec<Address>> {
    values.iter().map(|value| parse_address(value)).collect()
}

fn is_file_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Farm names end up in the strat config file name, so they must be a single
/// plain path component.
pub fn check_farm_name(farm_name: &str) -> Result<&str> {
    if farm_name.is_empty() {
        return Err(anyhow!("Farm name cannot be empty"));
    }
    if !farm_name.chars().all(is_file_name_char) || farm_name.contains("..") {
        return Err(anyhow!(
            "Farm name {:?} may only contain [A-Za-z0-9_.-] and no '..'",
            farm_name
        ));
    }
    Ok(farm_name)
}

/// Maps an on-chain token symbol to `[A-Za-z0-9_.-]` with no `..`.
pub fn sanitize_symbol(symbol: &str) -> String {
    let mapped: String = symbol
        .chars()
        .map(|c| if is_file_name_char(c) { c } else { '_' })
        .collect();
    let mapped = if mapped.contains("..") {
        mapped.replace('.', "_")
    } else {
        mapped
    };
    if mapped.is_empty() {
        "_".to_string()
    } else {
        mapped
    }
}

pub fn validate_request(
    config: &BuilderConfig,
    request: &StratConfigRequest,
) -> Result<ValidatedRequest> {
    let farm_name = check_farm_name(request.farmName.trim())?.to_string();
    if request.rewardAddresses.is_empty() {
        return Err(anyhow!("At least one reward address is required"));
    }
    let chain = config.chain(request.chainId)?.clone();
    let intermediary = parse_address(&chain.wrapped_native)
        .with_context(|| format!("Bad wrapped native address for chain {}", chain.chain_id))?;

    Ok(ValidatedRequest {
        intermediary,
        farm_name,
        farm: parse_address(&request.farmContractAddress)?,
        pid: request.pid,
        rewards: parse_addresses(&request.rewardAddresses)?,
        write: request.write,
        chain,
    })
}

/// Finds the deepest direct or one-hop route from `reward` into the pool and
/// turns it into an earn config. Reward tokens that are pool tokens are zapped
/// directly without touching the provider.
pub async fn resolve_earn_config(
    provider: &dyn PairReserveProvider,
    pool: &PoolTokens,
    reward: Address,
    intermediary: Address,
) -> Result<EarnConfig, RouteError> {
    let paths = match enumerate_candidates(reward, pool, intermediary) {
        Candidates::ZeroHop => {
            debug!(%reward, "reward token is a pool token");
            return Ok(build_earn_config(reward, &Route::ZeroHop, pool));
        }
        Candidates::Paths(paths) => paths,
    };

    let hops = required_hops(&paths);
    let reserves = fetch_hop_reserves(provider, &hops).await?;
    let routes = normalize_routes(materialize_paths(&paths, &reserves));
    debug!(%reward, candidates = paths.len(), viable = routes.len(), "scored routes");

    let best = select_best_route(routes).ok_or(RouteError::NoRouteFound { reward })?;
    info!(
        %reward,
        path = ?best.path.tokens,
        depth = %best.normalized_depth,
        "selected route"
    );
    Ok(build_earn_config(reward, &Route::Swap(best.path), pool))
}

/// Resolves every reward token on its own task. Results come back in the
/// order of `rewards`, a failing reward token does not affect the others.
pub async fn resolve_earn_configs(
    provider: Arc<dyn PairReserveProvider>,
    pool: PoolTokens,
    rewards: &[Address],
    intermediary: Address,
) -> Vec<Result<EarnConfig, RouteError>> {
    let mut threads = vec![];
    for &reward in rewards {
        let provider = provider.clone();
        let worker_thread = tokio::spawn(async move {
            resolve_earn_config(provider.as_ref(), &pool, reward, intermediary).await
        });
        threads.push(worker_thread);
    }

    let mut results = vec![];
    for thread in threads {
        let result = thread
            .await
            .unwrap_or_else(|e| Err(anyhow!("Resolution task failed: {}", e).into()));
        results.push(result);
    }
    results
}

fn collect_earn_configs(
    results: Vec<Result<EarnConfig, RouteError>>,
    rewards: &[Address],
) -> Result<Vec<EarnConfig>> {
    results
        .into_iter()
        .zip(rewards)
        .map(|(result, reward)| {
            result.with_context(|| format!("Error resolving reward token {}", reward))
        })
        .collect()
}

/// Earn configs for `rewards` from a reserve snapshot file, no RPC involved.
pub async fn resolve_from_snapshot<P: AsRef<Path>>(
    snapshot_file_path: P,
    pool: PoolTokens,
    rewards: &[Address],
    intermediary: Address,
) -> Result<Vec<EarnConfig>> {
    let provider = SnapshotReserveProvider::load(snapshot_file_path)?;
    info!(pools = provider.pools().len(), "loaded reserve snapshot");
    let results = resolve_earn_configs(Arc::new(provider), pool, rewards, intermediary).await;
    collect_earn_configs(results, rewards)
}

pub async fn build_strat_config(
    config: &BuilderConfig,
    validated: &ValidatedRequest,
    snapshot_out: Option<PathBuf>,
) -> Result<StratConfig> {
    let provider = connect(&validated.chain.rpc_url)?;

    let farm_pool = read_farm_pool(&provider, validated.farm, validated.pid).await?;
    info!(
        token0 = %farm_pool.tokens.token0,
        token1 = %farm_pool.tokens.token1,
        symbol0 = %farm_pool.symbol0,
        symbol1 = %farm_pool.symbol1,
        "read farm pool"
    );

    let reserves = Arc::new(OnchainReserveProvider::new(provider, farm_pool.factory));
    let results = resolve_earn_configs(
        reserves.clone(),
        farm_pool.tokens,
        &validated.rewards,
        validated.intermediary,
    )
    .await;
    let earn_configs = collect_earn_configs(results, &validated.rewards)?;

    if let Some(snapshot_file_path) = snapshot_out {
        write_poolmap_data_on_disk(&snapshot_file_path, &reserves.recorded_pools().await)
            .context("Error writing reserve snapshot")?;
        info!(path = %snapshot_file_path.display(), "wrote reserve snapshot");
    }

    let strat_config = StratConfig {
        strat_contract: config.strat_contract.clone(),
        strat: Strat {
            asset: farm_pool.asset,
            pid: validated.pid,
            farm_contract_address: validated.farm,
        },
        earn_configs,
    };

    if validated.write {
        let path = write_strat_config(
            config,
            &validated.chain,
            &farm_pool,
            &validated.farm_name,
            &strat_config,
        )?;
        info!(path = %path.display(), "wrote strat config");
    }
    Ok(strat_config)
}

/// `<output_dir>/<chain key>/<farm>-<symbol0>-<symbol1>.json`, always inside `output_dir`.
pub fn strat_config_path(
    config: &BuilderConfig,
    chain: &ChainConfig,
    farm_name: &str,
    symbol0: &str,
    symbol1: &str,
) -> Result<PathBuf> {
    let file_name = format!(
        "{}-{}-{}.json",
        check_farm_name(farm_name)?,
        sanitize_symbol(symbol0),
        sanitize_symbol(symbol1)
    );
    Ok(Path::new(&config.output_dir)
        .join(sanitize_symbol(&chain.key.to_lowercase()))
        .join(file_name))
}

fn write_strat_config(
    config: &BuilderConfig,
    chain: &ChainConfig,
    farm_pool: &FarmPool,
    farm_name: &str,
    strat_config: &StratConfig,
) -> Result<PathBuf> {
    let path =
        strat_config_path(config, chain, farm_name, &farm_pool.symbol0, &farm_pool.symbol1)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(strat_config)?;
    fs::write(&path, json).with_context(|| format!("Error writing {}", path.display()))?;
    Ok(path)
}
