use super::core::constants::DEFAULT_STRAT_CONTRACT;
use super::types::{BuilderConfig, ChainConfig};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            output_dir: "vaults-config".to_string(),
            strat_contract: DEFAULT_STRAT_CONTRACT.to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            chains: vec![
                ChainConfig {
                    chain_id: 56,
                    key: "BSC".to_string(),
                    rpc_url: "https://bsc-dataseed.binance.org".to_string(),
                    wrapped_native: "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c".to_string(),
                },
                ChainConfig {
                    chain_id: 137,
                    key: "Polygon".to_string(),
                    rpc_url: "https://polygon-rpc.com".to_string(),
                    wrapped_native: "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270".to_string(),
                },
                ChainConfig {
                    chain_id: 43114,
                    key: "Avax".to_string(),
                    rpc_url: "https://api.avax.network/ext/bc/C/rpc".to_string(),
                    wrapped_native: "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7".to_string(),
                },
            ],
        }
    }
}

impl BuilderConfig {

    // Helper method to load from a specific path, confy writes the defaults if the file is missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let config: Self = confy::load_path(path)?;
        Ok(config)
    }

    pub fn chain(&self, chain_id: u64) -> Result<&ChainConfig> {
        self.chains
            .iter()
            .find(|chain| chain.chain_id == chain_id)
            .ok_or_else(|| anyhow!("Unsupported chain id {}", chain_id))
    }
}
