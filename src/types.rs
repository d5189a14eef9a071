use crate::core::types::EarnConfig;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BuilderConfig {
    pub output_dir: String,
    pub strat_contract: String,
    pub listen_addr: String,
    pub chains: Vec<ChainConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub key: String,
    pub rpc_url: String,
    pub wrapped_native: String, // routing intermediary
}

#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct StratConfigRequest {
    #[schema(example = 137)]
    pub chainId: u64,

    #[schema(example = "sushi")]
    pub farmName: String,

    #[schema(example = "0x0769fd68dFb93167989C6f7254cd0D766Fb2841F")]
    pub farmContractAddress: String,

    #[schema(example = 0)]
    pub pid: u64,

    pub rewardAddresses: Vec<String>,

    #[serde(default)]
    pub write: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Strat {
    pub asset: Address,
    pub pid: u64,
    pub farm_contract_address: Address,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StratConfig {
    #[serde(rename = "StratContract")]
    pub strat_contract: String,
    pub strat: Strat,
    #[serde(rename = "earnConfigs")]
    pub earn_configs: Vec<EarnConfig>,
}
