use super::constants::SNAPSHOT_HEADER;
use super::types::{Pool, PoolMap};
use super::Result;
use alloy::primitives::Address;
use anyhow::{anyhow, Context};
use csv::{Reader, Writer};
use num_bigint::BigUint;
use std::path::Path;
use std::str::FromStr;

// Pools are written sorted by pair address so identical maps give identical files
pub fn write_poolmap_data_on_disk<P: AsRef<Path>>(
    snapshot_file_path: P,
    pool_map: &PoolMap,
) -> Result<()> {
    let mut wrt = Writer::from_path(snapshot_file_path.as_ref()).with_context(|| {
        format!("Couldn't create snapshot file {}", snapshot_file_path.as_ref().display())
    })?;
    wrt.write_record(SNAPSHOT_HEADER)?;

    let mut pools: Vec<&Pool> = pool_map.values().collect();
    pools.sort_by_key(|pool| pool.address);
    for pool in pools {
        wrt.write_record([
            pool.address.to_string(),
            pool.token0.to_string(),
            pool.token1.to_string(),
            pool.reserve0.to_string(),
            pool.reserve1.to_string(),
        ])?;
    }
    wrt.flush()?;
    Ok(())
}

pub fn read_poolmap_data_from_disk<P: AsRef<Path>>(snapshot_file_path: P) -> Result<PoolMap> {
    let mut rdr = Reader::from_path(snapshot_file_path.as_ref()).with_context(|| {
        format!("Couldn't open snapshot file {}", snapshot_file_path.as_ref().display())
    })?;
    let mut pool_map = PoolMap::new();

    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() < SNAPSHOT_HEADER.len() {
            return Err(anyhow!("Snapshot row {} has {} columns", line + 1, record.len()));
        }
        // Rows written by hand may list the tokens in either order
        let pool = Pool::new(
            parse_address(&record[0])?,
            parse_address(&record[1])?,
            parse_address(&record[2])?,
            parse_reserve(&record[3])?,
            parse_reserve(&record[4])?,
        );
        pool_map.insert(pool.address, pool);
    }

    Ok(pool_map)
}

fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim()).with_context(|| format!("Invalid address {}", value))
}

fn parse_reserve(value: &str) -> Result<BigUint> {
    BigUint::from_str(value.trim()).with_context(|| format!("Invalid reserve {}", value))
}
