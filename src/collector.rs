use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use serde::{Serialize, Serializer};

use crate::{
    config::Config,
    error::AppError,
    points::compute_points,
    utils::{now_millis, u256_to_f64},
};

/// Read-only view of the collection and token contracts.
#[allow(async_fn_in_trait)]
pub trait HolderSource {
    async fn total_supply(&self) -> eyre::Result<U256>;
    async fn owner_of(&self, token_id: u64) -> eyre::Result<Address>;
    async fn balance_of(&self, holder: Address) -> eyre::Result<U256>;
}

/// Closed interval of token ids to scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenRange {
    pub start: u64,
    pub end: u64,
}

impl TokenRange {
    pub fn ids(&self) -> impl Iterator<Item = u64> {
        self.start..=self.end
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HolderRecord {
    pub address: Address,
    pub nfts: Vec<u64>,
    #[serde(serialize_with = "serialize_decimal")]
    pub token: U256,
    pub points: f64,
    pub time: i64,
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Owned token ids per holder, holders kept in first-seen order.
#[derive(Default, Debug)]
pub struct HolderMap {
    holders: Vec<(Address, Vec<u64>)>,
    index: HashMap<Address, usize>,
}

impl HolderMap {
    pub fn push(&mut self, holder: Address, token_id: u64) {
        match self.index.get(&holder) {
            Some(&position) => self.holders[position].1.push(token_id),
            None => {
                self.index.insert(holder, self.holders.len());
                self.holders.push((holder, vec![token_id]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }
}

impl IntoIterator for HolderMap {
    type Item = (Address, Vec<u64>);
    type IntoIter = std::vec::IntoIter<(Address, Vec<u64>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.holders.into_iter()
    }
}

/// Explicit END_TOKEN_ID wins, otherwise the collection's total supply is the inclusive end.
pub async fn resolve_range<S: HolderSource>(
    config: &Config,
    source: &S,
) -> Result<TokenRange, AppError> {
    let start = config.start_token_id();

    let end = match config.end_token_id {
        Some(end) => end,
        None => {
            let supply = source
                .total_supply()
                .await
                .map_err(|e| AppError::TotalSupplyUnavailable(e.to_string()))?;

            u64::try_from(supply).map_err(|_| AppError::TotalSupplyOverflow(supply.to_string()))?
        }
    };

    Ok(TokenRange { start, end })
}

pub async fn collect_owners<S: HolderSource>(source: &S, range: TokenRange) -> HolderMap {
    let mut holder_map = HolderMap::default();

    for token_id in range.ids() {
        match source.owner_of(token_id).await {
            Ok(holder) => holder_map.push(holder, token_id),
            Err(e) => tracing::warn!("Error fetching owner for token ID {token_id}: {e}"),
        }
    }

    holder_map
}

pub async fn collect_holders<S: HolderSource>(
    config: &Config,
    source: &S,
) -> eyre::Result<Vec<HolderRecord>> {
    let range = resolve_range(config, source).await?;
    tracing::info!(
        "Querying token holders from ID {} to {}...",
        range.start,
        range.end
    );

    let holder_map = collect_owners(source, range).await;
    if holder_map.is_empty() {
        tracing::warn!("No owners resolved in the scanned range");
    }
    tracing::info!(
        "Fetching ERC20 balances for {} addresses...",
        holder_map.len()
    );

    let mut holders = Vec::with_capacity(holder_map.len());

    for (address, nfts) in holder_map {
        let token = source.balance_of(address).await.unwrap_or_else(|e| {
            tracing::warn!("Error fetching balance for address {address}: {e}");
            U256::ZERO
        });

        // precision loss above 2^53 is accepted
        let points = compute_points(config.a, config.b, &nfts, u256_to_f64(token), &config.rarity);

        holders.push(HolderRecord {
            address,
            nfts,
            token,
            points,
            time: now_millis(),
        });
    }

    Ok(holders)
}
