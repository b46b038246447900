use std::{path::Path, str::FromStr};

use alloy::{primitives::Address, transports::http::reqwest::Url};
use alloy_chains::NamedChain;
use serde::Deserialize;

use crate::{constants::CONFIG_FILE_PATH, error::AppError, rarity::RarityTable};

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub rpc_url: String,
    pub nft_contract_address: String,
    pub token_contract_address: String,
    pub a: f64,
    pub b: f64,
    pub start_token_id: Option<u64>,
    pub end_token_id: Option<u64>,
    pub chain: Option<String>,
    #[serde(default)]
    pub rarity: RarityTable,
}

impl Config {
    pub async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&cfg_str)
    }

    /// Reads the file given as the first CLI argument, or the default config file.
    pub async fn read_default() -> eyre::Result<Self> {
        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| CONFIG_FILE_PATH.to_string());

        tracing::info!("Reading config from {path}");
        Self::read_from_file(path).await
    }

    pub fn from_toml_str(cfg_str: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(cfg_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.rpc_url()?;
        self.named_chain()?;
        self.nft_contract_address()?;
        self.token_contract_address()?;

        if let Some((index, entry)) = self
            .rarity
            .entries()
            .iter()
            .enumerate()
            .find(|(_, entry)| !(entry.rarity > 0.0))
        {
            return Err(AppError::InvalidRarity(index, entry.rarity));
        }

        Ok(())
    }

    pub fn rpc_url(&self) -> Result<Url, AppError> {
        let url = self
            .rpc_url
            .parse::<Url>()
            .map_err(|e| AppError::InvalidRpcUrl(self.rpc_url.clone(), e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::InvalidRpcUrl(
                self.rpc_url.clone(),
                format!("unsupported scheme `{scheme}`, expected http or https"),
            )),
        }
    }

    pub fn nft_contract_address(&self) -> Result<Address, AppError> {
        parse_contract_address(&self.nft_contract_address)
    }

    pub fn token_contract_address(&self) -> Result<Address, AppError> {
        parse_contract_address(&self.token_contract_address)
    }

    pub fn named_chain(&self) -> Result<NamedChain, AppError> {
        match &self.chain {
            None => Ok(NamedChain::Mainnet),
            Some(chain) => {
                NamedChain::from_str(chain).map_err(|_| AppError::InvalidChain(chain.clone()))
            }
        }
    }

    pub fn start_token_id(&self) -> u64 {
        self.start_token_id.unwrap_or(0)
    }
}

/// `0x` followed by exactly 40 hex digits. Checksum casing is not enforced.
fn parse_contract_address(value: &str) -> Result<Address, AppError> {
    let invalid = || AppError::InvalidAddress(value.to_string());

    let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    Address::from_str(value).map_err(|_| invalid())
}
