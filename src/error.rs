use thiserror::Error;

/// Errors that abort the run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid RPC_URL `{0}`: {1}")]
    InvalidRpcUrl(String, String),

    #[error("Invalid contract address `{0}`, expected 0x followed by 40 hex digits")]
    InvalidAddress(String),

    #[error("Invalid CHAIN `{0}`")]
    InvalidChain(String),

    #[error("Rarity entry #{0} has a non-positive weight: {1}")]
    InvalidRarity(usize, f64),

    #[error("`totalSupply` not available or failed. Please provide END_TOKEN_ID explicitly. Cause: {0}")]
    TotalSupplyUnavailable(String),

    #[error("`totalSupply` returned {0}, which does not fit a token id")]
    TotalSupplyOverflow(String),
}
