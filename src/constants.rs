// FILES
pub const CONFIG_FILE_PATH: &str = "data/config.toml";
pub const LOGS_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "holder-points.log";

/// Weight of a token id that is not listed in any rarity entry.
pub const DEFAULT_RARITY: f64 = 1.0;
