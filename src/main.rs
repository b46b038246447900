use config::Config;
use contracts::connect;
use output::write_holders;

use logger::init_default_logger;

mod collector;
mod config;
mod constants;
mod contracts;
mod error;
mod logger;
mod output;
mod points;
mod rarity;
mod utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_default_logger();

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {e}");
        return Err(e);
    }

    Ok(())
}

async fn run() -> eyre::Result<()> {
    let config = Config::read_default().await?;

    if config.a == 0.0 || config.b == 0.0 {
        tracing::warn!(
            "A = {} and B = {}: a zero divisor makes every score NaN or infinite",
            config.a,
            config.b
        );
    }

    let overlapping = config.rarity.overlapping_ids();
    if !overlapping.is_empty() {
        tracing::warn!(
            "Token IDs listed in several rarity entries, the first entry wins: {overlapping:?}"
        );
    }

    let source = connect(&config)?;
    let mut stdout = std::io::stdout().lock();
    let count = write_holders(&config, &source, &mut stdout).await?;

    tracing::info!("Collected {count} holders");

    Ok(())
}
