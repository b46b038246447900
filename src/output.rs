use std::io::Write;

use crate::{
    collector::{collect_holders, HolderSource},
    config::Config,
};

/// Collects every holder, then writes the listing as pretty JSON.
/// Nothing is written when collection fails.
pub async fn write_holders<S, W>(config: &Config, source: &S, out: &mut W) -> eyre::Result<usize>
where
    S: HolderSource,
    W: Write,
{
    let holders = collect_holders(config, source).await?;

    serde_json::to_writer_pretty(&mut *out, &holders)?;
    writeln!(out)?;
    out.flush()?;

    Ok(holders.len())
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::*;
    use crate::{
        collector::tests::{config, FakeSource, ALICE, BOB},
        error::AppError,
    };

    #[tokio::test]
    async fn failed_total_supply_writes_nothing() {
        let source = FakeSource::with_owners(&[(0, ALICE)]);
        let mut out = Vec::new();

        let err = write_holders(&config(None), &source, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::TotalSupplyUnavailable(_))
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn writes_holder_listing_as_json() {
        let mut source = FakeSource::with_owners(&[(0, ALICE), (1, BOB), (2, ALICE)]);
        source.balances.insert(ALICE, U256::from(20));

        let mut out = Vec::new();
        let count = write_holders(&config(Some(2)), &source, &mut out)
            .await
            .unwrap();

        let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(listing.as_array().map(Vec::len), Some(2));
        assert_eq!(listing[0]["nfts"], serde_json::json!([0, 2]));
        assert_eq!(listing[0]["token"], "20");
        assert_eq!(listing[1]["token"], "0");
        assert_eq!(listing[1]["points"], 0.0);
    }

    #[tokio::test]
    async fn empty_range_writes_empty_list() {
        let source = FakeSource::default();
        let mut config = config(Some(3));
        config.start_token_id = Some(4);

        let mut out = Vec::new();
        write_holders(&config, &source, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
