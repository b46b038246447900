use crate::rarity::RarityTable;

/// Points of a holder owning `nfts` with `token_balance` fungible tokens:
/// `(rarity_sum / a) * (token_balance / b)`.
///
/// `a` and `b` must be non-zero. A zero divisor is not guarded and yields NaN or infinity.
pub fn compute_points(
    a: f64,
    b: f64,
    nfts: &[u64],
    token_balance: f64,
    rarity: &RarityTable,
) -> f64 {
    let nft_sum: f64 = nfts.iter().map(|&nft_id| rarity.rarity_of(nft_id)).sum();

    (nft_sum / a) * (token_balance / b)
}
