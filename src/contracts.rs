use std::sync::Arc;

use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    sol,
    transports::{
        http::{Client, Http},
        Transport,
    },
};

use crate::{collector::HolderSource, config::Config};

use IERC20::IERC20Instance;
use IERC721::IERC721Instance;

sol! {
    #[sol(rpc)]
    contract IERC721 {
        function ownerOf(uint256 tokenId) external view returns (address);
        function totalSupply() external view returns (uint256);
    }

    #[sol(rpc)]
    contract IERC20 {
        mapping(address account => uint256) public balanceOf;
    }
}

/// Reads owners and balances from the collection and token contracts over one provider.
pub struct ChainSource<T, P> {
    nft: IERC721Instance<T, Arc<P>>,
    token: IERC20Instance<T, Arc<P>>,
}

impl<T, P> ChainSource<T, P>
where
    P: Provider<T, Ethereum>,
    T: Transport + Clone,
{
    pub fn new(
        provider: Arc<P>,
        nft_contract_address: Address,
        token_contract_address: Address,
    ) -> Self {
        Self {
            nft: IERC721::new(nft_contract_address, provider.clone()),
            token: IERC20::new(token_contract_address, provider),
        }
    }
}

/// Plain HTTP provider, no retry layer: a failed call surfaces to the collector as is.
pub fn connect(
    config: &Config,
) -> eyre::Result<ChainSource<Http<Client>, impl Provider<Http<Client>, Ethereum>>> {
    let rpc_url = config.rpc_url()?;
    let chain = config.named_chain()?;
    let nft_contract_address = config.nft_contract_address()?;
    let token_contract_address = config.token_contract_address()?;

    tracing::info!("Connecting to {chain} at {}", rpc_url.host_str().unwrap_or("<no host>"));

    let provider = ProviderBuilder::new().with_chain(chain).on_http(rpc_url);

    Ok(ChainSource::new(
        Arc::new(provider),
        nft_contract_address,
        token_contract_address,
    ))
}

impl<T, P> HolderSource for ChainSource<T, P>
where
    P: Provider<T, Ethereum>,
    T: Transport + Clone,
{
    async fn total_supply(&self) -> eyre::Result<U256> {
        Ok(self.nft.totalSupply().call().await?._0)
    }

    async fn owner_of(&self, token_id: u64) -> eyre::Result<Address> {
        Ok(self.nft.ownerOf(U256::from(token_id)).call().await?._0)
    }

    async fn balance_of(&self, holder: Address) -> eyre::Result<U256> {
        Ok(self.token.balanceOf(holder).call().await?._0)
    }
}
