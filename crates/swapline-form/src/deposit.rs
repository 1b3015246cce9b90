//! OffRamp deposit network lookup
//!
//! When funds go to an exchange account, the user has to find their deposit
//! address on the exchange. The guidance names the asset and the network to
//! pick there.

use swapline_core::{Destination, Network, Status, SwapFormValues, SwapType};

/// Network to select on the exchange's deposit page.
///
/// First active catalog network among the exchange's default listings of the
/// selected asset. `None` outside OffRamp or without a currency.
pub fn off_ramp_deposit_network<'a>(
    values: &SwapFormValues,
    networks: &'a [Network],
) -> Option<&'a Network> {
    if values.swap_type != SwapType::OffRamp {
        return None;
    }
    let asset = values.currency.as_deref()?;
    let Some(Destination::Exchange(exchange)) = values.to.as_ref() else {
        return None;
    };

    let available: Vec<&str> = exchange
        .currencies
        .iter()
        .filter(|c| c.asset == asset && c.is_default)
        .filter(|c| {
            networks
                .iter()
                .any(|n| n.internal_name == c.network && n.status == Status::Active)
        })
        .map(|c| c.network.as_str())
        .collect();

    networks
        .iter()
        .find(|n| available.contains(&n.internal_name.as_str()))
}

/// Icon URL for a currency
pub fn currency_icon_path(resource_storage_url: &str, asset: &str) -> String {
    format!(
        "{}/layerswap/currencies/{}.png",
        resource_storage_url.trim_end_matches('/'),
        asset.to_lowercase()
    )
}
