//! Prohibited destination addresses

use swapline_core::{BlacklistedAddress, Destination, SwapType};

/// Check whether `address` is blacklisted for an on-chain destination.
///
/// Exchange destinations never match. An entry applies when it is unscoped
/// or scoped to the destination's network; a trailing `*` turns the entry
/// into a prefix pattern. Hex-style formats compare case-insensitively.
pub fn is_blacklisted(
    blacklist: &[BlacklistedAddress],
    destination: &Destination,
    address: &str,
) -> bool {
    if destination.is_exchange() || address.is_empty() {
        return false;
    }

    let fold_case = destination
        .address_format()
        .map(|format| format.is_hex())
        .unwrap_or(false);

    blacklist
        .iter()
        .filter(|entry| {
            entry
                .network
                .as_deref()
                .map_or(true, |network| network.eq_ignore_ascii_case(destination.id()))
        })
        .any(|entry| matches_entry(&entry.address, address, fold_case))
}

/// Direction-aware check: OffRamp swaps settle to an exchange account and
/// are never blacklisted.
pub fn is_blacklisted_for(
    blacklist: &[BlacklistedAddress],
    swap_type: SwapType,
    destination: &Destination,
    address: &str,
) -> bool {
    swap_type != SwapType::OffRamp && is_blacklisted(blacklist, destination, address)
}

fn matches_entry(pattern: &str, address: &str, fold_case: bool) -> bool {
    let (pattern, address) = if fold_case {
        (pattern.to_ascii_lowercase(), address.to_ascii_lowercase())
    } else {
        (pattern.to_string(), address.to_string())
    };

    match pattern.strip_suffix('*') {
        Some(prefix) => !prefix.is_empty() && address.starts_with(prefix),
        None => pattern == address,
    }
}
