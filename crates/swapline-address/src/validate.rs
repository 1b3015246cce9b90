//! Address validation for destination networks and exchanges
//!
//! Dispatches on the destination's address-format tag. The check is total:
//! malformed input, empty strings and unknown tags all yield `false`.

use sha2::Sha256;
use sha3::{Digest, Keccak256};
use swapline_core::{AddressFormat, BlacklistedAddress, Destination, SwapType, ValidationResult};

use crate::blacklist::is_blacklisted_for;

const EVM_HEX_LEN: usize = 40;
const STARKNET_MAX_HEX_LEN: usize = 64;
const RONIN_PREFIX: &str = "ronin:";
const OSMOSIS_PREFIX: &str = "osmo1";
const OSMOSIS_BODY_LEN: usize = 38;
const SOLANA_PUBKEY_LEN: usize = 32;
const TRON_ADDRESS_LEN: usize = 25;
const TRON_VERSION_BYTE: u8 = 0x41;

/// Check whether `address` is syntactically valid for `destination`.
pub fn is_valid_address(address: &str, destination: &Destination) -> bool {
    if address.is_empty() {
        return false;
    }

    match destination.address_format() {
        Some(format) => is_valid_for_format(address, format),
        None => false,
    }
}

/// Check an address against a specific format
pub fn is_valid_for_format(address: &str, format: AddressFormat) -> bool {
    match format {
        AddressFormat::Evm => is_valid_evm_address(address),
        AddressFormat::Ronin => is_valid_ronin_address(address),
        AddressFormat::Starknet => is_valid_starknet_address(address),
        AddressFormat::Solana => is_valid_solana_address(address),
        AddressFormat::Tron => is_valid_tron_address(address),
        AddressFormat::Osmosis => is_valid_osmosis_address(address),
    }
}

/// Full verdict for a candidate: syntax plus blacklist.
///
/// The blacklist is only consulted for syntactically valid addresses.
pub fn validate(
    address: &str,
    destination: &Destination,
    blacklist: &[BlacklistedAddress],
    swap_type: SwapType,
) -> ValidationResult {
    let is_syntactically_valid = is_valid_address(address, destination);
    let is_blacklisted =
        is_syntactically_valid && is_blacklisted_for(blacklist, swap_type, destination, address);

    ValidationResult {
        is_syntactically_valid,
        is_blacklisted,
    }
}

/// EVM address: `0x` + 40 hex digits.
///
/// Single-case hex is accepted as-is; mixed case must carry a valid EIP-55
/// checksum.
fn is_valid_evm_address(address: &str) -> bool {
    let Some(hex_part) = address.strip_prefix("0x") else {
        return false;
    };

    if hex_part.len() != EVM_HEX_LEN || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    eip55_checksum(hex_part) == hex_part
}

/// Compute the EIP-55 mixed-case form of 40 hex digits (no prefix)
fn eip55_checksum(hex_part: &str) -> String {
    let lower = hex_part.to_ascii_lowercase();
    let hash = hex::encode(Keccak256::digest(lower.as_bytes()));

    lower
        .chars()
        .zip(hash.chars())
        .map(|(c, h)| {
            // hash nibble >= 8 means uppercase
            if c.is_ascii_alphabetic() && h.to_digit(16).unwrap_or(0) >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// Convert a valid EVM address to its checksummed form
pub fn to_checksum_address(address: &str) -> Option<String> {
    if !is_valid_evm_address(address) {
        return None;
    }
    Some(format!("0x{}", eip55_checksum(&address[2..])))
}

fn is_valid_ronin_address(address: &str) -> bool {
    match address.strip_prefix(RONIN_PREFIX) {
        Some(rest) => is_valid_evm_address(&format!("0x{}", rest)),
        None => is_valid_evm_address(address),
    }
}

/// Starknet felt: `0x` + up to 64 hex digits
fn is_valid_starknet_address(address: &str) -> bool {
    let Some(hex_part) = address.strip_prefix("0x") else {
        return false;
    };
    !hex_part.is_empty()
        && hex_part.len() <= STARKNET_MAX_HEX_LEN
        && hex_part.chars().all(|c| c.is_ascii_hexdigit())
}

/// Solana: base58 encoding of a 32-byte public key
fn is_valid_solana_address(address: &str) -> bool {
    if address.len() < 32 || address.len() > 44 {
        return false;
    }
    match bs58::decode(address).into_vec() {
        Ok(decoded) => decoded.len() == SOLANA_PUBKEY_LEN,
        Err(_) => false,
    }
}

/// Tron: base58check, version byte 0x41, double-SHA256 checksum
fn is_valid_tron_address(address: &str) -> bool {
    let decoded = match bs58::decode(address).into_vec() {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };

    if decoded.len() != TRON_ADDRESS_LEN || decoded[0] != TRON_VERSION_BYTE {
        return false;
    }

    let (payload, checksum) = decoded.split_at(TRON_ADDRESS_LEN - 4);
    let digest = Sha256::digest(Sha256::digest(payload));
    &digest[..4] == checksum
}

/// Osmosis: optional `osmo1` prefix and a 38 character lowercase body
fn is_valid_osmosis_address(address: &str) -> bool {
    let body = address.strip_prefix(OSMOSIS_PREFIX).unwrap_or(address);
    body.len() == OSMOSIS_BODY_LEN
        && body
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Shorten an address for display, e.g. `0x5aA...eAed`.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 13 {
        return address.to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
