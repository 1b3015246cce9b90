//! Recently used destination addresses
//!
//! Entries come from the user's account data and are read-only here. The
//! filter keeps entries that were used with the current destination and that
//! still validate against it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swapline_core::{AddressBookEntry, Destination, DestinationKind, SwapType};

use crate::validate::{is_valid_address, shorten_address};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Entries applicable to `destination`, in input order.
///
/// OffRamp looks at the entry's exchange ids, every other swap type at its
/// network ids. An entry never matches a destination of the other category.
pub fn recently_used<'a>(
    entries: &'a [AddressBookEntry],
    swap_type: SwapType,
    destination: &Destination,
) -> Vec<&'a AddressBookEntry> {
    let scope = match swap_type {
        SwapType::OffRamp => DestinationKind::Exchange,
        SwapType::OnRamp | SwapType::CrossChain => DestinationKind::Network,
    };

    if destination.kind() != scope {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| {
            let ids = match scope {
                DestinationKind::Exchange => &entry.exchanges,
                DestinationKind::Network => &entry.networks,
            };
            ids.iter().any(|id| id == destination.id())
        })
        .filter(|entry| is_valid_address(&entry.address, destination))
        .collect()
}

/// Whole days between `now` and `used_at`, rounded to nearest.
pub fn days_since(now: DateTime<Utc>, used_at: DateTime<Utc>) -> i64 {
    let millis = (now - used_at).num_milliseconds().abs() as f64;
    (millis / MILLIS_PER_DAY).round() as i64
}

/// "Used ..." label shown next to a recent address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLabel {
    Today,
    Yesterday,
    DaysAgo(i64),
}

impl UsageLabel {
    pub fn from_days(days: i64) -> Self {
        match days {
            0 => Self::Today,
            1 => Self::Yesterday,
            n => Self::DaysAgo(n),
        }
    }

    pub fn between(now: DateTime<Utc>, used_at: DateTime<Utc>) -> Self {
        Self::from_days(days_since(now, used_at))
    }
}

impl fmt::Display for UsageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "Used today"),
            Self::Yesterday => write!(f, "Used yesterday"),
            Self::DaysAgo(n) => write!(f, "Used {} days ago", n),
        }
    }
}

/// Presentation view of an applicable address book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentAddress {
    pub address: String,
    pub short_address: String,
    pub date: DateTime<Utc>,
    pub days_since: i64,
    pub label: String,
}

/// Filter and label the address book for display
pub fn recent_addresses(
    entries: &[AddressBookEntry],
    swap_type: SwapType,
    destination: &Destination,
    now: DateTime<Utc>,
) -> Vec<RecentAddress> {
    recently_used(entries, swap_type, destination)
        .into_iter()
        .map(|entry| {
            let days = days_since(now, entry.date);
            RecentAddress {
                address: entry.address.clone(),
                short_address: shorten_address(&entry.address),
                date: entry.date,
                days_since: days,
                label: UsageLabel::from_days(days).to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use swapline_core::{Exchange, Network, Status};

    const ADDR_A: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const ADDR_B: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn ethereum() -> Destination {
        Destination::Network(Network {
            internal_name: "ethereum".to_string(),
            display_name: "Ethereum".to_string(),
            status: Status::Active,
            address_type: "evm".to_string(),
        })
    }

    fn binance() -> Destination {
        Destination::Exchange(Exchange {
            internal_name: "binance".to_string(),
            display_name: "Binance".to_string(),
            status: Status::Active,
            address_type: "evm".to_string(),
            currencies: vec![],
        })
    }

    fn entry(address: &str, networks: &[&str], exchanges: &[&str]) -> AddressBookEntry {
        AddressBookEntry {
            address: address.to_string(),
            date: now(),
            networks: networks.iter().map(|s| s.to_string()).collect(),
            exchanges: exchanges.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_filters_by_network_and_validity() {
        let entries = vec![
            entry(ADDR_A, &["ethereum"], &[]),
            entry("0xnotvalid", &["ethereum"], &[]),
            entry(ADDR_B, &["arbitrum"], &[]),
        ];
        let result = recently_used(&entries, SwapType::CrossChain, &ethereum());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, ADDR_A);
    }

    #[test]
    fn test_off_ramp_uses_exchange_scope() {
        let entries = vec![
            entry(ADDR_A, &["binance"], &[]),
            entry(ADDR_B, &[], &["binance"]),
        ];
        let result = recently_used(&entries, SwapType::OffRamp, &binance());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].address, ADDR_B);
    }

    #[test]
    fn test_categories_never_cross() {
        // listed under both scopes by id, but the destination kind decides
        let entries = vec![entry(ADDR_A, &["binance"], &["ethereum"])];
        assert!(recently_used(&entries, SwapType::CrossChain, &binance()).is_empty());
        assert!(recently_used(&entries, SwapType::OffRamp, &ethereum()).is_empty());
    }

    #[test]
    fn test_preserves_order() {
        let entries = vec![
            entry(ADDR_B, &["ethereum"], &[]),
            entry(ADDR_A, &["ethereum"], &[]),
        ];
        let result = recently_used(&entries, SwapType::OnRamp, &ethereum());
        let addresses: Vec<&str> = result.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(addresses, vec![ADDR_B, ADDR_A]);
    }

    #[test]
    fn test_day_label_boundaries() {
        let now = now();
        let label = |hours: i64| UsageLabel::between(now, now - Duration::hours(hours));

        assert_eq!(label(0), UsageLabel::Today);
        assert_eq!(label(11), UsageLabel::Today);
        assert_eq!(label(12), UsageLabel::Yesterday);
        assert_eq!(label(24), UsageLabel::Yesterday);
        assert_eq!(label(35), UsageLabel::Yesterday);
        assert_eq!(label(36), UsageLabel::DaysAgo(2));
        assert_eq!(label(48), UsageLabel::DaysAgo(2));
        assert_eq!(label(24 * 10 + 13), UsageLabel::DaysAgo(11));
    }

    #[test]
    fn test_days_since_is_absolute() {
        let now = now();
        assert_eq!(days_since(now, now + Duration::days(3)), 3);
    }

    #[test]
    fn test_label_text() {
        assert_eq!(UsageLabel::Today.to_string(), "Used today");
        assert_eq!(UsageLabel::Yesterday.to_string(), "Used yesterday");
        assert_eq!(UsageLabel::DaysAgo(5).to_string(), "Used 5 days ago");
    }

    #[test]
    fn test_recent_addresses_view() {
        let mut e = entry(ADDR_A, &["ethereum"], &[]);
        e.date = now() - Duration::days(4);
        let view = recent_addresses(&[e], SwapType::CrossChain, &ethereum(), now());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].days_since, 4);
        assert_eq!(view[0].label, "Used 4 days ago");
        assert_eq!(view[0].short_address, "0x5aA...eAed");
    }
}
