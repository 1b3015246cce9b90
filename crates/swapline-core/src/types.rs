//! Core type definitions for Swapline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address format tag carried by every destination.
///
/// Catalog entries keep the raw tag string so that unknown tags survive
/// deserialization; `from_tag` maps it onto this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    Evm,
    Ronin,
    Starknet,
    Solana,
    Tron,
    Osmosis,
}

impl AddressFormat {
    pub const ALL: [AddressFormat; 6] = [
        Self::Evm,
        Self::Ronin,
        Self::Starknet,
        Self::Solana,
        Self::Tron,
        Self::Osmosis,
    ];

    /// Parse a catalog tag. Unknown or empty tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(tag))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Ronin => "ronin",
            Self::Starknet => "starknet",
            Self::Solana => "solana",
            Self::Tron => "tron",
            Self::Osmosis => "osmosis",
        }
    }

    /// Hex-encoded formats compare case-insensitively
    pub fn is_hex(&self) -> bool {
        matches!(self, Self::Evm | Self::Ronin | Self::Starknet)
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog status. Anything other than "active" is treated as inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    #[default]
    #[serde(other)]
    Inactive,
}

/// On-chain network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub internal_name: String,
    pub display_name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub address_type: String,
}

/// Currency listing of an exchange on a given network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeCurrency {
    pub asset: String,
    pub network: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Centralized exchange account endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub internal_name: String,
    pub display_name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub address_type: String,
    #[serde(default)]
    pub currencies: Vec<ExchangeCurrency>,
}

/// Which category a destination belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    Network,
    Exchange,
}

impl DestinationKind {
    /// Path segment used for catalog resources (icons)
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network => "networks",
            Self::Exchange => "exchanges",
        }
    }
}

/// A chain or exchange account that can sit on either side of a swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Destination {
    Network(Network),
    Exchange(Exchange),
}

impl Destination {
    pub fn id(&self) -> &str {
        match self {
            Self::Network(n) => &n.internal_name,
            Self::Exchange(e) => &e.internal_name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Network(n) => &n.display_name,
            Self::Exchange(e) => &e.display_name,
        }
    }

    pub fn kind(&self) -> DestinationKind {
        match self {
            Self::Network(_) => DestinationKind::Network,
            Self::Exchange(_) => DestinationKind::Exchange,
        }
    }

    /// Raw address-format tag as supplied by the catalog
    pub fn address_type(&self) -> &str {
        match self {
            Self::Network(n) => &n.address_type,
            Self::Exchange(e) => &e.address_type,
        }
    }

    pub fn address_format(&self) -> Option<AddressFormat> {
        AddressFormat::from_tag(self.address_type())
    }

    pub fn is_active(&self) -> bool {
        let status = match self {
            Self::Network(n) => n.status,
            Self::Exchange(e) => e.status,
        };
        status == Status::Active
    }

    pub fn is_exchange(&self) -> bool {
        matches!(self, Self::Exchange(_))
    }

    /// Whether this is the endpoint named by `kind` and `id`
    pub fn same_endpoint(&self, kind: DestinationKind, id: &str) -> bool {
        self.kind() == kind && self.id() == id
    }
}

impl From<Network> for Destination {
    fn from(network: Network) -> Self {
        Self::Network(network)
    }
}

impl From<Exchange> for Destination {
    fn from(exchange: Exchange) -> Self {
        Self::Exchange(exchange)
    }
}

/// Swap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapType {
    /// Exchange account is the source
    OnRamp,
    /// Exchange account is the destination
    OffRamp,
    #[default]
    CrossChain,
}

impl SwapType {
    /// Whether the selector on `side` lists exchanges rather than networks
    pub fn exchange_side(&self, side: Side) -> bool {
        match side {
            Side::From => *self == Self::OnRamp,
            Side::To => *self == Self::OffRamp,
        }
    }
}

/// Side of the swap form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    From,
    To,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::From,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current swap form values relevant to destination selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapFormValues {
    #[serde(default)]
    pub swap_type: SwapType,
    #[serde(default)]
    pub from: Option<Destination>,
    #[serde(default)]
    pub to: Option<Destination>,
    /// Asset symbol of the selected currency
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub destination_address: String,
}

impl SwapFormValues {
    pub fn selected(&self, side: Side) -> Option<&Destination> {
        match side {
            Side::From => self.from.as_ref(),
            Side::To => self.to.as_ref(),
        }
    }
}

/// A previously used destination address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBookEntry {
    pub address: String,
    /// Last time the address was used
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub networks: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
}

/// Prohibited destination address.
///
/// `network` scopes the entry; `None` applies it to every network. An address
/// ending in `*` matches by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistedAddress {
    #[serde(default)]
    pub network: Option<String>,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    #[serde(default)]
    pub resource_storage_url: String,
}

/// Catalog snapshot supplied by the settings API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub exchanges: Vec<Exchange>,
    #[serde(default)]
    pub blacklisted_addresses: Vec<BlacklistedAddress>,
    #[serde(default)]
    pub discovery: Discovery,
}

impl Settings {
    pub fn network(&self, internal_name: &str) -> Option<&Network> {
        self.networks
            .iter()
            .find(|n| n.internal_name == internal_name)
    }

    pub fn exchange(&self, internal_name: &str) -> Option<&Exchange> {
        self.exchanges
            .iter()
            .find(|e| e.internal_name == internal_name)
    }

    /// Look up a destination of the given kind
    pub fn destination(&self, kind: DestinationKind, internal_name: &str) -> Option<Destination> {
        match kind {
            DestinationKind::Network => self.network(internal_name).cloned().map(Destination::from),
            DestinationKind::Exchange => {
                self.exchange(internal_name).cloned().map(Destination::from)
            }
        }
    }
}

/// Derived verdict for a candidate address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_syntactically_valid: bool,
    pub is_blacklisted: bool,
}

impl ValidationResult {
    /// Valid and not blacklisted
    pub fn is_acceptable(&self) -> bool {
        self.is_syntactically_valid && !self.is_blacklisted
    }
}
