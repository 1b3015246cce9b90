//! Network and exchange selector menus
//!
//! Builds the ordered list of selectable endpoints for one side of the swap
//! from the full catalog, the current form values and the query hints.

use serde::{Deserialize, Serialize};
use swapline_core::{
    Destination, DestinationKind, Exchange, Network, Settings, Side, Status, SwapFormValues,
};

use crate::query::QueryParams;

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMenuItem<T> {
    pub id: String,
    pub name: String,
    /// Position in the catalog
    pub order: usize,
    pub img_src: String,
    pub base_object: T,
}

impl<T> SelectMenuItem<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> SelectMenuItem<U> {
        SelectMenuItem {
            id: self.id,
            name: self.name,
            order: self.order,
            img_src: self.img_src,
            base_object: f(self.base_object),
        }
    }
}

/// Inputs shared by both menu generators
#[derive(Debug, Clone, Copy)]
pub struct MenuContext<'a> {
    pub values: &'a SwapFormValues,
    pub query: &'a QueryParams,
    pub resource_storage_url: &'a str,
    /// Allow the opposite side's selection to be picked again
    pub allow_same_endpoint: bool,
}

/// Catalog entries a menu can be built from
trait CatalogEntry: Clone {
    const KIND: DestinationKind;

    fn internal_name(&self) -> &str;
    fn display_name(&self) -> &str;
    fn status(&self) -> Status;
}

impl CatalogEntry for Network {
    const KIND: DestinationKind = DestinationKind::Network;

    fn internal_name(&self) -> &str {
        &self.internal_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl CatalogEntry for Exchange {
    const KIND: DestinationKind = DestinationKind::Exchange;

    fn internal_name(&self) -> &str {
        &self.internal_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// Icon URL for a catalog entry
pub fn icon_path(resource_storage_url: &str, kind: DestinationKind, internal_name: &str) -> String {
    format!(
        "{}/layerswap/{}/{}.png",
        resource_storage_url.trim_end_matches('/'),
        kind.category(),
        internal_name.to_lowercase()
    )
}

/// Networks selectable on `side`.
///
/// `lockNetwork` + `destNetwork` pins the `to` side to one network.
pub fn network_menu_items(
    networks: &[Network],
    side: Side,
    ctx: &MenuContext<'_>,
) -> Vec<SelectMenuItem<Network>> {
    let lock = match side {
        Side::To => ctx.query.locked_network(),
        Side::From => None,
    };
    menu_items(networks, side, lock, ctx)
}

/// Exchanges selectable on `side`.
///
/// `lockExchange` + `sourceExchangeName` pins the `from` side to one exchange.
pub fn exchange_menu_items(
    exchanges: &[Exchange],
    side: Side,
    ctx: &MenuContext<'_>,
) -> Vec<SelectMenuItem<Exchange>> {
    let lock = match side {
        Side::From => ctx.query.locked_exchange(),
        Side::To => None,
    };
    menu_items(exchanges, side, lock, ctx)
}

fn menu_items<T: CatalogEntry>(
    catalog: &[T],
    side: Side,
    lock: Option<&str>,
    ctx: &MenuContext<'_>,
) -> Vec<SelectMenuItem<T>> {
    let excluded = if ctx.allow_same_endpoint {
        None
    } else {
        ctx.values.selected(side.opposite())
    };

    catalog
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.status() == Status::Active)
        .filter(|(_, entry)| {
            lock.map_or(true, |id| entry.internal_name().eq_ignore_ascii_case(id))
        })
        .filter(|(_, entry)| {
            excluded.map_or(true, |dest| !dest.same_endpoint(T::KIND, entry.internal_name()))
        })
        .map(|(order, entry)| SelectMenuItem {
            id: entry.internal_name().to_string(),
            name: entry.display_name().to_string(),
            order,
            img_src: icon_path(ctx.resource_storage_url, T::KIND, entry.internal_name()),
            base_object: entry.clone(),
        })
        .collect()
}

/// Menu for one selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorMenu {
    pub side: Side,
    pub kind: DestinationKind,
    /// "Exchange" or "Network"
    pub placeholder: String,
    pub items: Vec<SelectMenuItem<Destination>>,
}

/// Build the menu for `side`, choosing exchanges or networks by swap type
pub fn selector_menu(settings: &Settings, side: Side, ctx: &MenuContext<'_>) -> SelectorMenu {
    if ctx.values.swap_type.exchange_side(side) {
        let items = exchange_menu_items(&settings.exchanges, side, ctx)
            .into_iter()
            .map(|item| item.map(Destination::Exchange))
            .collect();
        SelectorMenu {
            side,
            kind: DestinationKind::Exchange,
            placeholder: "Exchange".to_string(),
            items,
        }
    } else {
        let items = network_menu_items(&settings.networks, side, ctx)
            .into_iter()
            .map(|item| item.map(Destination::Network))
            .collect();
        SelectorMenu {
            side,
            kind: DestinationKind::Network,
            placeholder: "Network".to_string(),
            items,
        }
    }
}

/// Resolve a `from`/`to` query hint against menu items
pub fn preselect<'a, T>(
    items: &'a [SelectMenuItem<T>],
    hint: Option<&str>,
) -> Option<&'a SelectMenuItem<T>> {
    let hint = hint?;
    items.iter().find(|item| item.id.eq_ignore_ascii_case(hint))
}
