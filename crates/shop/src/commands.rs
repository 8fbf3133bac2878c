//! Shop commands.

use tessera_gui::commands::{CommandError, Sender, require};
use tessera_gui::{Host, InstanceRef, SessionManager};
use tessera_primitives::ActorId;
use tracing::info;

use crate::PRICE_LIST;
use crate::domain::ShopDomain;

pub const OPEN_PERMISSION: &str = "tessera.shop.open";
pub const SELL_ALL_PERMISSION: &str = "tessera.shop.sellall";
pub const SET_PRICE_PERMISSION: &str = "tessera.shop.setprice";

fn player(shop: &ShopDomain, sender: Sender) -> Result<ActorId, CommandError> {
	match sender {
		Sender::Actor(actor) => Ok(actor),
		Sender::Console => {
			info!("{}", shop.state().messages().players_only);
			Err(CommandError::ActorOnly)
		}
	}
}

/// Opens the `MAIN_SHOP` template. `Ok(None)` when no such template is loaded.
pub fn open_shop(sessions: &mut SessionManager, host: &mut dyn Host, sender: Sender, shop: &ShopDomain) -> Result<Option<InstanceRef>, CommandError> {
	let actor = player(shop, sender)?;
	require(sessions, host, sender, OPEN_PERMISSION)?;
	let Some(main) = shop.state().main_shop() else {
		host.send(actor, &shop.state().messages().no_main_shop);
		return Ok(None);
	};
	Ok(Some(sessions.open_gui(host, actor, &main, None, None)?))
}

/// Sells every priced stack the sender carries. Returns the money paid out.
pub fn sell_all(sessions: &mut SessionManager, host: &mut dyn Host, sender: Sender, shop: &ShopDomain) -> Result<f64, CommandError> {
	let actor = player(shop, sender)?;
	require(sessions, host, sender, SELL_ALL_PERMISSION)?;
	let total = shop.state().sell_all(host, actor);
	if total > 0.0 {
		sessions.broadcast_refresh(host, &[PRICE_LIST]);
	}
	Ok(total)
}

/// Changes a sell price and refreshes every open price list. Returns how many were refreshed.
pub fn set_price(
	sessions: &mut SessionManager, host: &mut dyn Host, sender: Sender, shop: &ShopDomain, material: &str, price: f64,
) -> Result<usize, CommandError> {
	require(sessions, host, sender, SET_PRICE_PERMISSION)?;
	let previous = shop.state().set_price(material, price);
	info!(material, price, previous = ?previous, "price changed");
	Ok(sessions.broadcast_refresh(host, &[PRICE_LIST]))
}
