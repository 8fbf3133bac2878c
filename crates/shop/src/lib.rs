//! An example [`GuiDomain`](tessera_gui::GuiDomain): a shop whose prices come
//! from the GUI resources themselves.
//!
//! Listing buttons (`GENERIC_SHOP_INTENT`) open a per-viewer transaction
//! screen (special type `GENERIC_CONFIRMATION`) where the amount is adjusted
//! with `GENERIC_SHOP_CHANGE_AMOUNT` and settled with
//! `GENERIC_SHOP_CONFIRM_TRANSACTION`. Money moves through an [`Economy`],
//! items through [`Inventories`].

pub mod commands;
pub mod config;
pub mod domain;
pub mod economy;
pub mod elements;
pub mod inventory;
pub mod price_list;
pub mod transaction;

pub use config::{ShopConfig, ShopMessages};
pub use domain::{ShopDomain, ShopState};
pub use economy::{Economy, EconomyError, LedgerEconomy};
pub use inventory::{Inventories, MemoryInventories, Stack};
pub use price_list::PriceList;
pub use transaction::Transaction;

/// Special type of the transaction screen template.
pub const GENERIC_CONFIRMATION: &str = "GENERIC_CONFIRMATION";
/// Special type of the per-viewer price listing.
pub const PRICE_LIST: &str = "PRICE_LIST";
/// Special type of the template opened by the open-shop command.
pub const MAIN_SHOP: &str = "MAIN_SHOP";

/// Formats a money amount the way every shop message shows it.
pub fn money(value: f64) -> String {
	format!("{value:.2}")
}
