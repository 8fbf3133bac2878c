//! The `[shop]` table of `tessera.toml`.

use std::path::Path;

use serde::Deserialize;
use tessera_gui::SettingsError;
use tessera_primitives::colorize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
	/// Transaction screen opened by listing buttons that name none.
	pub default_screen: String,
	/// Number of leading inventory slots the sell-all command looks at.
	pub sell_all_slots: usize,
	/// Balance of an actor the ledger has never seen.
	pub starting_balance: f64,
	pub messages: ShopMessages,
}

impl Default for ShopConfig {
	fn default() -> Self {
		Self {
			default_screen: "shop".to_string(),
			sell_all_slots: 36,
			starting_balance: 0.0,
			messages: ShopMessages::default(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	shop: ShopConfig,
}

impl ShopConfig {
	/// Reads the `[shop]` table of `path`. A missing file or table yields defaults.
	pub fn load(path: &Path) -> Result<Self, SettingsError> {
		if !path.exists() {
			return Ok(Self::default());
		}
		let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let file: ConfigFile = toml::from_str(&content).map_err(|source| SettingsError::Decode {
			path: path.to_path_buf(),
			source,
		})?;
		Ok(file.shop)
	}
}

/// Shop replies and lore templates. `&` colour codes are translated on use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopMessages {
	pub show_amount: String,
	pub buy_lore: String,
	pub sell_lore: String,
	pub bought: String,
	pub sold: String,
	pub not_enough_funds: String,
	pub nothing_to_sell: String,
	pub sold_all: String,
	pub no_main_shop: String,
	pub players_only: String,
}

impl Default for ShopMessages {
	fn default() -> Self {
		Self {
			show_amount: "Current selected amount: {amount}".to_string(),
			buy_lore: "&aBuy value: ${amount}".to_string(),
			sell_lore: "&cSell value: ${amount}".to_string(),
			bought: "&aBought {amount} x {material} for ${money}".to_string(),
			sold: "&aSold {amount} x {material} for ${money}".to_string(),
			not_enough_funds: "&cYou need ${money} for {amount} x {material} but only have ${balance}".to_string(),
			nothing_to_sell: "You have nothing to sell".to_string(),
			sold_all: "You have sold your items for ${money}".to_string(),
			no_main_shop: "no main shop present".to_string(),
			players_only: "Only players can open the shop.".to_string(),
		}
	}
}

impl ShopMessages {
	pub fn show_amount(&self, amount: u32) -> String {
		colorize(&self.show_amount.replace("{amount}", &amount.to_string()))
	}

	pub fn buy_lore(&self, value: f64) -> String {
		colorize(&self.buy_lore.replace("{amount}", &crate::money(value)))
	}

	pub fn sell_lore(&self, value: f64) -> String {
		colorize(&self.sell_lore.replace("{amount}", &crate::money(value)))
	}

	pub fn bought(&self, amount: u32, material: &str, money: f64) -> String {
		trade(&self.bought, amount, material, money)
	}

	pub fn sold(&self, amount: u32, material: &str, money: f64) -> String {
		trade(&self.sold, amount, material, money)
	}

	pub fn not_enough_funds(&self, amount: u32, material: &str, money: f64, balance: f64) -> String {
		trade(&self.not_enough_funds, amount, material, money).replace("{balance}", &crate::money(balance))
	}

	pub fn sold_all(&self, money: f64) -> String {
		colorize(&self.sold_all.replace("{money}", &crate::money(money)))
	}
}

fn trade(template: &str, amount: u32, material: &str, money: f64) -> String {
	colorize(
		&template
			.replace("{amount}", &amount.to_string())
			.replace("{material}", material)
			.replace("{money}", &crate::money(money)),
	)
}
