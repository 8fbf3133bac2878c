//! State of one buy/sell screen.

use std::any::Any;
use std::rc::Rc;

use tessera_gui::element::builtins::{Filler, Replaceable};
use tessera_gui::{Behavior, Element};
use tessera_primitives::{Args, ItemView, Placeholders, colorize};

use crate::domain::ShopState;
use crate::elements::ChangeAmount;

pub const SHOW_AMOUNT: &str = "{genericShopDisplayItemShowAmount}";
pub const VALUE_LORE: &str = "{valueLore}";

/// Filler material repainted in the transaction colour.
const ACCENT_FILLER: &str = "BLACK_STAINED_GLASS_PANE";
const BUY_PANE: &str = "GREEN_STAINED_GLASS_PANE";
const SELL_PANE: &str = "RED_STAINED_GLASS_PANE";

/// Behaviour of `GENERIC_CONFIRMATION` instances.
///
/// Seeded from the arguments a listing button opens the screen with. The
/// selected amount stays within `1..=max` (the maximum being the buy or sell
/// limit), except that it never drops below 1 even when the limit does.
pub struct Transaction {
	state: Rc<ShopState>,
	buying: bool,
	material: String,
	item_name: String,
	buy_value: f64,
	sell_value: f64,
	max_buy: i64,
	max_sell: i64,
	amount: i64,
}

impl Transaction {
	pub fn from_args(state: Rc<ShopState>, args: &Args) -> Self {
		let material = args.text_or("material", "GLASS").to_string();
		Self {
			buying: args.bool_or("buying", false),
			item_name: args.text("item_name").map(colorize).unwrap_or_else(|| material.clone()),
			material,
			buy_value: args.float_or("buy_value", 0.0),
			sell_value: args.float_or("sell_value", 0.0),
			max_buy: args.int_or("max_buy", 0),
			max_sell: args.int_or("max_sell", 0),
			amount: 1,
			state,
		}
	}

	pub fn is_buying(&self) -> bool {
		self.buying
	}

	pub fn material(&self) -> &str {
		&self.material
	}

	pub fn amount(&self) -> u32 {
		u32::try_from(self.amount).unwrap_or(1)
	}

	/// Unit price of the side being traded.
	pub fn value(&self) -> f64 {
		if self.buying { self.buy_value } else { self.sell_value }
	}

	pub fn limit(&self) -> i64 {
		if self.buying { self.max_buy } else { self.max_sell }
	}

	pub fn change_amount(&mut self, by: i64, add: bool) {
		let next = if add { self.amount + by } else { self.amount - by };
		self.amount = next.min(self.limit()).max(1);
	}

	/// Whether pressing `button` could no longer change the amount.
	pub fn exhausts(&self, button: &ChangeAmount) -> bool {
		if button.is_add() {
			self.amount + button.value() > self.limit()
		} else {
			button.value() >= self.amount
		}
	}

	fn total(&self) -> f64 {
		self.value() * self.amount as f64
	}

	fn accent(&self) -> ItemView {
		ItemView::new(if self.buying { BUY_PANE } else { SELL_PANE })
	}

	fn display_item(&self, lore: &[String]) -> ItemView {
		ItemView::new(self.material.clone())
			.named(self.item_name.clone())
			.with_lore(lore.to_vec())
			.with_amount(self.amount())
			.replaced(&self.replacements())
	}

	fn replacements(&self) -> Placeholders {
		let messages = self.state.messages();
		let value_lore = if self.buying {
			messages.buy_lore(self.total())
		} else {
			messages.sell_lore(self.total())
		};
		Placeholders::new()
			.with(SHOW_AMOUNT, messages.show_amount(self.amount()))
			.with(VALUE_LORE, value_lore)
	}
}

impl Behavior for Transaction {
	fn placeholders(&self, _args: &Args) -> Placeholders {
		self.replacements()
	}

	fn augment_click_args(&self, args: &mut Args) {
		args.insert("amount", self.amount);
		args.insert("value", self.value());
	}

	fn decorate(&self, page: usize, _slot: usize, element: &dyn Element, rendered: Option<ItemView>) -> Option<ItemView> {
		if page != 0 {
			return rendered;
		}
		let any = element.as_any();
		if let Some(replaceable) = any.downcast_ref::<Replaceable>() {
			return Some(self.display_item(replaceable.lore()));
		}
		if let Some(button) = any.downcast_ref::<ChangeAmount>() {
			return if self.exhausts(button) { Some(self.accent()) } else { rendered };
		}
		if any.downcast_ref::<Filler>().is_some() && rendered.as_ref().is_some_and(|i| i.material == ACCENT_FILLER) {
			return rendered.map(|item| ItemView {
				material: self.accent().material,
				..item
			});
		}
		rendered
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

impl std::fmt::Debug for Transaction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Transaction")
			.field("buying", &self.buying)
			.field("material", &self.material)
			.field("amount", &self.amount)
			.field("limit", &self.limit())
			.finish_non_exhaustive()
	}
}
