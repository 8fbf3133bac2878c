//! Shop element kinds.

use std::any::Any;
use std::rc::Rc;

use tessera_gui::{ClickContext, ClickEffects, ClickKind, Effect, Element, ElementBase, ElementError, ElementInput, ElementKind};
use tessera_primitives::{Args, Placeholders, colorize};
use tracing::{debug, info, warn};

use crate::PRICE_LIST;
use crate::domain::ShopState;
use crate::economy::EconomyError;
use crate::inventory;
use crate::transaction::Transaction;

pub const GENERIC_SHOP_INTENT: &str = "GENERIC_SHOP_INTENT";
pub const GENERIC_SHOP_CHANGE_AMOUNT: &str = "GENERIC_SHOP_CHANGE_AMOUNT";
pub const GENERIC_SHOP_CONFIRM_TRANSACTION: &str = "GENERIC_SHOP_CONFIRM_TRANSACTION";

/// Lore line replaced by the buy price, or dropped when the item cannot be bought.
pub const BUY_LORE: &str = "{genericShopBuyLore}";
/// Lore line replaced by the sell price, or dropped when the item cannot be sold.
pub const SELL_LORE: &str = "{genericShopSellLore}";

/// Element kinds the shop domain registers, bound to its state.
pub fn kinds(state: &Rc<ShopState>) -> Vec<ElementKind> {
	let intent = state.clone();
	let confirm = state.clone();
	vec![
		ElementKind::new(GENERIC_SHOP_INTENT, move |input: &ElementInput<'_>| ShopIntent::build(&intent, input)),
		ElementKind::new(GENERIC_SHOP_CHANGE_AMOUNT, ChangeAmount::build),
		ElementKind::new(GENERIC_SHOP_CONFIRM_TRANSACTION, move |input: &ElementInput<'_>| {
			Ok(Rc::new(ConfirmTransaction {
				base: ElementBase::from_input(input),
				state: confirm.clone(),
			}) as Rc<dyn Element>)
		}),
	]
}

/// `GENERIC_SHOP_INTENT [screen]`: a listing. Left click buys, right click sells.
///
/// Prices and limits come from the entry's `buy_value`, `sell_value`,
/// `max_buy` and `max_sell` attributes.
#[derive(Debug, Clone)]
pub struct ShopIntent {
	base: ElementBase,
	screen: String,
	buy_value: f64,
	sell_value: f64,
	max_buy: i64,
	max_sell: i64,
}

impl ShopIntent {
	fn build(state: &ShopState, input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		let attributes = input.attributes;
		let buy_value = attributes.float_or("buy_value", 0.0);
		let sell_value = attributes.float_or("sell_value", 0.0);

		let mut base = ElementBase::from_input(input);
		if let Some(item) = input.item {
			let mut item = item.clone();
			if buy_value <= 0.0 {
				item.lore.retain(|line| line != BUY_LORE);
			}
			if sell_value <= 0.0 {
				item.lore.retain(|line| line != SELL_LORE);
			}
			let messages = state.messages();
			let replacements = Placeholders::new()
				.with(BUY_LORE, if buy_value > 0.0 { messages.buy_lore(buy_value) } else { String::new() })
				.with(SELL_LORE, if sell_value > 0.0 { messages.sell_lore(sell_value) } else { String::new() });
			base.set_item(Some(item.replaced(&replacements)));
		}

		Ok(Rc::new(Self {
			base,
			screen: input.args.first().cloned().unwrap_or_else(|| state.config().default_screen.clone()),
			buy_value,
			sell_value,
			max_buy: attributes.int_or("max_buy", 0),
			max_sell: attributes.int_or("max_sell", 0),
		}))
	}

	pub fn screen(&self) -> &str {
		&self.screen
	}

	pub fn buy_value(&self) -> f64 {
		self.buy_value
	}

	pub fn sell_value(&self) -> f64 {
		self.sell_value
	}
}

impl Element for ShopIntent {
	fn kind(&self) -> &str {
		GENERIC_SHOP_INTENT
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		let Some(item) = self.base.item() else {
			return ClickEffects::ok();
		};
		if self.screen.trim().is_empty() {
			return ClickEffects::ok();
		}
		let buying = match cx.kind {
			kind if kind.is_left() => true,
			ClickKind::Right | ClickKind::ShiftRight => false,
			_ => return ClickEffects::ok(),
		};
		let (value, limit) = if buying { (self.buy_value, self.max_buy) } else { (self.sell_value, self.max_sell) };
		if value <= 0.0 || limit <= 0 {
			return ClickEffects::ok();
		}

		let args = Args::new()
			.with("buy_value", self.buy_value)
			.with("sell_value", self.sell_value)
			.with("max_buy", self.max_buy)
			.with("max_sell", self.max_sell)
			.with("material", item.material.clone())
			.with("item_name", item.name.clone().unwrap_or_else(|| item.material.clone()))
			.with("buying", buying)
			.with("item_lore", item.lore.clone());
		ClickEffects::open_named(self.screen.clone(), Some(cx.current()), Some(args))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// `GENERIC_SHOP_CHANGE_AMOUNT ADD|REMOVE <n>` on a transaction screen.
#[derive(Debug, Clone)]
pub struct ChangeAmount {
	base: ElementBase,
	add: bool,
	value: i64,
}

impl ChangeAmount {
	pub(crate) fn build(input: &ElementInput<'_>) -> Result<Rc<dyn Element>, ElementError> {
		Ok(Rc::new(Self {
			base: ElementBase::from_input(input),
			add: input.args.first().is_some_and(|a| a.eq_ignore_ascii_case("ADD")),
			value: input.args.get(1).and_then(|v| v.trim().parse().ok()).unwrap_or(0),
		}))
	}

	pub fn is_add(&self) -> bool {
		self.add
	}

	pub fn value(&self) -> i64 {
		self.value
	}
}

impl Element for ChangeAmount {
	fn kind(&self) -> &str {
		GENERIC_SHOP_CHANGE_AMOUNT
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		if self.value == 0 {
			return ClickEffects::ok();
		}
		let Some(transaction) = cx.instance.behavior_mut::<Transaction>() else {
			return ClickEffects::ok();
		};
		transaction.change_amount(self.value, self.add);
		cx.instance.refresh(cx.host);
		ClickEffects::ok()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// `GENERIC_SHOP_CONFIRM_TRANSACTION`: returns to the listing and settles the trade.
#[derive(Debug)]
pub struct ConfirmTransaction {
	base: ElementBase,
	state: Rc<ShopState>,
}

impl ConfirmTransaction {
	fn buy(&self, cx: &ClickContext<'_>, material: &str, amount: u32, value: f64) -> Option<String> {
		let messages = self.state.messages();
		let money = value * f64::from(amount);
		match self.state.economy().withdraw(cx.actor, money) {
			Ok(_) => {}
			Err(EconomyError::InsufficientFunds { balance, .. }) => return Some(messages.not_enough_funds(amount, material, money, balance)),
			Err(e) => {
				warn!(actor = %cx.actor, error = %e, "purchase rejected");
				return None;
			}
		}
		let overflow = self.state.inventories().give(cx.actor, material, amount);
		if overflow > 0 {
			debug!(actor = %cx.actor, material, overflow, "inventory full, surplus dropped");
		}
		info!(actor = %cx.actor, material, amount, money, "bought");
		Some(messages.bought(amount, material, money))
	}

	fn sell(&self, cx: &ClickContext<'_>, material: &str, amount: u32, value: f64) -> Option<String> {
		let messages = self.state.messages();
		let sold = inventory::take(self.state.inventories(), cx.actor, material, amount);
		if sold == 0 {
			return Some(colorize(&messages.nothing_to_sell));
		}
		let money = value * f64::from(sold);
		if let Err(e) = self.state.economy().deposit(cx.actor, money) {
			warn!(actor = %cx.actor, error = %e, "sale payout failed");
			return None;
		}
		info!(actor = %cx.actor, material, amount = sold, money, "sold");
		Some(messages.sold(sold, material, money))
	}
}

impl Element for ConfirmTransaction {
	fn kind(&self) -> &str {
		GENERIC_SHOP_CONFIRM_TRANSACTION
	}

	fn base(&self) -> &ElementBase {
		&self.base
	}

	fn on_click(&self, cx: &mut ClickContext<'_>) -> ClickEffects {
		let buying = cx.instance.args().bool_or("buying", false);
		let material = cx.instance.args().text_or("material", "DIRT").to_string();
		let amount = u32::try_from(cx.args.int_or("amount", 0)).unwrap_or(0);
		let value = cx.args.float_or("value", 0.0);

		let mut effects = ClickEffects::new();
		if let Some(back) = cx.instance.back().cloned() {
			effects.push(Effect::Open {
				target: back,
				back: None,
				args: None,
			});
		}
		if amount == 0 || value <= 0.0 {
			return effects;
		}

		let reply = if buying {
			self.buy(cx, &material, amount, value)
		} else {
			self.sell(cx, &material, amount, value)
		};
		if let Some(reply) = reply {
			effects.push(Effect::Message(reply));
		}
		effects.with(Effect::RefreshKinds(vec![PRICE_LIST.to_string()]))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
