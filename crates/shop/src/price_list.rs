//! The `PRICE_LIST` listing.

use std::any::Any;
use std::rc::Rc;

use tessera_gui::element::builtins::Label;
use tessera_gui::{Behavior, Element, ElementBase};
use tessera_primitives::{ActorId, Args, ItemView, Placeholders};

use crate::domain::ShopState;

/// Replaced by the viewer's balance anywhere on a price list.
pub const BALANCE: &str = "{balance}";

/// Pages one label per priced material through the skeleton's free slots.
pub struct PriceList {
	state: Rc<ShopState>,
	viewer: Option<ActorId>,
}

impl PriceList {
	pub fn new(state: Rc<ShopState>, viewer: Option<ActorId>) -> Self {
		Self { state, viewer }
	}
}

impl Behavior for PriceList {
	fn placeholders(&self, _args: &Args) -> Placeholders {
		let balance = self.viewer.map(|v| self.state.economy().balance(v)).unwrap_or_default();
		Placeholders::new().with(BALANCE, crate::money(balance))
	}

	fn overflow_items(&mut self, _args: &Args) -> Vec<Rc<dyn Element>> {
		let messages = self.state.messages();
		self.state
			.prices()
			.into_iter()
			.map(|(material, price)| {
				let item = ItemView::new(material.clone()).named(material).with_lore(vec![messages.sell_lore(price)]);
				Rc::new(Label::new(ElementBase::new(Some(item)))) as Rc<dyn Element>
			})
			.collect()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
