//! The shop's [`GuiDomain`] and the state its elements share.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tessera_gui::{Behavior, BehaviorSeed, Element, ElementKind, ElementSpec, GuiDomain, Host, Layout, Settings, Sharing, StoreError, Template};
use tessera_primitives::{ActorId, colorize};
use tracing::{debug, warn};

use crate::config::{ShopConfig, ShopMessages};
use crate::economy::{Economy, LedgerEconomy};
use crate::inventory::Inventories;
use crate::price_list::PriceList;
use crate::transaction::Transaction;
use crate::{GENERIC_CONFIRMATION, MAIN_SHOP, PRICE_LIST, elements};

/// Prices, the main shop and the services every shop element talks to.
pub struct ShopState {
	config: ShopConfig,
	economy: Rc<dyn Economy>,
	inventories: Rc<dyn Inventories>,
	/// Sell price per material, rebuilt from the resources on every load.
	prices: RefCell<BTreeMap<String, f64>>,
	main_shop: RefCell<Option<String>>,
}

impl ShopState {
	pub fn config(&self) -> &ShopConfig {
		&self.config
	}

	pub fn messages(&self) -> &ShopMessages {
		&self.config.messages
	}

	pub fn economy(&self) -> &dyn Economy {
		self.economy.as_ref()
	}

	pub fn inventories(&self) -> &dyn Inventories {
		self.inventories.as_ref()
	}

	pub fn price(&self, material: &str) -> Option<f64> {
		self.prices.borrow().get(material).copied()
	}

	/// Every priced material, sorted by material.
	pub fn prices(&self) -> Vec<(String, f64)> {
		self.prices.borrow().iter().map(|(m, p)| (m.clone(), *p)).collect()
	}

	/// Sets a sell price; a non-positive value unlists the material. Returns the previous price.
	pub fn set_price(&self, material: &str, value: f64) -> Option<f64> {
		let material = material.trim().to_ascii_uppercase();
		let mut prices = self.prices.borrow_mut();
		if value > 0.0 {
			prices.insert(material, value)
		} else {
			prices.remove(&material)
		}
	}

	/// Name of the template whose special type is `MAIN_SHOP`.
	pub fn main_shop(&self) -> Option<String> {
		self.main_shop.borrow().clone()
	}

	/// Sells every plain, priced stack in the actor's leading inventory slots.
	///
	/// Returns the money paid out, `0.0` when nothing was sold.
	pub fn sell_all(&self, host: &mut dyn Host, actor: ActorId) -> f64 {
		let mut total = 0.0;
		let contents = self.inventories.contents(actor);
		for (slot, stack) in contents.into_iter().enumerate().take(self.config.sell_all_slots) {
			let Some(stack) = stack.filter(|s| s.plain) else {
				continue;
			};
			let Some(price) = self.price(&stack.material).filter(|p| *p >= 0.001) else {
				continue;
			};
			total += price * f64::from(stack.amount);
			self.inventories.set_slot(actor, slot, None);
		}

		if total < 0.001 {
			host.send(actor, &colorize(&self.messages().nothing_to_sell));
			return 0.0;
		}
		if let Err(e) = self.economy.deposit(actor, total) {
			warn!(actor = %actor, error = %e, "sell-all deposit failed");
		}
		host.send(actor, &self.messages().sold_all(total));
		total
	}
}

impl std::fmt::Debug for ShopState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ShopState")
			.field("prices", &self.prices.borrow().len())
			.field("main_shop", &self.main_shop.borrow())
			.finish_non_exhaustive()
	}
}

/// The shop domain. Loads `<gui_dir>/shop`.
#[derive(Debug, Clone)]
pub struct ShopDomain {
	state: Rc<ShopState>,
}

impl ShopDomain {
	pub const NAME: &'static str = "shop";

	pub fn new(config: ShopConfig, economy: Rc<dyn Economy>, inventories: Rc<dyn Inventories>) -> Self {
		Self {
			state: Rc::new(ShopState {
				config,
				economy,
				inventories,
				prices: RefCell::new(BTreeMap::new()),
				main_shop: RefCell::new(None),
			}),
		}
	}

	/// A shop whose balances live in the domain's data file.
	pub fn with_ledger(settings: &Settings, config: ShopConfig, inventories: Rc<dyn Inventories>) -> Self {
		let ledger = LedgerEconomy::new(settings.data_file(Self::NAME), config.starting_balance);
		Self::new(config, Rc::new(ledger), inventories)
	}

	pub fn state(&self) -> &Rc<ShopState> {
		&self.state
	}
}

impl GuiDomain for ShopDomain {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn element_kinds(&self) -> Vec<ElementKind> {
		elements::kinds(&self.state)
	}

	fn on_reload(&self) {
		self.state.prices.borrow_mut().clear();
		self.state.main_shop.borrow_mut().take();
	}

	fn enhance_element(&self, _special_type: Option<&str>, spec: &ElementSpec, element: Rc<dyn Element>) -> Rc<dyn Element> {
		let Some(item) = &spec.item else {
			return element;
		};
		let sell = spec.attributes.float_or("sell_value", 0.0);
		if sell > 0.0 {
			debug!(material = %item.material, sell, "price recorded");
			self.state.prices.borrow_mut().insert(item.material.clone(), sell);
		}
		element
	}

	fn specify_template(&self, template: &mut Template) {
		match template.kind.as_deref() {
			Some(GENERIC_CONFIRMATION) => {
				let state = self.state.clone();
				template.sharing = Sharing::PerViewer;
				template.behavior = Some(Rc::new(move |seed: &BehaviorSeed<'_>| Box::new(Transaction::from_args(state.clone(), seed.args)) as Box<dyn Behavior>));
			}
			Some(PRICE_LIST) => {
				let state = self.state.clone();
				template.sharing = Sharing::PerViewer;
				template.layout = Layout::DynamicOverflow;
				template.behavior = Some(Rc::new(move |seed: &BehaviorSeed<'_>| Box::new(PriceList::new(state.clone(), seed.viewer)) as Box<dyn Behavior>));
			}
			Some(MAIN_SHOP) => {
				*self.state.main_shop.borrow_mut() = Some(template.name.clone());
			}
			_ => {}
		}
	}

	fn load_information(&self) -> Result<(), StoreError> {
		self.state.economy.load()
	}

	fn save_information(&self) -> Result<(), StoreError> {
		self.state.economy.save()
	}
}
