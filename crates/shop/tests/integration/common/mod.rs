//! Common utilities for shop integration tests.

use std::path::Path;
use std::rc::Rc;

use tempfile::TempDir;
use tessera_gui::{ClickKind, Disposition, LoadReport, MemoryHost, SessionManager, Settings, dispatch};
use tessera_primitives::ActorId;
use tessera_shop::{Economy, MemoryInventories, ShopConfig, ShopDomain};

pub const MAIN: &str = r#"
[gui]
title = "&2Shop"
size = 9
specialType = "main_shop"

[gui.elements.iron]
slot = 0
action = "GENERIC_SHOP_INTENT"
material = "IRON_INGOT"
name = "&fIron"
lore = ["{genericShopBuyLore}", "{genericShopSellLore}"]
buy_value = 4.0
sell_value = 1.5
max_buy = 64
max_sell = 64

[gui.elements.gold]
slot = 1
action = "GENERIC_SHOP_INTENT"
material = "GOLD_INGOT"
lore = ["{genericShopBuyLore}", "{genericShopSellLore}"]
buy_value = 10.0
max_buy = 16

[gui.elements.prices]
slot = 8
action = "OPEN_GUI prices"
material = "BOOK"
"#;

pub const CONFIRM: &str = r#"
[gui]
title = "Confirm"
size = 9
specialType = "generic_confirmation"

[gui.elements.cancel]
slot = 0
action = "BACK"
material = "BARRIER"

[gui.elements.frame]
slots = "1,7"
action = "FILLER"
material = "BLACK_STAINED_GLASS_PANE"

[gui.elements.less]
slot = 3
action = "GENERIC_SHOP_CHANGE_AMOUNT REMOVE 1"
material = "RED_DYE"

[gui.elements.display]
slot = 4
action = "REPLACEABLE"
material = "PAPER"
lore = ["{genericShopDisplayItemShowAmount}", "{valueLore}"]

[gui.elements.more]
slot = 5
action = "GENERIC_SHOP_CHANGE_AMOUNT ADD 8"
material = "LIME_DYE"

[gui.elements.confirm]
slot = 8
action = "GENERIC_SHOP_CONFIRM_TRANSACTION"
material = "EMERALD"
"#;

pub const PRICES: &str = r#"
[gui]
title = "Prices"
size = 9
specialType = "price_list"

[gui.elements.balance]
slot = 0
material = "GOLD_NUGGET"
name = "Balance: ${balance}"

[gui.elements.prev]
slot = 7
action = "MOVE_PAGE back"
material = "ARROW"

[gui.elements.next]
slot = 8
action = "MOVE_PAGE forward"
material = "ARROW"
"#;

/// Writes `guis/shop/<name>.toml` under `root`.
pub fn write_gui(root: &Path, name: &str, src: &str) {
	let dir = root.join("guis").join(ShopDomain::NAME);
	std::fs::create_dir_all(&dir).expect("failed to create gui dir");
	std::fs::write(dir.join(format!("{name}.toml")), src).expect("failed to write gui");
}

/// A loaded shop over a temporary tree, with actors starting at 100.
pub struct Shop {
	pub dir: TempDir,
	pub host: MemoryHost,
	pub sessions: SessionManager,
	pub shop: ShopDomain,
	pub inventories: Rc<MemoryInventories>,
}

impl Shop {
	/// The main listing, the confirmation screen (named after the default screen) and the price list.
	pub fn standard() -> Self {
		Self::new(&[("main", MAIN), ("shop", CONFIRM), ("prices", PRICES)])
	}

	pub fn new(guis: &[(&str, &str)]) -> Self {
		let _ = tracing_subscriber::fmt::try_init();
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		for (name, src) in guis {
			write_gui(dir.path(), name, src);
		}
		let settings = Settings::rooted(dir.path());
		let inventories = Rc::new(MemoryInventories::default());
		let config = ShopConfig {
			starting_balance: 100.0,
			..Default::default()
		};
		let shop = ShopDomain::with_ledger(&settings, config, inventories.clone());
		let mut sessions = SessionManager::builder().settings(settings).domain(Rc::new(shop.clone())).build();
		let report = sessions.load();
		assert!(report.errors.is_empty(), "load errors: {:?}", report.errors);
		Self {
			dir,
			host: MemoryHost::new(),
			sessions,
			shop,
			inventories,
		}
	}

	pub fn actor(&mut self, name: &str) -> ActorId {
		self.host.add_actor(name)
	}

	pub fn open(&mut self, actor: ActorId, name: &str) {
		self.sessions.open_gui(&mut self.host, actor, name, None, None).expect("open failed");
		self.pump();
	}

	pub fn click(&mut self, actor: ActorId, slot: usize) -> Disposition {
		self.click_kind(actor, slot, ClickKind::Left)
	}

	pub fn click_kind(&mut self, actor: ActorId, slot: usize, kind: ClickKind) -> Disposition {
		let event = self.host.click(actor, slot, kind).expect("actor has no view");
		let disposition = dispatch(&mut self.sessions, &mut self.host, event);
		self.pump();
		disposition
	}

	pub fn pump(&mut self) {
		loop {
			let events = self.host.drain_events();
			if events.is_empty() {
				break;
			}
			for event in events {
				dispatch(&mut self.sessions, &mut self.host, event);
			}
		}
	}

	pub fn reload(&mut self) -> LoadReport {
		let report = self.sessions.reload(&mut self.host);
		self.pump();
		report
	}

	pub fn current(&self, actor: ActorId) -> Option<String> {
		self.sessions.session(actor).map(|i| i.borrow().template().name.clone())
	}

	pub fn balance(&self, actor: ActorId) -> f64 {
		self.shop.state().economy().balance(actor)
	}

	pub fn lore_at(&self, actor: ActorId, slot: usize) -> Vec<String> {
		self.host.slot_of_view(actor, slot).map(|i| i.lore.clone()).unwrap_or_default()
	}
}
