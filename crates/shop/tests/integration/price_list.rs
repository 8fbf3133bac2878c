use pretty_assertions::assert_eq;
use tessera_gui::commands::Sender;
use tessera_gui::{Host, MemoryHost};
use tessera_primitives::ActorId;
use tessera_shop::commands::{sell_all, set_price};
use tessera_shop::{Inventories, PRICE_LIST};

use crate::common::Shop;

fn materials_on_view(host: &MemoryHost, actor: ActorId) -> Vec<String> {
	(1..7).filter_map(|slot| host.slot_of_view(actor, slot)).map(|i| i.material.clone()).collect()
}

fn balance_line(host: &MemoryHost, actor: ActorId) -> Option<String> {
	host.slot_of_view(actor, 0)?.name.clone()
}

#[test]
fn prices_come_from_the_listings() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "prices");

	assert!(shop.sessions.template("prices").unwrap().is_kind(PRICE_LIST));
	assert_eq!(shop.shop.state().prices(), vec![("IRON_INGOT".to_string(), 1.5)]);
	assert_eq!(balance_line(&shop.host, alex).as_deref(), Some("Balance: $100.00"));
	assert_eq!(materials_on_view(&shop.host, alex), vec!["IRON_INGOT"]);
	assert_eq!(shop.lore_at(alex, 1), vec!["\u{a7}cSell value: $1.50".to_string()]);
}

#[test]
fn set_price_refreshes_open_lists() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "prices");

	let refreshed = set_price(&mut shop.sessions, &mut shop.host, Sender::Console, &shop.shop, "gold_ingot", 3.0).unwrap();
	assert_eq!(refreshed, 1);
	assert_eq!(materials_on_view(&shop.host, alex), vec!["GOLD_INGOT", "IRON_INGOT"]);

	set_price(&mut shop.sessions, &mut shop.host, Sender::Console, &shop.shop, "IRON_INGOT", 0.0).unwrap();
	assert_eq!(materials_on_view(&shop.host, alex), vec!["GOLD_INGOT"]);
}

#[test]
fn long_lists_page_through_the_free_slots() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	for material in ["APPLE", "BREAD", "COAL", "DIAMOND", "EMERALD", "FLINT", "GLASS"] {
		shop.shop.state().set_price(material, 1.0);
	}
	shop.open(alex, "prices");

	assert_eq!(shop.sessions.session(alex).unwrap().borrow().page_count(), 2);
	assert_eq!(materials_on_view(&shop.host, alex), vec!["APPLE", "BREAD", "COAL", "DIAMOND", "EMERALD", "FLINT"]);
	shop.click(alex, 8);
	assert_eq!(materials_on_view(&shop.host, alex), vec!["GLASS", "IRON_INGOT"]);
	assert_eq!(balance_line(&shop.host, alex).as_deref(), Some("Balance: $100.00"));
}

#[test]
fn balance_follows_sales() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.host.grant(alex, tessera_shop::commands::SELL_ALL_PERMISSION);
	shop.inventories.give(alex, "IRON_INGOT", 10);
	shop.open(alex, "prices");

	let paid = sell_all(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop).unwrap();
	assert_eq!(paid, 15.0);
	assert_eq!(balance_line(&shop.host, alex).as_deref(), Some("Balance: $115.00"));
}

#[test]
fn every_viewer_sees_their_own_balance() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	let blake = shop.actor("blake");
	shop.inventories.give(blake, "IRON_INGOT", 2);
	shop.host.grant(blake, tessera_shop::commands::SELL_ALL_PERMISSION);
	shop.open(alex, "prices");
	shop.open(blake, "prices");

	sell_all(&mut shop.sessions, &mut shop.host, Sender::Actor(blake), &shop.shop).unwrap();
	assert_eq!(balance_line(&shop.host, alex).as_deref(), Some("Balance: $100.00"));
	assert_eq!(balance_line(&shop.host, blake).as_deref(), Some("Balance: $103.00"));
	assert_ne!(shop.host.current_surface(alex), shop.host.current_surface(blake));
}

#[test]
fn reload_rebuilds_prices_from_disk() {
	let mut shop = Shop::standard();
	shop.shop.state().set_price("DIAMOND", 50.0);
	assert_eq!(shop.shop.state().prices().len(), 2);

	let report = shop.reload();
	assert!(report.errors.is_empty(), "{:?}", report.errors);
	assert_eq!(shop.shop.state().prices(), vec![("IRON_INGOT".to_string(), 1.5)]);
	assert_eq!(shop.shop.state().main_shop().as_deref(), Some("main"));
}
