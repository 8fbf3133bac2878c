use pretty_assertions::assert_eq;
use tessera_gui::commands::{CommandError, Sender};
use tessera_shop::commands::{OPEN_PERMISSION, SELL_ALL_PERMISSION, SET_PRICE_PERMISSION, open_shop, sell_all, set_price};
use tessera_shop::{Economy, Inventories, LedgerEconomy, Stack};

use crate::common::{CONFIRM, Shop};

#[test]
fn console_cannot_open_the_shop() {
	let mut shop = Shop::standard();
	let result = open_shop(&mut shop.sessions, &mut shop.host, Sender::Console, &shop.shop);
	assert!(matches!(result, Err(CommandError::ActorOnly)));
	assert_eq!(shop.sessions.session_count(), 0);
}

#[test]
fn open_shop_needs_permission() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");

	let denied = open_shop(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop);
	assert!(matches!(denied, Err(CommandError::Denied(p)) if p == OPEN_PERMISSION));
	assert_eq!(shop.host.take_messages(alex), vec!["No permission.".to_string()]);

	shop.host.grant(alex, OPEN_PERMISSION);
	let opened = open_shop(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop).unwrap();
	assert!(opened.is_some());
	shop.pump();
	assert_eq!(shop.current(alex).as_deref(), Some("main"));
}

#[test]
fn open_shop_without_main_shop_explains() {
	let mut shop = Shop::new(&[("shop", CONFIRM)]);
	let alex = shop.actor("alex");
	shop.host.grant(alex, OPEN_PERMISSION);

	let opened = open_shop(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop).unwrap();
	assert!(opened.is_none());
	assert_eq!(shop.host.messages(alex).to_vec(), vec!["no main shop present".to_string()]);
}

#[test]
fn sell_all_sells_plain_priced_stacks_only() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.host.grant(alex, SELL_ALL_PERMISSION);
	shop.inventories.set_slot(alex, 0, Some(Stack::new("IRON_INGOT", 10)));
	shop.inventories.set_slot(alex, 1, Some(Stack::new("IRON_INGOT", 5).custom()));
	shop.inventories.set_slot(alex, 2, Some(Stack::new("DIRT", 3)));

	let paid = sell_all(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop).unwrap();
	assert_eq!(paid, 15.0);
	assert_eq!(shop.balance(alex), 115.0);
	let left: Vec<_> = shop.inventories.contents(alex).into_iter().take(3).collect();
	assert_eq!(left, vec![None, Some(Stack::new("IRON_INGOT", 5).custom()), Some(Stack::new("DIRT", 3))]);

	let again = sell_all(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop).unwrap();
	assert_eq!(again, 0.0);
	assert_eq!(
		shop.host.take_messages(alex),
		vec!["You have sold your items for $15.00".to_string(), "You have nothing to sell".to_string()]
	);
}

#[test]
fn sell_all_reaches_the_last_counted_slot() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.host.grant(alex, SELL_ALL_PERMISSION);
	let last = shop.shop.state().config().sell_all_slots - 1;
	shop.inventories.set_slot(alex, last, Some(Stack::new("IRON_INGOT", 2)));

	assert_eq!(sell_all(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop).unwrap(), 3.0);
	assert_eq!(shop.inventories.count(alex, "IRON_INGOT"), 0);
}

#[test]
fn set_price_is_gated_for_actors() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");

	let denied = set_price(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop, "DIRT", 1.0);
	assert!(matches!(denied, Err(CommandError::Denied(p)) if p == SET_PRICE_PERMISSION));
	assert_eq!(shop.shop.state().price("DIRT"), None);

	shop.host.grant(alex, SET_PRICE_PERMISSION);
	set_price(&mut shop.sessions, &mut shop.host, Sender::Actor(alex), &shop.shop, "dirt", 1.0).unwrap();
	assert_eq!(shop.shop.state().price("DIRT"), Some(1.0));
}

#[test]
fn balances_survive_save_and_load() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "main");
	shop.click(alex, 0);
	shop.click(alex, 8);
	assert_eq!(shop.balance(alex), 96.0);

	assert!(shop.sessions.save_all().is_empty());
	let ledger = LedgerEconomy::new(shop.sessions.settings().data_file("shop"), 0.0);
	ledger.load().unwrap();
	assert_eq!(ledger.balance(alex), 96.0);
	assert_eq!(ledger.accounts(), vec![alex.to_string()]);
	assert_eq!(ledger.balance(shop.actor("blake")), 0.0);
}
