use pretty_assertions::assert_eq;
use tessera_gui::ClickKind;
use tessera_shop::{Inventories, Stack};

use crate::common::Shop;

#[test]
fn listing_lore_shows_only_tradeable_sides() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "main");

	assert_eq!(shop.lore_at(alex, 0), vec!["\u{a7}aBuy value: $4.00".to_string(), "\u{a7}cSell value: $1.50".to_string()]);
	assert_eq!(shop.lore_at(alex, 1), vec!["\u{a7}aBuy value: $10.00".to_string()]);
}

#[test]
fn buying_opens_a_transaction_and_settles_on_confirm() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "main");

	shop.click(alex, 0);
	assert_eq!(shop.current(alex).as_deref(), Some("shop"));
	let display = shop.host.slot_of_view(alex, 4).cloned().unwrap();
	assert_eq!(display.material, "IRON_INGOT");
	assert_eq!(display.name.as_deref(), Some("\u{a7}fIron"));
	assert_eq!(display.lore, vec!["Current selected amount: 1".to_string(), "\u{a7}aBuy value: $4.00".to_string()]);
	assert_eq!(shop.host.slot_of_view(alex, 1).unwrap().material, "GREEN_STAINED_GLASS_PANE");
	// Nothing left to remove at amount 1.
	assert_eq!(shop.host.slot_of_view(alex, 3).unwrap().material, "GREEN_STAINED_GLASS_PANE");

	shop.click(alex, 5);
	let display = shop.host.slot_of_view(alex, 4).cloned().unwrap();
	assert_eq!(display.amount, 9);
	assert_eq!(display.lore[1], "\u{a7}aBuy value: $36.00");
	assert_eq!(shop.host.slot_of_view(alex, 3).unwrap().material, "RED_DYE");

	shop.click(alex, 8);
	assert_eq!(shop.current(alex).as_deref(), Some("main"));
	assert_eq!(shop.balance(alex), 64.0);
	assert_eq!(shop.inventories.count(alex, "IRON_INGOT"), 9);
	assert_eq!(shop.host.messages(alex).last().map(String::as_str), Some("\u{a7}aBought 9 x IRON_INGOT for $36.00"));
}

#[test]
fn selling_pays_for_what_the_actor_actually_has() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.inventories.give(alex, "IRON_INGOT", 20);
	shop.open(alex, "main");

	shop.click_kind(alex, 0, ClickKind::Right);
	assert_eq!(shop.current(alex).as_deref(), Some("shop"));
	assert_eq!(shop.host.slot_of_view(alex, 1).unwrap().material, "RED_STAINED_GLASS_PANE");
	for _ in 0..3 {
		shop.click(alex, 5);
	}
	assert_eq!(shop.host.slot_of_view(alex, 4).unwrap().amount, 25);

	shop.click(alex, 8);
	assert_eq!(shop.balance(alex), 130.0);
	assert_eq!(shop.inventories.count(alex, "IRON_INGOT"), 0);
	assert_eq!(shop.host.messages(alex).last().map(String::as_str), Some("\u{a7}aSold 20 x IRON_INGOT for $30.00"));
}

#[test]
fn selling_without_stock_changes_nothing() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.inventories.set_slot(alex, 0, Some(Stack::new("IRON_INGOT", 5).custom()));
	shop.open(alex, "main");

	shop.click_kind(alex, 0, ClickKind::ShiftRight);
	shop.click(alex, 8);
	assert_eq!(shop.balance(alex), 100.0);
	assert_eq!(shop.inventories.count(alex, "IRON_INGOT"), 5);
	assert_eq!(shop.host.messages(alex).last().map(String::as_str), Some("You have nothing to sell"));
}

#[test]
fn purchase_beyond_balance_is_refused() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "main");

	shop.click(alex, 1);
	shop.click(alex, 5);
	shop.click(alex, 5);
	assert_eq!(shop.host.slot_of_view(alex, 4).unwrap().amount, 16);
	shop.click(alex, 8);

	assert_eq!(shop.current(alex).as_deref(), Some("main"));
	assert_eq!(shop.balance(alex), 100.0);
	assert_eq!(shop.inventories.count(alex, "GOLD_INGOT"), 0);
	assert_eq!(
		shop.host.messages(alex).last().map(String::as_str),
		Some("\u{a7}cYou need $160.00 for 16 x GOLD_INGOT but only have $100.00")
	);
}

#[test]
fn untradeable_side_and_other_clicks_stay_on_the_listing() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "main");

	shop.click_kind(alex, 1, ClickKind::Right);
	assert_eq!(shop.current(alex).as_deref(), Some("main"));
	shop.click_kind(alex, 0, ClickKind::Middle);
	assert_eq!(shop.current(alex).as_deref(), Some("main"));
	assert!(shop.host.messages(alex).is_empty());
}

#[test]
fn cancel_returns_without_trading() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	shop.open(alex, "main");

	shop.click(alex, 0);
	shop.click(alex, 0);
	assert_eq!(shop.current(alex).as_deref(), Some("main"));
	assert_eq!(shop.balance(alex), 100.0);
	assert_eq!(shop.inventories.count(alex, "IRON_INGOT"), 0);
}

#[test]
fn each_viewer_has_its_own_transaction() {
	let mut shop = Shop::standard();
	let alex = shop.actor("alex");
	let blake = shop.actor("blake");
	shop.open(alex, "main");
	shop.open(blake, "main");

	shop.click(alex, 0);
	shop.click(blake, 0);
	shop.click(alex, 5);

	assert_eq!(shop.host.slot_of_view(alex, 4).unwrap().amount, 9);
	assert_eq!(shop.host.slot_of_view(blake, 4).unwrap().amount, 1);
	assert_eq!(shop.host.live_surfaces(), 3);
}
