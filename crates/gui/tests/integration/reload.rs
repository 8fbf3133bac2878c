use std::rc::Rc;

use pretty_assertions::assert_eq;

use tessera_gui::Host;

use crate::common::{Harness, capture_logs, write_gui};

const MENU: &str = r#"
[gui]
title = "Menu"
size = 9
[gui.elements.a]
slot = 0
material = "APPLE"
"#;

fn catalog_shape(h: &Harness) -> Vec<(String, usize, usize)> {
	h.sessions.templates().map(|t| (t.name.clone(), t.page_count(), t.pages[0].len())).collect()
}

#[test]
fn reload_without_changes_is_idempotent() {
	let mut h = Harness::new(&[("menu", MENU), ("other", MENU)]);
	let before = catalog_shape(&h);

	let first = h.reload();
	let second = h.reload();
	assert_eq!(catalog_shape(&h), before);
	assert_eq!(first.template_names().collect::<Vec<_>>(), second.template_names().collect::<Vec<_>>());
	assert!(second.errors.is_empty());
	assert_eq!(h.sessions.session_count(), 0);
}

#[test]
fn reload_closes_sessions_and_picks_up_edits() {
	let mut h = Harness::new(&[("menu", MENU)]);
	let (alex, sam) = (h.actor("alex"), h.actor("sam"));
	h.open(alex, "menu");
	h.open(sam, "menu");
	let old = h.sessions.session(alex).unwrap();

	write_gui(h.dir.path(), "menu", &MENU.replace("APPLE", "MELON"));
	h.reload();

	assert_eq!(h.sessions.session_count(), 0);
	assert_eq!(h.host.current_surface(alex), None);
	assert_eq!(h.host.current_surface(sam), None);
	assert!(old.borrow().surfaces().is_empty());
	assert_eq!(h.host.live_surfaces(), 0);

	h.open(alex, "menu");
	assert!(!Rc::ptr_eq(&h.sessions.session(alex).unwrap(), &old));
	assert_eq!(h.material_at(alex, 0).as_deref(), Some("MELON"));
}

#[test]
fn reload_drops_deleted_and_reports_broken_files() {
	let mut h = Harness::new(&[("menu", MENU), ("gone", MENU)]);
	std::fs::remove_file(h.dir.path().join("guis/core/gone.toml")).unwrap();
	write_gui(h.dir.path(), "broken", "[gui\nsize = 9");

	let report = h.reload();
	assert_eq!(report.template_names().collect::<Vec<_>>(), vec!["menu"]);
	assert_eq!(report.errors.len(), 1);
	assert!(h.sessions.template("gone").is_none());
	assert!(h.sessions.template("MENU").is_some());
}

#[test]
fn reload_logs_skipped_elements_and_broken_files() {
	let mut h = Harness::new(&[("menu", MENU)]);
	write_gui(
		h.dir.path(),
		"menu",
		"[gui]\ntitle = \"Menu\"\nsize = 9\n[gui.elements]\nloose = \"just a string\"\n[gui.elements.bad]\nslots = \"1-x\"\n",
	);
	write_gui(h.dir.path(), "broken", "[gui\nsize = 9");

	let (report, logs) = capture_logs(|| h.reload());
	assert_eq!(report.warnings.len(), 2);
	assert!(logs.contains("WARN"), "{logs}");
	assert!(logs.contains("GUI compiled with problems"), "{logs}");
	assert!(logs.contains("element 'bad' has invalid slots"), "{logs}");
	assert!(logs.contains("element 'loose' skipped"), "{logs}");
	assert!(logs.contains("GUI failed to load"), "{logs}");
	assert!(logs.contains("broken.toml"), "{logs}");
}

#[test]
fn back_references_do_not_survive_reload() {
	let mut h = Harness::new(&[
		("menu", MENU.replace("slot = 0\n", "slot = 0\naction = \"OPEN_GUI hub\"\n").as_str()),
		("hub", "[gui]\ntitle = \"Hub\"\nsize = 9\n[gui.elements.back]\nslot = 0\naction = \"BACK\"\n"),
	]);
	let alex = h.actor("alex");
	h.open(alex, "menu");
	h.click(alex, 0);
	assert_eq!(h.current(alex).as_deref(), Some("hub"));

	h.reload();
	h.open(alex, "hub");
	// The fresh singleton has no back-reference, so BACK closes.
	h.click(alex, 0);
	assert_eq!(h.current(alex), None);
}
