//! The loaded resource tree and the in-memory host it runs against.

use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use tessera_gui::{BasicDomain, Host, LoadReport, MemoryHost, SessionManager, Settings, StoreError, dispatch};
use tessera_primitives::{ActorId, ItemView, strip_colors};
use tessera_shop::{MemoryInventories, ShopConfig, ShopDomain};
use tracing::debug;

/// Domain of plain declarative GUIs under `<gui_dir>/core`.
pub const CORE: &str = "core";

const ROW: usize = 9;
const CELL: usize = 12;

pub struct Workspace {
	pub sessions: SessionManager,
	pub host: MemoryHost,
	pub shop: ShopDomain,
	pub inventories: Rc<MemoryInventories>,
	report: LoadReport,
}

impl Workspace {
	/// Reads `config` (framework settings plus the `[shop]` table) and loads every domain.
	pub fn open(config: &Path) -> anyhow::Result<Self> {
		let settings = Settings::load(config).with_context(|| format!("failed to load settings from {}", config.display()))?;
		let shop = ShopConfig::load(config).with_context(|| format!("failed to load shop settings from {}", config.display()))?;
		Ok(Self::new(settings, shop))
	}

	pub fn new(settings: Settings, shop_config: ShopConfig) -> Self {
		let inventories = Rc::new(MemoryInventories::default());
		let shop = ShopDomain::with_ledger(&settings, shop_config, inventories.clone());
		let mut sessions = SessionManager::builder()
			.settings(settings)
			.domain(Rc::new(BasicDomain::new(CORE)))
			.domain(Rc::new(shop.clone()))
			.build();
		let report = sessions.load();
		debug!(templates = report.templates.len(), errors = report.errors.len(), "workspace loaded");
		Self {
			sessions,
			host: MemoryHost::new(),
			shop,
			inventories,
			report,
		}
	}

	pub fn report(&self) -> &LoadReport {
		&self.report
	}

	pub fn replace_report(&mut self, report: LoadReport) {
		self.report = report;
	}

	/// Named actor, connected on first use.
	pub fn actor(&mut self, name: &str) -> ActorId {
		match self.host.find_actor(name) {
			Some(actor) => actor,
			None => self.host.add_actor(name),
		}
	}

	/// Feeds queued host events back through the dispatcher until none are left.
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

	/// Prints every template and every load problem. False when a file failed to load.
	pub fn check(&self, out: &mut dyn Write) -> anyhow::Result<bool> {
		for template in &self.report.templates {
			let sharing = if template.is_shared() { "shared" } else { "per-viewer" };
			let kind = template.kind.as_deref().map(|k| format!(" [{k}]")).unwrap_or_default();
			writeln!(
				out,
				"{}/{:<16} {:<10} {} page(s) x {} slots{kind}",
				template.domain,
				template.name,
				sharing,
				template.page_count(),
				template.size
			)?;
		}
		for (path, warning) in &self.report.warnings {
			writeln!(out, "warning: {}: {warning}", path.display())?;
		}
		for (path, error) in &self.report.errors {
			writeln!(out, "error: {}: {error}", path.display())?;
		}
		writeln!(
			out,
			"{} template(s), {} warning(s), {} error(s)",
			self.report.templates.len(),
			self.report.warnings.len(),
			self.report.errors.len()
		)?;
		Ok(self.report.errors.is_empty())
	}

	/// Opens `gui` on `page` for a synthetic viewer and prints what it sees.
	pub fn render(&mut self, out: &mut dyn Write, gui: &str, page: usize) -> anyhow::Result<()> {
		let viewer = self.actor("viewer");
		let instance = self.sessions.open_gui(&mut self.host, viewer, gui, None, None)?;
		if page > 0 {
			instance.borrow_mut().open(&mut self.host, viewer, page)?;
		}
		self.pump();
		write_view(out, &self.host, viewer)?;
		Ok(())
	}

	/// Persists every domain, returning the failures.
	pub fn save(&self) -> Vec<(String, StoreError)> {
		self.sessions.save_all()
	}
}

/// Prints the actor's view: title, a grid of materials, then every occupied slot in detail.
pub fn write_view(out: &mut dyn Write, host: &MemoryHost, actor: ActorId) -> std::io::Result<()> {
	let Some(surface) = host.current_surface(actor).and_then(|s| host.surface(s)) else {
		return writeln!(out, "(no view)");
	};
	writeln!(out, "== {} ==", strip_colors(&surface.title))?;
	for row in surface.slots.chunks(ROW) {
		let cells: Vec<String> = row.iter().map(|slot| format!("{:<width$}", cell(slot.as_ref()), width = CELL)).collect();
		writeln!(out, "{}", cells.join(" ").trim_end())?;
	}
	for (slot, item) in surface.slots.iter().enumerate() {
		let Some(item) = item else {
			continue;
		};
		if item.hide_tooltip {
			continue;
		}
		write!(out, "{slot:>3}: {}", item.material)?;
		if item.amount > 1 {
			write!(out, " x{}", item.amount)?;
		}
		if let Some(name) = &item.name {
			write!(out, " \"{}\"", strip_colors(name))?;
		}
		for line in &item.lore {
			write!(out, " | {}", strip_colors(line))?;
		}
		writeln!(out)?;
	}
	Ok(())
}

fn cell(item: Option<&ItemView>) -> String {
	match item {
		None => ".".to_string(),
		Some(item) => item.material.chars().take(CELL).collect(),
	}
}
