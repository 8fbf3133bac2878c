//! Common utilities for GUI integration tests.

use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tessera_gui::{BasicDomain, ClickKind, Disposition, ElementKind, Host, LoadReport, MemoryHost, SessionManager, Settings, dispatch};
use tessera_primitives::ActorId;

/// A session manager over a temporary `guis/core` tree and an in-memory host.
pub struct Harness {
	pub dir: TempDir,
	pub host: MemoryHost,
	pub sessions: SessionManager,
}

/// Writes `guis/core/<name>.toml` under `root`.
pub fn write_gui(root: &Path, name: &str, src: &str) {
	let dir = root.join("guis").join("core");
	std::fs::create_dir_all(&dir).expect("failed to create gui dir");
	std::fs::write(dir.join(format!("{name}.toml")), src).expect("failed to write gui");
}

/// Shared buffer the log-capturing subscriber writes into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Runs `f` with a plain-text subscriber installed and returns what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
	let buffer = LogBuffer::default();
	let writer = buffer.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_ansi(false)
		.with_max_level(tracing::Level::DEBUG)
		.with_writer(move || writer.clone())
		.finish();
	let result = tracing::subscriber::with_default(subscriber, f);
	let logs = String::from_utf8_lossy(&buffer.0.lock().expect("log buffer poisoned")).into_owned();
	(result, logs)
}

impl Harness {
	/// Writes `guis` and performs the initial load. Panics on load errors.
	pub fn new(guis: &[(&str, &str)]) -> Self {
		Self::with_kinds(guis, Vec::new())
	}

	/// Like [`Harness::new`], registering extra element kinds on the builder.
	pub fn with_kinds(guis: &[(&str, &str)], kinds: Vec<ElementKind>) -> Self {
		let _ = tracing_subscriber::fmt::try_init();
		let dir = tempfile::tempdir().expect("failed to create temp dir");
		for (name, src) in guis {
			write_gui(dir.path(), name, src);
		}
		let mut sessions = kinds
			.into_iter()
			.fold(SessionManager::builder(), |builder, kind| builder.element_kind(kind))
			.settings(Settings::rooted(dir.path()))
			.domain(Rc::new(BasicDomain::new("core")))
			.build();
		let report = sessions.load();
		assert!(report.errors.is_empty(), "load errors: {:?}", report.errors);
		Self {
			dir,
			host: MemoryHost::new(),
			sessions,
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

	/// Feeds every queued host event back through the dispatcher.
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

	/// Template name of the actor's session.
	pub fn current(&self, actor: ActorId) -> Option<String> {
		self.sessions.session(actor).map(|i| i.borrow().template().name.clone())
	}

	/// Page of the actor's session the actor is looking at.
	pub fn current_page(&self, actor: ActorId) -> Option<usize> {
		let surface = self.host.current_surface(actor)?;
		self.sessions.session(actor)?.borrow().page_of(surface)
	}

	/// Material shown at `slot` of the actor's view.
	pub fn material_at(&self, actor: ActorId, slot: usize) -> Option<String> {
		self.host.slot_of_view(actor, slot).map(|i| i.material.clone())
	}
}
