//! The session manager: template catalog, shared singletons and the
//! one-session-per-actor table.

use std::collections::BTreeMap;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tessera_primitives::{ActorId, Args};
use tracing::{debug, info, warn};

use crate::compiler::{self, LoadReport};
use crate::domain::GuiDomain;
use crate::element::builtins::builtin_kinds;
use crate::element::{ClickEffects, Effect, GuiTarget};
use crate::error::{InsertAction, OpenError, StoreError};
use crate::host::Host;
use crate::instance::{Instance, InstanceRef};
use crate::registry::{ElementKind, ElementRegistry};
use crate::settings::Settings;
use crate::template::Template;

#[derive(Default)]
struct Catalog {
	templates: BTreeMap<String, Rc<Template>>,
	/// Singleton instances of shared templates, created on first open.
	shared: FxHashMap<String, InstanceRef>,
}

impl Catalog {
	fn insert(&mut self, template: Rc<Template>) -> InsertAction {
		match self.templates.insert(template.name.clone(), template) {
			None => InsertAction::InsertedNew,
			Some(_) => InsertAction::ReplacedExisting,
		}
	}
}

/// Owns every template and session. Construct with [`SessionManager::builder`].
pub struct SessionManager {
	settings: Settings,
	domains: Vec<Rc<dyn GuiDomain>>,
	registry: ElementRegistry,
	catalog: Catalog,
	sessions: FxHashMap<ActorId, InstanceRef>,
}

#[derive(Default)]
pub struct SessionManagerBuilder {
	settings: Settings,
	domains: Vec<Rc<dyn GuiDomain>>,
	kinds: Vec<ElementKind>,
}

impl SessionManagerBuilder {
	pub fn settings(mut self, settings: Settings) -> Self {
		self.settings = settings;
		self
	}

	/// Registers a domain. Domains load and register element kinds in registration order.
	pub fn domain<D: GuiDomain + 'static>(mut self, domain: Rc<D>) -> Self {
		if self.domains.iter().any(|d| d.name() == domain.name()) {
			warn!(domain = domain.name(), "domain registered twice, ignoring the second");
			return self;
		}
		self.domains.push(domain);
		self
	}

	/// Registers an extra element kind after every domain's kinds.
	pub fn element_kind(mut self, kind: ElementKind) -> Self {
		self.kinds.push(kind);
		self
	}

	/// Assembles the element registry. The catalog stays empty until [`SessionManager::load`].
	pub fn build(self) -> SessionManager {
		let kinds = builtin_kinds()
			.into_iter()
			.chain(self.domains.iter().flat_map(|d| d.element_kinds()))
			.chain(self.kinds);
		SessionManager {
			settings: self.settings,
			registry: ElementRegistry::discover(kinds),
			domains: self.domains,
			catalog: Catalog::default(),
			sessions: FxHashMap::default(),
		}
	}
}

impl SessionManager {
	pub fn builder() -> SessionManagerBuilder {
		SessionManagerBuilder::default()
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn registry(&self) -> &ElementRegistry {
		&self.registry
	}

	pub fn domains(&self) -> &[Rc<dyn GuiDomain>] {
		&self.domains
	}

	pub fn domain(&self, name: &str) -> Option<&Rc<dyn GuiDomain>> {
		self.domains.iter().find(|d| d.name() == name)
	}

	/// Initial load: reads every domain's persisted information, then builds the catalog.
	///
	/// Use [`SessionManager::reload`] once actors may be viewing GUIs.
	pub fn load(&mut self) -> LoadReport {
		let mut report = LoadReport::default();
		for domain in &self.domains {
			if let Err(e) = domain.load_information() {
				warn!(domain = domain.name(), error = %e, "failed to load domain information");
				report.errors.push((self.settings.data_file(domain.name()), e.to_string()));
			}
		}
		let (catalog, built) = self.build_catalog();
		report.merge(built);
		self.catalog = catalog;
		report
	}

	/// Rebuilds the catalog from disk and swaps it in, closing every session.
	///
	/// The new catalog is complete before anything is torn down, so a lookup
	/// never sees a partially loaded catalog.
	pub fn reload(&mut self, host: &mut dyn Host) -> LoadReport {
		let (catalog, report) = self.build_catalog();

		for (_, instance) in self.sessions.drain() {
			let mut instance = instance.borrow_mut();
			instance.force_close(host);
			if !instance.is_shared() {
				instance.release(host);
			}
		}
		let retired = std::mem::replace(&mut self.catalog, catalog);
		for instance in retired.shared.into_values() {
			let mut instance = instance.borrow_mut();
			instance.force_close(host);
			instance.set_back(None);
			instance.release(host);
		}

		info!(templates = self.catalog.templates.len(), errors = report.errors.len(), "reload complete");
		report
	}

	fn build_catalog(&self) -> (Catalog, LoadReport) {
		let mut report = LoadReport::default();
		for domain in &self.domains {
			domain.on_reload();
			let dir = domain.resource_dir(&self.settings);
			report.merge(compiler::load_dir(&dir, &self.registry, domain.as_ref()));
		}

		let mut catalog = Catalog::default();
		for template in &report.templates {
			if catalog.insert(template.clone()) == InsertAction::ReplacedExisting {
				warn!(gui = %template.name, domain = %template.domain, "GUI name loaded twice, the later file wins");
			}
		}
		(catalog, report)
	}

	/// Adds a programmatically built template. A template of the same name is replaced.
	pub fn register_template(&mut self, template: Template) -> InsertAction {
		let template = Rc::new(template);
		self.catalog.shared.remove(&template.name);
		self.catalog.insert(template)
	}

	/// Case-insensitive lookup.
	pub fn template(&self, name: &str) -> Option<Rc<Template>> {
		self.catalog.templates.get(&name.to_lowercase()).cloned()
	}

	pub fn templates(&self) -> impl Iterator<Item = &Rc<Template>> {
		self.catalog.templates.values()
	}

	/// Closest known template name, for "did you mean" replies.
	pub fn suggest(&self, name: &str) -> Option<String> {
		let name = name.to_lowercase();
		self.catalog
			.templates
			.keys()
			.min_by_key(|k| strsim::levenshtein(&name, k))
			.filter(|k| strsim::levenshtein(&name, k) <= 3)
			.cloned()
	}

	pub fn session(&self, actor: ActorId) -> Option<InstanceRef> {
		self.sessions.get(&actor).cloned()
	}

	pub fn session_count(&self) -> usize {
		self.sessions.len()
	}

	/// Opens the template registered as `name`, telling the actor when it does not exist.
	pub fn open_gui(
		&mut self, host: &mut dyn Host, actor: ActorId, name: &str, back: Option<GuiTarget>, args: Option<Args>,
	) -> Result<InstanceRef, OpenError> {
		let Some(template) = self.template(name) else {
			let suggestion = self.suggest(name);
			host.send(actor, &self.settings.messages.gui_not_found(name, suggestion.as_deref()));
			return Err(OpenError::NotFound {
				name: name.to_string(),
				suggestion,
			});
		};
		self.commence_open(host, actor, GuiTarget::Template(template), back, args)
	}

	/// Resolves `target` to an instance, retires the actor's previous session,
	/// opens page 0 and records the new session.
	pub fn commence_open(
		&mut self, host: &mut dyn Host, actor: ActorId, target: GuiTarget, back: Option<GuiTarget>, args: Option<Args>,
	) -> Result<InstanceRef, OpenError> {
		let back = back.and_then(|b| self.resolve_back(b));
		let instance = self.instantiate(host, actor, target, back, args)?;

		if let Some(previous) = self.sessions.remove(&actor) {
			if !Rc::ptr_eq(&previous, &instance) {
				retire(host, &previous);
			}
		}
		instance.borrow_mut().open(host, actor, 0)?;
		debug!(actor = %actor, gui = %instance.borrow().template().name, "session opened");
		self.sessions.insert(actor, instance.clone());
		Ok(instance)
	}

	fn instantiate(
		&mut self, host: &mut dyn Host, actor: ActorId, target: GuiTarget, back: Option<GuiTarget>, args: Option<Args>,
	) -> Result<InstanceRef, OpenError> {
		let (template, inherited) = match target {
			GuiTarget::Named(name) => match self.template(&name) {
				Some(template) => (template, None),
				None => return Err(not_found(self, &name)),
			},
			GuiTarget::Template(template) => (template, None),
			GuiTarget::Instance(instance) => {
				let instance = instance.borrow();
				(instance.template().clone(), Some(instance.args().clone()))
			}
		};

		if template.is_shared() {
			let instance = self.shared_instance(host, &template.name)?;
			let back = back.filter(|b| !matches!(b, GuiTarget::Instance(i) if Rc::ptr_eq(i, &instance)));
			instance.borrow_mut().set_back(back);
			return Ok(instance);
		}
		let args = args.or(inherited).unwrap_or_default();
		Ok(Instance::create(host, template, Some(actor), back, args))
	}

	fn shared_instance(&mut self, host: &mut dyn Host, name: &str) -> Result<InstanceRef, OpenError> {
		if let Some(instance) = self.catalog.shared.get(name) {
			return Ok(instance.clone());
		}
		let template = self.template(name).filter(|t| t.is_shared()).ok_or_else(|| not_found(self, name))?;
		let instance = Instance::create(host, template, None, None, Args::new());
		self.catalog.shared.insert(name.to_string(), instance.clone());
		Ok(instance)
	}

	fn resolve_back(&self, back: GuiTarget) -> Option<GuiTarget> {
		match back {
			GuiTarget::Named(name) => {
				let template = self.template(&name);
				if template.is_none() {
					warn!(gui = %name, "back-reference names an unknown GUI");
				}
				template.map(GuiTarget::Template)
			}
			other => Some(other),
		}
	}

	/// Forgets the actor's session. The host view is left alone.
	pub fn close_session(&mut self, host: &mut dyn Host, actor: ActorId) -> bool {
		match self.sessions.remove(&actor) {
			Some(instance) => {
				retire(host, &instance);
				debug!(actor = %actor, "session closed");
				true
			}
			None => false,
		}
	}

	/// Refreshes every open instance whose template kind is one of `kinds`.
	pub fn broadcast_refresh<S: AsRef<str>>(&self, host: &mut dyn Host, kinds: &[S]) -> usize {
		if kinds.is_empty() {
			return 0;
		}
		let mut refreshed: Vec<InstanceRef> = Vec::new();
		for instance in self.sessions.values() {
			if refreshed.iter().any(|r| Rc::ptr_eq(r, instance)) {
				continue;
			}
			let matches = {
				let template = instance.borrow();
				kinds.iter().any(|k| template.template().is_kind(k.as_ref()))
			};
			if matches {
				instance.borrow_mut().refresh(host);
				refreshed.push(instance.clone());
			}
		}
		refreshed.len()
	}

	/// Applies the effects of a click by `actor`, in order.
	pub fn apply_effects(&mut self, host: &mut dyn Host, actor: ActorId, effects: ClickEffects) {
		for effect in effects {
			match effect {
				Effect::Open { target, back, args } => {
					if let Err(e) = self.commence_open(host, actor, target, back, args) {
						warn!(actor = %actor, error = %e, "open failed");
					}
				}
				Effect::OpenNamed { name, back, args } => {
					let _ = self.open_gui(host, actor, &name, back, args);
				}
				Effect::OpenBack => self.open_back(host, actor),
				Effect::Close => {
					self.close_session(host, actor);
					host.close_view(actor);
				}
				Effect::Message(message) => host.send(actor, &message),
				Effect::Command(command) => host.dispatch_command(&command),
				Effect::RefreshKinds(kinds) => {
					self.broadcast_refresh(host, kinds.as_slice());
				}
			}
		}
	}

	fn open_back(&mut self, host: &mut dyn Host, actor: ActorId) {
		let back = self.sessions.get(&actor).and_then(|i| i.borrow().back().cloned());
		let Some(back) = back else {
			self.close_session(host, actor);
			host.close_view(actor);
			return;
		};
		let back_of_back = match &back {
			GuiTarget::Instance(i) => i.borrow().back().cloned(),
			GuiTarget::Template(t) if t.is_shared() => self.catalog.shared.get(&t.name).and_then(|i| i.borrow().back().cloned()),
			_ => None,
		};
		if let Err(e) = self.commence_open(host, actor, back, back_of_back, None) {
			warn!(actor = %actor, error = %e, "back navigation failed");
			self.close_session(host, actor);
			host.close_view(actor);
		}
	}

	/// Persists every domain. Each domain is attempted; failures are returned, not raised.
	pub fn save_all(&self) -> Vec<(String, StoreError)> {
		let mut failures = Vec::new();
		for domain in &self.domains {
			if let Err(e) = domain.save_information() {
				warn!(domain = domain.name(), error = %e, "failed to save domain information");
				failures.push((domain.name().to_string(), e));
			}
		}
		failures
	}
}

fn not_found(sessions: &SessionManager, name: &str) -> OpenError {
	OpenError::NotFound {
		name: name.to_string(),
		suggestion: sessions.suggest(name),
	}
}

/// Releases a retired per-viewer instance. Shared singletons live until reload.
fn retire(host: &mut dyn Host, instance: &InstanceRef) {
	let mut instance = instance.borrow_mut();
	if !instance.is_shared() {
		instance.release(host);
	}
}

impl std::fmt::Debug for SessionManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionManager")
			.field("domains", &self.domains.iter().map(|d| d.name().to_string()).collect::<Vec<_>>())
			.field("registry", &self.registry)
			.field("templates", &self.catalog.templates.keys().collect::<Vec<_>>())
			.field("sessions", &self.sessions.len())
			.finish()
	}
}
