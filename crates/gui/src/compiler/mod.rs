//! Turns declarative GUI resources into [`Template`]s.
//!
//! Compilation never fails as a whole: malformed entries are skipped and
//! reported as [`CompileWarning`]s, unknown actions become inert labels.

use std::collections::BTreeMap;
use std::rc::Rc;

use tessera_primitives::colorize;
use tracing::debug;

use crate::domain::GuiDomain;
use crate::element::builtins::Label;
use crate::element::{Element, ElementBase, ElementSpec};
use crate::error::ElementError;
use crate::registry::{BuildOutcome, ElementRegistry};
use crate::template::{Layout, Sharing, SlotMap, Template};

mod load;
mod resource;

pub use load::{LoadReport, load_dir, load_file};
pub use resource::{DEFAULT_MATERIAL, GuiResource, INVISIBLE};

const DEFAULT_SIZE: usize = 27;

/// A non-fatal problem found while compiling one resource.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileWarning {
	#[error("no elements defined")]
	NoElements,
	#[error("invalid size {size}, using {DEFAULT_SIZE}")]
	InvalidSize { size: i64 },
	#[error("unknown layout {value:?}, using static")]
	UnknownLayout { value: String },
	#[error("element '{key}' skipped: {reason}")]
	MalformedElement { key: String, reason: String },
	#[error("element '{key}' has invalid representation {value}; it will not be visible")]
	InvalidRepresentation { key: String, value: String },
	#[error("element '{key}' has invalid slots {expr:?}: {error}")]
	InvalidSlots { key: String, expr: String, error: String },
	#[error("element '{key}' slot {slot} is outside the {size}-slot grid")]
	SlotOutOfRange { key: String, slot: usize, size: usize },
	#[error("element '{key}' skipped: {error}")]
	ElementFailed { key: String, error: ElementError },
	#[error("pages {pages:?} are not contiguous, renumbered from 0")]
	PageGap { pages: Vec<usize> },
}

/// Compiles one resource into a template named `name` (lower-cased).
pub fn compile(name: &str, resource: GuiResource, registry: &ElementRegistry, domain: &dyn GuiDomain) -> (Template, Vec<CompileWarning>) {
	let mut warnings = Vec::new();

	let size = match usize::try_from(resource.size) {
		Ok(size) if size > 0 => size,
		_ => {
			warnings.push(CompileWarning::InvalidSize { size: resource.size });
			DEFAULT_SIZE
		}
	};
	let special_type = resource
		.special_type
		.as_deref()
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_ascii_uppercase);
	let layout = match resource.layout.as_deref() {
		None => Layout::Static,
		Some(value) => Layout::parse(value).unwrap_or_else(|| {
			warnings.push(CompileWarning::UnknownLayout { value: value.to_string() });
			Layout::Static
		}),
	};

	let elements = resource.elements.unwrap_or_default();
	if elements.is_empty() {
		warnings.push(CompileWarning::NoElements);
	}

	let mut defaults = SlotMap::new();
	let mut pages: BTreeMap<usize, SlotMap> = BTreeMap::new();
	let mut synthetic = 0;

	for (key, value) in &elements {
		let spec = match resource::parse_element(key, value, size, &mut warnings) {
			Ok(spec) => spec,
			Err(reason) => {
				warnings.push(CompileWarning::MalformedElement { key: key.clone(), reason });
				continue;
			}
		};
		let Some(element) = build_element(&spec, registry, domain, special_type.as_deref(), &mut warnings) else {
			continue;
		};

		let mut slots = spec.slots.clone();
		if slots.is_empty() {
			if !resource.needs_specific_slots {
				continue;
			}
			synthetic += 1;
			slots.insert(synthetic);
		}

		let target = match spec.page {
			Some(page) => pages.entry(page).or_default(),
			None => &mut defaults,
		};
		for slot in slots {
			if slot >= size {
				warnings.push(CompileWarning::SlotOutOfRange {
					key: key.clone(),
					slot,
					size,
				});
				continue;
			}
			target.insert(slot, element.clone());
		}
	}

	let mut template = Template {
		name: name.to_lowercase(),
		title: colorize(&resource.title),
		size,
		sharing: if resource.per_player { Sharing::PerViewer } else { Sharing::Shared },
		layout,
		kind: special_type,
		domain: domain.name().to_string(),
		pages: merge_pages(defaults, pages, &mut warnings),
		behavior: None,
	};
	domain.specify_template(&mut template);
	(template, warnings)
}

fn build_element(
	spec: &ElementSpec, registry: &ElementRegistry, domain: &dyn GuiDomain, special_type: Option<&str>, warnings: &mut Vec<CompileWarning>,
) -> Option<Rc<dyn Element>> {
	let label = || -> Rc<dyn Element> { Rc::new(Label::new(ElementBase::from_input(&spec.input()))) };
	let element = if spec.action.is_empty() {
		label()
	} else {
		match registry.build(&spec.input()) {
			BuildOutcome::Built(element) => element,
			BuildOutcome::NotFound => {
				debug!(key = %spec.key, action = %spec.action, "unknown action, using a label");
				label()
			}
			BuildOutcome::Failed(error) => {
				warnings.push(CompileWarning::ElementFailed {
					key: spec.key.clone(),
					error,
				});
				return None;
			}
		}
	};
	Some(domain.enhance_element(special_type, spec, element))
}

/// Overlays each concrete page on the default page and renumbers pages densely.
///
/// Without any concrete page the default page becomes page 0.
pub fn merge_pages(defaults: SlotMap, pages: BTreeMap<usize, SlotMap>, warnings: &mut Vec<CompileWarning>) -> Vec<SlotMap> {
	if pages.is_empty() {
		return vec![defaults];
	}
	let numbers: Vec<usize> = pages.keys().copied().collect();
	if numbers.iter().enumerate().any(|(i, page)| i != *page) {
		warnings.push(CompileWarning::PageGap { pages: numbers });
	}
	pages
		.into_values()
		.map(|own| {
			let mut merged = defaults.clone();
			merged.extend(own);
			merged
		})
		.collect()
}
