//! On-disk shape of a GUI resource and per-element field extraction.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use tessera_primitives::{ArgValue, Args, ItemView, SlotExpr, colorize};
use toml::Value;

use super::CompileWarning;
use crate::element::ElementSpec;
use crate::error::LoadError;

pub const INVISIBLE: &str = "#INVISIBLE";
pub const DEFAULT_MATERIAL: &str = "STONE";

#[derive(Debug, Clone, Deserialize)]
struct GuiFile {
	gui: Option<GuiResource>,
}

/// The `[gui]` table of a resource file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuiResource {
	pub title: String,
	pub size: i64,
	pub per_player: bool,
	#[serde(alias = "specialType")]
	pub special_type: Option<String>,
	/// When false, elements without a slot are built but not placed.
	pub needs_specific_slots: bool,
	pub layout: Option<String>,
	/// Element entries in file order.
	pub elements: Option<toml::Table>,
}

impl Default for GuiResource {
	fn default() -> Self {
		Self {
			title: "Default Title".to_string(),
			size: 27,
			per_player: false,
			special_type: None,
			needs_specific_slots: true,
			layout: None,
			elements: None,
		}
	}
}

impl GuiResource {
	/// Parses a whole resource document.
	pub fn parse(path: &Path, content: &str) -> Result<Self, LoadError> {
		let file: GuiFile = toml::from_str(content).map_err(|source| LoadError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
		file.gui.ok_or_else(|| LoadError::MissingGui { path: path.to_path_buf() })
	}
}

/// Extracts an [`ElementSpec`] from one `elements` entry.
///
/// `Err` means the entry is not usable at all; lesser problems are pushed to
/// `warnings` and the entry degrades (invisible item, no slots). Slot ranges
/// are expanded no further than the `size`-slot grid.
pub(super) fn parse_element(key: &str, value: &Value, size: usize, warnings: &mut Vec<CompileWarning>) -> Result<ElementSpec, String> {
	let Some(table) = value.as_table() else {
		return Err(format!("expected a table, found {}", value.type_str()));
	};

	let action = string_field(table, &["action"]).unwrap_or_default();
	let mut tokens = action.split_whitespace();
	let id = tokens.next().unwrap_or_default().to_ascii_uppercase();
	let args = tokens.map(str::to_string).collect();

	let mut slots = slot_field(key, table.get("slots"), size, warnings);
	if slots.is_empty() {
		slots = slot_field(key, table.get("slot"), size, warnings);
	}

	Ok(ElementSpec {
		key: key.to_string(),
		action: id,
		args,
		item: resolve_item(key, table, warnings),
		attributes: table.iter().map(|(k, v)| (k.clone(), to_arg(v))).collect::<Args>(),
		permission: string_field(table, &["permission"]).unwrap_or_default(),
		permission_message: string_field(table, &["permissionMessage", "permission_message"])
			.map(|m| colorize(&m))
			.unwrap_or_default(),
		page: parse_page(table.get("page")),
		slots,
	})
}

fn string_field(table: &toml::Table, keys: &[&str]) -> Option<String> {
	keys.iter().find_map(|k| table.get(*k)?.as_str()).map(str::to_string)
}

fn resolve_item(key: &str, table: &toml::Table, warnings: &mut Vec<CompileWarning>) -> Option<ItemView> {
	let material = match table.get("material").or_else(|| table.get("representation")) {
		None => DEFAULT_MATERIAL.to_string(),
		Some(Value::String(s)) => s.trim().to_ascii_uppercase(),
		Some(other) => {
			warnings.push(CompileWarning::InvalidRepresentation {
				key: key.to_string(),
				value: other.to_string(),
			});
			return None;
		}
	};
	if material == INVISIBLE {
		return None;
	}
	if !is_identifier(&material) {
		warnings.push(CompileWarning::InvalidRepresentation {
			key: key.to_string(),
			value: material,
		});
		return None;
	}

	let mut item = ItemView::new(material);
	if let Some(name) = table.get("name").and_then(Value::as_str).filter(|n| !n.trim().is_empty()) {
		item.name = Some(colorize(name));
	}
	item.lore = match table.get("lore") {
		Some(Value::String(lore)) => lore.split(['\n', '|']).map(|l| colorize(l.trim())).collect(),
		Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).map(|l| colorize(l.trim())).collect(),
		_ => Vec::new(),
	};
	item.custom_model_data = ["customModelData", "custom_model_data"]
		.iter()
		.find_map(|k| table.get(*k))
		.and_then(|v| to_arg(v).as_int())
		.and_then(|v| i32::try_from(v).ok())
		.unwrap_or(0);
	Some(item)
}

fn is_identifier(material: &str) -> bool {
	!material.is_empty() && material.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '_' | ':' | '.' | '-'))
}

/// Absent, blank, `-`, negative or unparsable pages mean "every page".
pub(super) fn parse_page(value: Option<&Value>) -> Option<usize> {
	match value? {
		Value::Integer(n) => usize::try_from(*n).ok(),
		Value::Float(f) if *f >= 0.0 => Some(*f as usize),
		Value::String(s) => {
			let s = s.trim();
			if s.is_empty() || s == "-" {
				return None;
			}
			s.parse::<i64>().ok().and_then(|n| usize::try_from(n).ok())
		}
		_ => None,
	}
}

fn slot_field(key: &str, value: Option<&Value>, size: usize, warnings: &mut Vec<CompileWarning>) -> BTreeSet<usize> {
	let mut slots = BTreeSet::new();
	if let Some(value) = value {
		collect_slots(key, value, size, &mut slots, warnings);
	}
	slots
}

fn collect_slots(key: &str, value: &Value, size: usize, slots: &mut BTreeSet<usize>, warnings: &mut Vec<CompileWarning>) {
	let invalid = |expr: String, error: String, warnings: &mut Vec<CompileWarning>| {
		warnings.push(CompileWarning::InvalidSlots {
			key: key.to_string(),
			expr,
			error,
		});
	};
	match value {
		Value::Integer(n) => match usize::try_from(*n) {
			Ok(slot) => {
				slots.insert(slot);
			}
			Err(_) => invalid(n.to_string(), "negative slot".to_string(), warnings),
		},
		Value::String(expr) => match SlotExpr::parse(expr) {
			Ok(parsed) => {
				slots.extend(parsed.slots(size));
				// One overflowing slot stands in for the whole tail; the compiler reports it.
				slots.extend(parsed.beyond(size));
			}
			Err(e) => invalid(expr.clone(), e.to_string(), warnings),
		},
		Value::Array(values) => {
			for value in values {
				collect_slots(key, value, size, slots, warnings);
			}
		}
		other => invalid(other.to_string(), format!("unexpected {}", other.type_str()), warnings),
	}
}

fn to_arg(value: &Value) -> ArgValue {
	match value {
		Value::String(s) => ArgValue::Text(s.clone()),
		Value::Integer(n) => ArgValue::Int(*n),
		Value::Float(f) => ArgValue::Float(*f),
		Value::Boolean(b) => ArgValue::Bool(*b),
		Value::Array(values) => ArgValue::List(values.iter().map(to_arg).collect()),
		other => ArgValue::Text(other.to_string()),
	}
}
