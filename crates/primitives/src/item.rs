use crate::placeholder::Placeholders;

/// Host-neutral description of what a slot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
	/// Upper-case material identifier, e.g. `BLACK_STAINED_GLASS_PANE`.
	pub material: String,
	/// Stack size shown on the slot (1..=99).
	pub amount: u8,
	pub name: Option<String>,
	pub lore: Vec<String>,
	pub custom_model_data: i32,
	/// Suppresses the tooltip entirely (background fillers).
	pub hide_tooltip: bool,
}

impl ItemView {
	pub fn new(material: impl Into<String>) -> Self {
		Self {
			material: material.into(),
			amount: 1,
			name: None,
			lore: Vec::new(),
			custom_model_data: 0,
			hide_tooltip: false,
		}
	}

	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_lore(mut self, lore: Vec<String>) -> Self {
		self.lore = lore;
		self
	}

	/// Sets the stack size, clamped to the displayable range.
	pub fn with_amount(mut self, amount: u32) -> Self {
		self.amount = amount.clamp(1, 99) as u8;
		self
	}

	/// Returns a copy with placeholders applied to the display name and lore.
	pub fn replaced(&self, placeholders: &Placeholders) -> Self {
		if placeholders.is_empty() {
			return self.clone();
		}
		Self {
			name: self.name.as_deref().map(|n| placeholders.apply(n)),
			lore: placeholders.apply_lines(&self.lore),
			..self.clone()
		}
	}
}
