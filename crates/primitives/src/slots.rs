use std::collections::BTreeSet;

/// Reasons a slot expression is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotExprError {
	#[error("empty slot expression")]
	Empty,
	#[error("invalid slot '{0}'")]
	InvalidSlot(String),
	#[error("invalid slot range '{0}'")]
	InvalidRange(String),
}

/// A parsed slot expression: a comma separated list of `n` or `lo-hi` parts.
///
/// Ranges are inclusive and order independent (`"4-2"` equals `"2-4"`). Parts
/// are kept as bounds and only expanded against a grid capacity, so a range
/// far past the grid costs nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotExpr {
	parts: Vec<(usize, usize)>,
}

impl SlotExpr {
	pub fn parse(expr: &str) -> Result<Self, SlotExprError> {
		let expr = expr.trim();
		if expr.is_empty() {
			return Err(SlotExprError::Empty);
		}

		let mut parts = Vec::new();
		for part in expr.split(',').map(str::trim) {
			match part.split_once('-') {
				Some((lo, hi)) => {
					let bad = || SlotExprError::InvalidRange(part.to_string());
					let lo: usize = lo.trim().parse().map_err(|_| bad())?;
					let hi: usize = hi.trim().parse().map_err(|_| bad())?;
					parts.push((lo.min(hi), lo.max(hi)));
				}
				None => {
					let slot = part.parse().map_err(|_| SlotExprError::InvalidSlot(part.to_string()))?;
					parts.push((slot, slot));
				}
			}
		}
		Ok(Self { parts })
	}

	/// The deduplicated slots below `capacity`.
	pub fn slots(&self, capacity: usize) -> BTreeSet<usize> {
		let mut slots = BTreeSet::new();
		for &(lo, hi) in &self.parts {
			if lo < capacity {
				slots.extend(lo..=hi.min(capacity - 1));
			}
		}
		slots
	}

	/// The highest listed slot at or past `capacity`, if any.
	pub fn beyond(&self, capacity: usize) -> Option<usize> {
		self.parts.iter().map(|&(_, hi)| hi).filter(|&hi| hi >= capacity).max()
	}
}

/// Parses a slot expression for a grid of `capacity` slots, yielding the empty
/// set when it is malformed. Slots past the grid are dropped.
pub fn parse_slots(expr: &str, capacity: usize) -> BTreeSet<usize> {
	SlotExpr::parse(expr).map(|parsed| parsed.slots(capacity)).unwrap_or_default()
}
