//! Items held by actors.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use tessera_primitives::ActorId;

/// Largest stack a single inventory slot holds.
pub const STACK_LIMIT: u32 = 64;
/// Slots of a [`MemoryInventories`] inventory.
pub const DEFAULT_SLOTS: usize = 36;

/// One occupied inventory slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
	pub material: String,
	pub amount: u32,
	/// False for renamed or otherwise customised items, which are never sold in bulk.
	pub plain: bool,
}

impl Stack {
	pub fn new(material: impl Into<String>, amount: u32) -> Self {
		Self {
			material: material.into(),
			amount,
			plain: true,
		}
	}

	pub fn custom(mut self) -> Self {
		self.plain = false;
		self
	}
}

/// Per-actor slot storage the shop trades against.
pub trait Inventories {
	fn contents(&self, actor: ActorId) -> Vec<Option<Stack>>;

	fn set_slot(&self, actor: ActorId, slot: usize, stack: Option<Stack>);

	/// Adds `amount` plain items, topping up existing stacks first. Returns what did not fit.
	fn give(&self, actor: ActorId, material: &str, amount: u32) -> u32;
}

/// Removes up to `amount` plain items of `material`, scanning slots in order.
///
/// Returns how many were removed.
pub fn take(inventories: &dyn Inventories, actor: ActorId, material: &str, amount: u32) -> u32 {
	let mut taken = 0;
	for (slot, stack) in inventories.contents(actor).into_iter().enumerate() {
		let Some(mut stack) = stack.filter(|s| s.plain && s.material == material) else {
			continue;
		};
		let remaining = amount - taken;
		if remaining == 0 {
			break;
		}
		if stack.amount <= remaining {
			taken += stack.amount;
			inventories.set_slot(actor, slot, None);
		} else {
			stack.amount -= remaining;
			taken += remaining;
			inventories.set_slot(actor, slot, Some(stack));
		}
	}
	taken
}

/// Fixed-size in-process inventories.
#[derive(Debug)]
pub struct MemoryInventories {
	slots: usize,
	inner: RefCell<FxHashMap<ActorId, Vec<Option<Stack>>>>,
}

impl Default for MemoryInventories {
	fn default() -> Self {
		Self::new(DEFAULT_SLOTS)
	}
}

impl MemoryInventories {
	pub fn new(slots: usize) -> Self {
		Self {
			slots,
			inner: RefCell::new(FxHashMap::default()),
		}
	}

	/// Total amount of plain `material` the actor holds.
	pub fn count(&self, actor: ActorId, material: &str) -> u32 {
		self.contents(actor)
			.iter()
			.flatten()
			.filter(|s| s.plain && s.material == material)
			.map(|s| s.amount)
			.sum()
	}

	fn with_slots<R>(&self, actor: ActorId, f: impl FnOnce(&mut Vec<Option<Stack>>) -> R) -> R {
		let mut inner = self.inner.borrow_mut();
		let slots = inner.entry(actor).or_insert_with(|| vec![None; self.slots]);
		f(slots)
	}
}

impl Inventories for MemoryInventories {
	fn contents(&self, actor: ActorId) -> Vec<Option<Stack>> {
		self.inner.borrow().get(&actor).cloned().unwrap_or_else(|| vec![None; self.slots])
	}

	fn set_slot(&self, actor: ActorId, slot: usize, stack: Option<Stack>) {
		self.with_slots(actor, |slots| {
			if let Some(cell) = slots.get_mut(slot) {
				*cell = stack.filter(|s| s.amount > 0);
			}
		});
	}

	fn give(&self, actor: ActorId, material: &str, amount: u32) -> u32 {
		self.with_slots(actor, |slots| {
			let mut left = amount;
			for stack in slots.iter_mut().flatten() {
				if left == 0 {
					break;
				}
				if stack.plain && stack.material == material && stack.amount < STACK_LIMIT {
					let added = left.min(STACK_LIMIT - stack.amount);
					stack.amount += added;
					left -= added;
				}
			}
			for cell in slots.iter_mut().filter(|c| c.is_none()) {
				if left == 0 {
					break;
				}
				let added = left.min(STACK_LIMIT);
				*cell = Some(Stack::new(material, added));
				left -= added;
			}
			left
		})
	}
}
