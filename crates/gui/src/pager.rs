//! Dynamic overflow layout.
//!
//! Distributes a variable number of items over as many copies of a static
//! skeleton page as needed, filling each copy's empty slots in ascending order.

use std::rc::Rc;

use tracing::warn;

use crate::element::Element;
use crate::template::SlotMap;

/// Slots in `0..size` the page leaves unoccupied, ascending.
pub fn empty_slots(size: usize, page: &SlotMap) -> Vec<usize> {
	(0..size).filter(|slot| !page.contains_key(slot)).collect()
}

/// Lays `items` out over copies of `skeleton`.
///
/// Every page carries the full skeleton; item order is preserved; the page
/// count is `ceil(items / empty slots)` with a minimum of one page.
pub fn paginate(skeleton: &SlotMap, size: usize, items: &[Rc<dyn Element>]) -> Vec<SlotMap> {
	let empty = empty_slots(size, skeleton);
	if empty.is_empty() {
		if !items.is_empty() {
			warn!(items = items.len(), size, "skeleton has no empty slots, overflow items are not shown");
		}
		return vec![skeleton.clone()];
	}
	if items.is_empty() {
		return vec![skeleton.clone()];
	}

	items
		.chunks(empty.len())
		.map(|chunk| {
			let mut page = skeleton.clone();
			page.extend(empty.iter().copied().zip(chunk.iter().cloned()));
			page
		})
		.collect()
}
