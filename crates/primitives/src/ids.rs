use std::fmt;

use uuid::Uuid;

/// Stable identity of an actor (a player, a console, a test double).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub Uuid);

impl ActorId {
	/// Creates a fresh random identity.
	pub fn random() -> Self {
		Self(Uuid::new_v4())
	}

	/// Creates a deterministic identity, mostly useful in tests and scripts.
	pub const fn from_u128(value: u128) -> Self {
		Self(Uuid::from_u128(value))
	}
}

impl fmt::Display for ActorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Opaque handle to a host render surface (one per GUI page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "surface#{}", self.0)
	}
}
