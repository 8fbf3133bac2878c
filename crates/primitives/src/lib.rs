//! Core types shared by the GUI framework and its domain plugins: actor and
//! surface identifiers, dynamic argument values, item views, placeholder
//! substitution and slot expressions.

/// Legacy `&` colour code translation.
pub mod color;
/// Identifier types for actors and host surfaces.
pub mod ids;
/// Renderable slot representations.
pub mod item;
/// Simultaneous multi-pattern text substitution.
pub mod placeholder;
/// Slot expression parsing (`"2-4,6"`).
pub mod slots;
/// Dynamically typed argument values and maps.
pub mod value;

pub use color::{colorize, strip_colors};
pub use ids::{ActorId, SurfaceId};
pub use item::ItemView;
pub use placeholder::Placeholders;
pub use slots::{SlotExpr, SlotExprError, parse_slots};
pub use value::{ArgValue, Args};
