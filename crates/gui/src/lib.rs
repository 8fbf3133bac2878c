//! Declarative multi-page slot-grid GUIs.
//!
//! Resources compile into [`Template`]s through an [`ElementRegistry`]; the
//! [`SessionManager`] turns templates into live [`Instance`]s (one shared
//! singleton, or one per viewer) and keeps at most one open session per actor;
//! [`dispatch`] routes host events to the right instance and element.
//! Everything runs on the host's event thread and never blocks.

pub mod behavior;
pub mod commands;
pub mod compiler;
pub mod dispatch;
pub mod domain;
pub mod element;
pub mod error;
pub mod host;
pub mod instance;
pub mod pager;
pub mod registry;
pub mod session;
pub mod settings;
pub mod store;
pub mod template;

pub use behavior::{Behavior, BehaviorFactory, BehaviorSeed};
pub use compiler::{CompileWarning, LoadReport};
pub use dispatch::{Disposition, dispatch};
pub use domain::{BasicDomain, GuiDomain};
pub use element::{ClickContext, ClickEffects, Effect, Element, ElementBase, ElementInput, ElementSpec, GuiTarget};
pub use error::{ElementError, InsertAction, LoadError, OpenError, SettingsError, StoreError};
pub use host::{ClickKind, CloseReason, Host, HostEvent, MemoryHost};
pub use instance::{ClickOutcome, CloseOutcome, Instance, InstanceRef};
pub use registry::{BuildOutcome, ElementFactory, ElementKind, ElementRegistry};
pub use session::{SessionManager, SessionManagerBuilder};
pub use settings::{Messages, Settings};
pub use store::KvStore;
pub use template::{Layout, Sharing, SlotMap, Template};
