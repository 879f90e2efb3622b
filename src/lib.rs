//! Document command mediation core for a MongoDB desktop client.
//!
//! Given the [`query::QueryContext`] of an executed query and the narrow
//! capability contracts in [`mediator`], this crate decides which document
//! commands are valid for the current selection, converts documents to and
//! from editable text, and sequences each mutating command through
//! confirmation, remote execution and result refresh.

pub mod bson;
pub mod error;
pub mod events;
pub mod mediator;
pub mod query;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use events::StoreEvent;
pub use mediator::{Command, CommandOutcome, DocumentMediator, MenuEntry, MenuState, build_menu};
pub use query::QueryContext;
pub use settings::{FormattingSettings, TimeZoneMode, UuidEncoding};
pub use store::{MongoStore, RemoteStore};
