//! Infrastructure layer.

pub mod database;

pub use self::database::{Database, InMemory};
#[cfg(feature = "json")]
pub use self::database::{json, JsonFile};
