//! [`Database`]-related implementations.

#[cfg(feature = "json")]
pub mod json;
pub mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "json")]
pub use self::json::JsonFile;
pub use self::memory::InMemory;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "json")]
    /// [`JsonFile`] error.
    Json(json::Error),
}
