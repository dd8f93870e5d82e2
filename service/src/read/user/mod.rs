//! [`User`] read model definitions.

pub mod search;

use std::sync::Arc;

use crate::domain::User;

/// Immutable snapshot of the whole [`User`]s collection, in its natural
/// order.
pub type Snapshot = Arc<[User]>;

pub mod list {
    //! [`User`]s list definitions.

    #[cfg(doc)]
    use crate::domain::User;

    /// Arguments selecting a page of [`User`]s.
    pub type Arguments = common::pagination::Arguments;
}
