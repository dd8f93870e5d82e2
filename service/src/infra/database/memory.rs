//! In-memory [`Database`] implementation.

use std::sync::Arc;

use common::operations::{By, Select, Update};
use tokio::sync::RwLock;
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Database;
use crate::{domain::User, infra::database, read::user::Snapshot};

/// [`Database`] keeping the whole [`User`]s collection in memory.
///
/// Readers receive an immutable [`Snapshot`], so an [`Update`] never affects
/// requests already being processed.
#[derive(Clone, Debug)]
pub struct InMemory {
    /// Current [`Snapshot`] of the [`User`]s collection.
    users: Arc<RwLock<Snapshot>>,
}

impl InMemory {
    /// Creates a new [`InMemory`] database holding the provided [`User`]s.
    #[must_use]
    pub fn new(users: impl Into<Snapshot>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into())),
        }
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl database::Database<Select<By<Snapshot, ()>>> for InMemory {
    type Ok = Snapshot;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Snapshot, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(Arc::clone(&*self.users.read().await))
    }
}

impl database::Database<Update<Vec<User>>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(users): Update<Vec<User>>,
    ) -> Result<Self::Ok, Self::Err> {
        *self.users.write().await = users.into();
        Ok(())
    }
}
