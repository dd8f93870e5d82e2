//! [`Query`] collection related to a single [`User`].

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    read::user::Snapshot,
    Service,
};

use super::{ExecutionError, Query};

/// Queries a [`User`] by its [`user::Id`].
///
/// Fails with [`ExecutionError::NotFound`] if the ID is empty or no [`User`]
/// has it.
#[derive(Clone, Debug, From)]
pub struct ById(pub String);

impl<Db> Query<ById> for Service<Db>
where
    Db: Database<
        Select<By<Snapshot, ()>>,
        Ok = Snapshot,
        Err = Traced<database::Error>,
    >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, ById(id): ById) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let id = user::Id::new(id)
            .ok_or(E::NotFound)
            .map_err(tracerr::wrap!())?;

        let users = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(E::NotFound)
            .map_err(tracerr::wrap!())
    }
}
