//! [`RefreshUsers`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Perform, Select, Start, Update};
use tokio::time::{interval, MissedTickBehavior};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::User,
    infra::{database, Database},
    Service,
};

use super::Task;

/// Configuration for [`RefreshUsers`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`User`]s collection reloads.
    ///
    /// Zero disables the reloads.
    pub interval: time::Duration,
}

/// [`Task`] for reloading the [`User`]s collection of a [`Service`] out of
/// its source.
#[derive(Clone, Debug)]
pub struct RefreshUsers<S, Src> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,

    /// Source [`Database`] to reload the [`User`]s from.
    source: Src,
}

impl<Db, Src> Task<Start<By<RefreshUsers<Self, Src>, (Config, Src)>>>
    for Service<Db>
where
    RefreshUsers<Service<Db>, Src>: Task<Perform<()>, Ok = (), Err: Error>,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<RefreshUsers<Self, Src>, (Config, Src)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (config, source) = by.into_inner();
        let task = RefreshUsers {
            config,
            service: self.clone(),
            source,
        };

        let mut interval = interval(task.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately, while the collection is fresh.
        let _ = interval.tick().await;
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::RefreshUsers` failed: {e}");
            });
        }
    }
}

impl<Db, Src> Task<Perform<()>> for RefreshUsers<Service<Db>, Src>
where
    Db: Database<Update<Vec<User>>, Ok = (), Err = Traced<database::Error>>,
    Src: Database<
        Select<By<Vec<User>, ()>>,
        Ok = Vec<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let users = self
            .source
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;
        let count = users.len();

        self.service
            .database()
            .execute(Update(users))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        log::debug!("reloaded {count} `User`s");
        Ok(())
    }
}

/// Error of [`RefreshUsers`] execution.
pub type ExecutionError = Traced<database::Error>;
