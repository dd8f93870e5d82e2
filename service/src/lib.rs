//! Service contains the users lookup logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::error::Error;

use common::operations::{By, Start};

#[cfg(doc)]
use infra::Database;

pub use self::{query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Maximum number of [`User`]s on a single page.
    ///
    /// [`User`]: domain::User
    pub max_page_size: usize,

    /// [`task::RefreshUsers`] configuration.
    pub refresh_users: task::refresh_users::Config,
}

/// Users lookup service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Prepares the [`task::Background`] environment of this [`Service`],
    /// refreshing its [`Database`] out of the provided `source`.
    ///
    /// [`task::RefreshUsers`] is not spawned if its interval is zero.
    pub fn background<Src>(&self, source: Src) -> task::Background
    where
        Self: Task<
                Start<
                    By<
                        task::RefreshUsers<Self, Src>,
                        (task::refresh_users::Config, Src),
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
        Src: 'static,
    {
        let mut bg = task::Background::default();

        let config = self.config.refresh_users;
        if !config.interval.is_zero() {
            let svc = self.clone();
            bg.spawn(async move {
                svc.execute(Start(By::new((config, source)))).await
            });
        }

        bg
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }
}
