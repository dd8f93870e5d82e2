//! [`Query`] definition.

pub mod user;
pub mod users;

use common::pagination::InvalidPaginationError;
use derive_more::{Display, Error, From};

#[cfg(doc)]
use crate::{domain::User, infra::Database};
use crate::infra::database;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

/// Error of a [`User`]s lookup [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No [`User`]s match the [`Query`].
    #[display("No users found by your request!")]
    NotFound,

    /// Pagination arguments are malformed.
    #[display("Invalid pagination: {_0}")]
    #[from]
    InvalidPagination(InvalidPaginationError),

    /// Requested page size exceeds the configured maximum.
    #[display("Page size {size} exceeds the maximum of {max}")]
    PageSizeExceeded {
        /// Requested page size.
        size: usize,

        /// Maximum allowed page size.
        max: usize,
    },

    /// No values are provided to search by.
    #[display("No values provided to search by")]
    NoValues,

    /// Provided field cannot be searched by multiple values.
    #[display("`{_0}` is not a supported search field")]
    UnsupportedField(#[error(not(source))] String),
}

#[cfg(test)]
mod fixture {
    use std::time::Duration;

    use crate::{
        domain::{user, User},
        infra::InMemory,
        task, Config, Service,
    };

    pub(crate) const MAX_PAGE_SIZE: usize = 50;

    pub(crate) fn user(id: &str, name: &str, email: &str, slack: &str) -> User {
        User {
            id: user::Id::new(id).unwrap(),
            first_name: Some(name.into()),
            last_name: None,
            email: Some(email.into()),
            gmail: None,
            slack: Some(slack.into()),
            skype: None,
            linkedin: None,
            facebook: None,
            twitter: None,
        }
    }

    pub(crate) fn service() -> Service<InMemory> {
        Service::new(
            Config {
                max_page_size: MAX_PAGE_SIZE,
                refresh_users: task::refresh_users::Config {
                    interval: Duration::ZERO,
                },
            },
            InMemory::new(vec![
                user("AAAA123", "Vasya", "vasya@mail.ru", "slack.vasya"),
                user("AAAA321", "Bob", "bob@mail.com", "slack.bob"),
                user("AAAA555", "Vasya", "vasya@gmail.com", "slack.petrov"),
            ]),
        )
    }
}
