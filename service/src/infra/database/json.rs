//! JSON file [`Database`] implementation.

use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Database;
use crate::{
    domain::{user, User},
    infra::database,
};

/// [`Database`] reading the whole [`User`]s collection from a JSON file
/// containing an array of [`User`] records.
///
/// The file is re-read on every [`Select`].
#[derive(Clone, Debug)]
pub struct JsonFile {
    /// Path to the JSON file.
    path: PathBuf,
}

impl JsonFile {
    /// Creates a new [`JsonFile`] reading from the provided `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this [`JsonFile`] reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the provided JSON `bytes` into a [`User`]s collection.
    ///
    /// # Errors
    ///
    /// If the `bytes` are not a JSON array of [`User`]s, or several [`User`]s
    /// share the same [`user::Id`].
    pub fn parse(bytes: &[u8]) -> Result<Vec<User>, Error> {
        let users = serde_json::from_slice::<Vec<User>>(bytes)?;

        let mut ids = HashSet::with_capacity(users.len());
        if let Some(dup) = users.iter().find(|u| !ids.insert(&u.id)) {
            return Err(Error::DuplicateId(dup.id.clone()));
        }

        Ok(users)
    }
}

impl database::Database<Select<By<Vec<User>, ()>>> for JsonFile {
    type Ok = Vec<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Self::parse(&bytes)
            .map_err(tracerr::wrap!())
            .map_err(tracerr::map_from)
    }
}

/// [`JsonFile`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to read the file.
    #[display("Failed to read `JsonFile`: {_0}")]
    Io(io::Error),

    /// File content is not a valid [`User`]s collection.
    #[display("Malformed `JsonFile` content: {_0}")]
    Malformed(serde_json::Error),

    /// Several [`User`]s share the same [`user::Id`].
    #[display("Duplicate `User(id: {_0})` in `JsonFile`")]
    #[from(ignore)]
    DuplicateId(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use super::{Error, JsonFile};

    #[test]
    fn parses_users_in_file_order() {
        let users = JsonFile::parse(
            br#"[
                {"uuid":"AAAA321","firstName":"Bob","slack":"slack.bob"},
                {"uuid":"AAAA123","firstName":"Vasya","email":"vasya@mail.ru"}
            ]"#,
        )
        .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id.as_str(), "AAAA321");
        assert_eq!(users[1].email.as_deref(), Some("vasya@mail.ru"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = JsonFile::parse(br#"[{"uuid":"A"},{"uuid":"B"},{"uuid":"A"}]"#)
            .unwrap_err();

        assert!(
            matches!(&err, Error::DuplicateId(id) if id.as_str() == "A"),
            "{err}",
        );
    }

    #[test]
    fn rejects_malformed_content() {
        assert!(matches!(
            JsonFile::parse(br#"{"uuid":"A"}"#),
            Err(Error::Malformed(_)),
        ));
        assert!(matches!(
            JsonFile::parse(br#"[{"uuid":""}]"#),
            Err(Error::Malformed(_)),
        ));
    }
}
