//! [`User`]s search definitions.

use std::collections::{BTreeMap, HashSet};

use serde::{Serialize, Serializer};

use crate::domain::user::{self, Field, User};

/// Sparse set of [`Field`] constraints describing a single search request.
///
/// Unset [`Field`]s don't constrain the search, so an empty [`Predicate`]
/// matches every [`User`]. An empty string is a literal value to match, not
/// an unset [`Field`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Predicate(BTreeMap<Field, String>);

impl Predicate {
    /// Creates a new empty [`Predicate`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Predicate`] constraining a single [`Field`].
    #[must_use]
    pub fn single(field: Field, value: impl Into<String>) -> Self {
        Self::new().with(field, value)
    }

    /// Constrains the provided [`Field`] to the provided `value`, replacing
    /// any previous constraint on it.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        drop(self.0.insert(field, value.into()));
        self
    }

    /// Indicates whether this [`Predicate`] constrains no [`Field`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the constrained [`Field`]s and their expected values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Checks whether the provided [`User`] satisfies every constrained
    /// [`Field`] of this [`Predicate`].
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.iter().all(|(f, v)| f.value(user) == Some(v))
    }
}

impl<V: Into<String>> FromIterator<(Field, V)> for Predicate {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(f, v)| (f, v.into())).collect())
    }
}

/// Returns all the [`User`]s satisfying the provided [`Predicate`], in the
/// order of the provided `users`.
#[must_use]
pub fn matching<'u>(users: &'u [User], predicate: &Predicate) -> Vec<&'u User> {
    users.iter().filter(|u| predicate.matches(u)).collect()
}

/// Returns all the [`User`]s satisfying at least one of the provided
/// [`Predicate`]s.
///
/// [`User`]s matched by earlier [`Predicate`]s go first, and each [`User`]
/// appears only once, at the position of its first match.
#[must_use]
pub fn matching_any<'u>(
    users: &'u [User],
    predicates: &[Predicate],
) -> Vec<&'u User> {
    let mut seen = HashSet::<&user::Id>::new();
    let mut found = Vec::new();
    for predicate in predicates {
        for user in matching(users, predicate) {
            if seen.insert(&user.id) {
                found.push(user);
            }
        }
    }
    found
}

/// Ordered mapping of [`User`] IDs to the value of a single [`Field`].
///
/// Serialized as a map preserving the insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mapping(Vec<(user::Id, String)>);

impl Mapping {
    /// Projects the provided [`User`]s into a [`Mapping`] of their IDs to
    /// the value of the provided [`Field`].
    ///
    /// [`User`]s missing the [`Field`] are skipped.
    #[must_use]
    pub fn project<'u>(
        users: impl IntoIterator<Item = &'u User>,
        field: Field,
    ) -> Self {
        Self(
            users
                .into_iter()
                .filter_map(|u| {
                    field.value(u).map(|v| (u.id.clone(), v.to_owned()))
                })
                .collect(),
        )
    }

    /// Indicates whether this [`Mapping`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries in this [`Mapping`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the entries of this [`Mapping`] in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&user::Id, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
