//! [`Query`] collection related to the multiple [`User`]s.

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    read::user::{
        list,
        search::{self, Mapping, Predicate},
        Snapshot,
    },
    Service,
};

use super::{ExecutionError, Query};

/// Queries a page of all the [`User`]s in their natural order.
///
/// An empty page is not an error.
#[derive(Clone, Copy, Debug)]
pub struct List {
    /// 1-indexed number of the requested page.
    pub page: i64,

    /// Number of [`User`]s on the requested page.
    pub size: i64,
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
        Select<By<Snapshot, ()>>,
        Ok = Snapshot,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: List) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let List { page, size } = query;
        let args = list::Arguments::new(page, size)
            .map_err(E::from)
            .map_err(tracerr::wrap!())?;
        let max = self.config().max_page_size;
        if args.size() > max {
            return Err(tracerr::new!(E::PageSizeExceeded {
                size: args.size(),
                max,
            }));
        }

        let users = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(args.paginate(users.iter().cloned()))
    }
}

/// Queries all the [`User`]s satisfying a [`Predicate`].
///
/// Fails with [`ExecutionError::NotFound`] if none do.
#[derive(Clone, Debug, From)]
pub struct Search(pub Predicate);

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Snapshot, ()>>,
        Ok = Snapshot,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Search(predicate): Search,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let users = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let found = search::matching(&users, &predicate);
        if found.is_empty() {
            return Err(tracerr::new!(E::NotFound));
        }
        Ok(found.into_iter().cloned().collect())
    }
}

/// Resolves several candidate values of a single contact handle [`Field`]
/// into the IDs of the [`User`]s having them.
///
/// Every value is trimmed and matched independently, and the results are
/// united in the order of `values`.
///
/// [`Field`]: user::Field
#[derive(Clone, Debug)]
pub struct SearchMultiByField {
    /// External name of the [`Field`] to search by.
    ///
    /// [`Field`]: user::Field
    pub field: String,

    /// Candidate values of the [`Field`].
    ///
    /// [`Field`]: user::Field
    pub values: Vec<String>,
}

impl<Db> Query<SearchMultiByField> for Service<Db>
where
    Db: Database<
        Select<By<Snapshot, ()>>,
        Ok = Snapshot,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Mapping;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: SearchMultiByField,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SearchMultiByField { field, values } = query;

        let field = field
            .parse::<user::Field>()
            .ok()
            .filter(|f| f.is_handle())
            .ok_or(E::UnsupportedField(field))
            .map_err(tracerr::wrap!())?;
        if values.is_empty() {
            return Err(tracerr::new!(E::NoValues));
        }
        let predicates = values
            .iter()
            .map(|v| Predicate::single(field, v.trim()))
            .collect::<Vec<_>>();

        let users = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mapping =
            Mapping::project(search::matching_any(&users, &predicates), field);
        log::debug!(
            "resolved {} of {} `{field}` values",
            mapping.len(),
            predicates.len(),
        );
        if mapping.is_empty() {
            return Err(tracerr::new!(E::NotFound));
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::InvalidPaginationError;

    use crate::{
        domain::user::Field,
        query::{fixture, ExecutionError, Query as _},
        read::user::search::Predicate,
    };

    use super::{List, Search, SearchMultiByField};

    fn ids(users: &[crate::domain::User]) -> Vec<&str> {
        users.iter().map(|u| u.id.as_str()).collect()
    }

    #[tokio::test]
    async fn lists_pages_in_natural_order() {
        let service = fixture::service();

        let first = service
            .execute(List { page: 1, size: 2 })
            .await
            .unwrap();
        let second = service
            .execute(List { page: 2, size: 2 })
            .await
            .unwrap();
        let past_end = service
            .execute(List { page: 3, size: 2 })
            .await
            .unwrap();

        assert_eq!(ids(&first), ["AAAA123", "AAAA321"]);
        assert_eq!(ids(&second), ["AAAA555"]);
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn rejects_oversized_pages() {
        let service = fixture::service();

        let max = i64::try_from(fixture::MAX_PAGE_SIZE).unwrap();

        let err = service
            .execute(List {
                page: 1,
                size: max + 1,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::PageSizeExceeded { max, .. }
                    if *max == fixture::MAX_PAGE_SIZE,
            ),
            "{err}",
        );
        assert!(service
            .execute(List { page: 1, size: max })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn rejects_non_positive_pagination() {
        let service = fixture::service();

        for (page, size, expected) in [
            (0, 10, InvalidPaginationError::Page),
            (-1, 10, InvalidPaginationError::Page),
            (1, 0, InvalidPaginationError::Size),
            (1, -5, InvalidPaginationError::Size),
        ] {
            let err = service.execute(List { page, size }).await.unwrap_err();

            assert!(
                matches!(
                    err.as_ref(),
                    ExecutionError::InvalidPagination(e) if *e == expected,
                ),
                "page {page}, size {size}: {err}",
            );
        }
    }

    #[tokio::test]
    async fn searches_by_predicate() {
        let service = fixture::service();

        let found = service
            .execute(Search(Predicate::single(Field::Email, "vasya@mail.ru")))
            .await
            .unwrap();
        assert_eq!(ids(&found), ["AAAA123"]);

        let found = service
            .execute(Search(Predicate::single(Field::FirstName, "Vasya")))
            .await
            .unwrap();
        assert_eq!(ids(&found), ["AAAA123", "AAAA555"]);

        let found = service.execute(Search(Predicate::new())).await.unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn search_fails_when_nothing_matches() {
        let err = fixture::service()
            .execute(Search(Predicate::single(Field::Email, "nobody@x.com")))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotFound), "{err}");
        assert_eq!(err.to_string(), "No users found by your request!");
    }

    #[tokio::test]
    async fn resolves_multiple_values_in_input_order() {
        let mapping = fixture::service()
            .execute(SearchMultiByField {
                field: "slack".into(),
                values: vec![
                    " slack.bob".into(),
                    "slack.unknown".into(),
                    "slack.vasya ".into(),
                    "slack.bob".into(),
                ],
            })
            .await
            .unwrap();

        let entries = mapping
            .iter()
            .map(|(id, v)| (id.as_str(), v))
            .collect::<Vec<_>>();
        assert_eq!(
            entries,
            [("AAAA321", "slack.bob"), ("AAAA123", "slack.vasya")],
        );
    }

    #[tokio::test]
    async fn multi_search_validates_input() {
        let service = fixture::service();

        for field in ["password", "firstName", "uuid", "Slack"] {
            let err = service
                .execute(SearchMultiByField {
                    field: field.into(),
                    values: vec!["vasya".into()],
                })
                .await
                .unwrap_err();
            assert!(
                matches!(err.as_ref(), ExecutionError::UnsupportedField(f) if f == field),
                "{field}: {err}",
            );
        }

        let err = service
            .execute(SearchMultiByField {
                field: "slack".into(),
                values: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::NoValues), "{err}");
    }

    #[tokio::test]
    async fn multi_search_fails_when_nothing_matches() {
        let err = fixture::service()
            .execute(SearchMultiByField {
                field: "email".into(),
                values: vec!["nobody@x.com".into(), "slack.bob".into()],
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotFound), "{err}");
    }
}
