//! HTTP handlers of the [`User`]s lookup endpoints.
//!
//! [`User`]: api::User

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query,
    },
    Extension, Json,
};
use serde::Deserialize;
use service::{
    domain::user::Field,
    query,
    read::user::search::{Mapping, Predicate},
    Query as _,
};
use smart_default::SmartDefault;

use crate::{api, AsError, Error, Service};

/// Query parameters of the [`list`] endpoint.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ListParams {
    /// 1-indexed number of the requested page.
    #[default(1)]
    #[serde(rename = "_page")]
    pub page: i64,

    /// Number of [`User`]s on the requested page.
    ///
    /// [`User`]: api::User
    #[default(10)]
    #[serde(rename = "_limit")]
    pub limit: i64,
}

/// Lists a page of all the users.
///
/// # Errors
///
/// If the pagination parameters are malformed or exceed the allowed page
/// size.
#[tracing::instrument(skip(service))]
pub async fn list(
    Extension(service): Extension<Service>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<api::User>>, Error> {
    let Query(ListParams { page, limit }) =
        params.map_err(AsError::into_error)?;

    let users = service
        .execute(query::users::List { page, size: limit })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Returns the user with the provided `uuid`.
///
/// # Errors
///
/// If no such user exists.
#[tracing::instrument(skip(service))]
pub async fn by_id(
    Extension(service): Extension<Service>,
    uuid: Result<Path<String>, PathRejection>,
) -> Result<Json<api::User>, Error> {
    let Path(uuid) = uuid.map_err(AsError::into_error)?;

    let user = service
        .execute(query::user::ById(uuid))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(user.into()))
}

/// Query parameters of the [`search`] endpoint.
///
/// Omitted parameters don't constrain the search.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchParams {
    /// Expected `uuid`.
    pub uuid: Option<String>,

    /// Expected `firstName`.
    pub first_name: Option<String>,

    /// Expected `lastName`.
    pub last_name: Option<String>,

    /// Expected `email`.
    pub email: Option<String>,

    /// Expected `gmail`.
    pub gmail: Option<String>,

    /// Expected `slack`.
    pub slack: Option<String>,

    /// Expected `skype`.
    pub skype: Option<String>,

    /// Expected `linkedin`.
    pub linkedin: Option<String>,

    /// Expected `facebook`.
    pub facebook: Option<String>,

    /// Expected `twitter`.
    pub twitter: Option<String>,
}

impl From<SearchParams> for Predicate {
    fn from(params: SearchParams) -> Self {
        let SearchParams {
            uuid,
            first_name,
            last_name,
            email,
            gmail,
            slack,
            skype,
            linkedin,
            facebook,
            twitter,
        } = params;

        [
            (Field::Uuid, uuid),
            (Field::FirstName, first_name),
            (Field::LastName, last_name),
            (Field::Email, email),
            (Field::Gmail, gmail),
            (Field::Slack, slack),
            (Field::Skype, skype),
            (Field::Linkedin, linkedin),
            (Field::Facebook, facebook),
            (Field::Twitter, twitter),
        ]
        .into_iter()
        .filter_map(|(f, v)| v.map(|v| (f, v)))
        .collect()
    }
}

/// Searches the users having all the provided attribute values.
///
/// # Errors
///
/// If no user matches.
#[tracing::instrument(skip(service))]
pub async fn search(
    Extension(service): Extension<Service>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<api::User>>, Error> {
    let Query(params) = params.map_err(AsError::into_error)?;

    let users = service
        .execute(query::users::Search(params.into()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Query parameters of the [`uuid_by_slack`] endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlackParams {
    /// Comma or whitespace separated Slack handles.
    pub slack: Option<String>,
}

/// Resolves Slack handles into the IDs of the users having them.
///
/// # Errors
///
/// If no handles are provided, or none of them is known.
#[tracing::instrument(skip(service))]
pub async fn uuid_by_slack(
    Extension(service): Extension<Service>,
    params: Result<Query<SlackParams>, QueryRejection>,
) -> Result<Json<Mapping>, Error> {
    let Query(SlackParams { slack }) = params.map_err(AsError::into_error)?;

    search_multi(&service, Field::Slack.to_string(), slack.as_deref()).await
}

/// Query parameters of the [`uuid_by_field`] endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValuesParams {
    /// Comma or whitespace separated values of the searched field.
    pub values: Option<String>,
}

/// Resolves values of a contact handle `field` into the IDs of the users
/// having them.
///
/// # Errors
///
/// If the `field` is not a contact handle, no values are provided, or none
/// of them is known.
#[tracing::instrument(skip(service))]
pub async fn uuid_by_field(
    Extension(service): Extension<Service>,
    field: Result<Path<String>, PathRejection>,
    params: Result<Query<ValuesParams>, QueryRejection>,
) -> Result<Json<Mapping>, Error> {
    let Path(field) = field.map_err(AsError::into_error)?;
    let Query(ValuesParams { values }) = params.map_err(AsError::into_error)?;

    search_multi(&service, field, values.as_deref()).await
}

async fn search_multi(
    service: &Service,
    field: String,
    values: Option<&str>,
) -> Result<Json<Mapping>, Error> {
    service
        .execute(query::users::SearchMultiByField {
            field,
            values: split_values(values),
        })
        .await
        .map(Json)
        .map_err(AsError::into_error)
}

/// Splits a raw list of values on commas and whitespace, dropping empty
/// pieces.
#[must_use]
pub fn split_values(raw: Option<&str>) -> Vec<String> {
    raw.into_iter()
        .flat_map(|raw| raw.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod spec {
    use service::{domain::user::Field, read::user::search::Predicate};

    use super::{split_values, ListParams, SearchParams};

    #[test]
    fn splits_on_commas_and_whitespace() {
        assert_eq!(
            split_values(Some("slack.vasya, slack.bob,,\tslack.petrov ")),
            ["slack.vasya", "slack.bob", "slack.petrov"],
        );
        assert!(split_values(Some(" , ")).is_empty());
        assert!(split_values(None).is_empty());
    }

    #[test]
    fn search_params_skip_omitted_fields() {
        let predicate = Predicate::from(SearchParams {
            first_name: Some("Vasya".into()),
            gmail: Some(String::new()),
            ..SearchParams::default()
        });

        assert_eq!(
            predicate,
            Predicate::new()
                .with(Field::FirstName, "Vasya")
                .with(Field::Gmail, ""),
        );
        assert!(Predicate::from(SearchParams::default()).is_empty());
    }

    #[test]
    fn list_params_default_to_first_page() {
        let ListParams { page, limit } = ListParams::default();

        assert_eq!((page, limit), (1, 10));
    }
}
