//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use common::pagination::InvalidPaginationError;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::{Serialize, Serializer};
use service::{infra::database, query};
use tracerr::{Trace, Traced};
use tracing as log;

/// HTTP API [`Error`] payload.
#[derive(Clone, Debug, Serialize, StdError)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// [`http::StatusCode`] of this [`Error`].
    #[serde(serialize_with = "serialize_status")]
    pub http_status: http::StatusCode,

    /// Stable numeric [`Code`] of this [`Error`].
    pub internal_error_code: Code,

    /// Message suitable for showing to an end user.
    pub client_message: String,

    /// Message describing the [`Error`] class to a developer.
    pub developer_message: String,

    /// Message of the underlying error.
    pub exception_message: String,

    /// Detailed descriptions of what went wrong, if any.
    pub detail_errors: Vec<String>,

    /// Backtrace of this [`Error`].
    ///
    /// Logged, but never sent to clients.
    #[error(not(backtrace))]
    #[serde(skip)]
    pub backtrace: Option<Trace>,
}

/// [`Error`] code.
pub type Code = u16;

impl Error {
    /// [`Code`] of a general lookup [`Error`].
    pub const GENERAL: Code = 0;

    /// [`Code`] of a request validation [`Error`].
    pub const VALIDATION: Code = 1;

    /// [`Code`] of an internal server [`Error`].
    pub const INTERNAL: Code = 2;

    /// Creates a new general [`Error`] of this service, carrying the
    /// provided `msg` as its exception message.
    #[must_use]
    pub fn general(msg: &impl ToString) -> Self {
        Self {
            http_status: http::StatusCode::BAD_REQUEST,
            internal_error_code: Self::GENERAL,
            client_message: "Oops something went wrong :(".to_owned(),
            developer_message: "General exception for this service".to_owned(),
            exception_message: msg.to_string(),
            detail_errors: vec![],
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] of malformed request parameters.
    #[must_use]
    pub fn validation(
        msg: &impl ToString,
        details: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            http_status: http::StatusCode::BAD_REQUEST,
            internal_error_code: Self::VALIDATION,
            client_message: "Invalid request parameters :(".to_owned(),
            developer_message: "Request parameters failed validation"
                .to_owned(),
            exception_message: msg.to_string(),
            detail_errors: details.into_iter().collect(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            http_status: http::StatusCode::INTERNAL_SERVER_ERROR,
            internal_error_code: Self::INTERNAL,
            client_message: "Service is temporarily unavailable :(".to_owned(),
            developer_message: "Internal server error".to_owned(),
            exception_message: msg.to_string(),
            detail_errors: vec![],
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            http_status,
            internal_error_code,
            exception_message,
            detail_errors,
            backtrace,
            ..
        } = self;

        write!(
            f,
            "[{internal_error_code}/{}]: {exception_message}",
            http_status.as_u16(),
        )?;
        if !detail_errors.is_empty() {
            write!(f, " ({})", detail_errors.iter().join("; "))?;
        }
        write!(
            f,
            "{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.http_status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("{self}");
        }
        (self.http_status, Json(self)).into_response()
    }
}

/// Serializes a [`http::StatusCode`] as its numeric value.
fn serialize_status<S: Serializer>(
    status: &http::StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError + fmt::Display> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }

    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        let mut error = self
            .as_ref()
            .try_as_error()
            .unwrap_or_else(|| Error::internal(self.as_ref()));
        error.backtrace = Some(self.trace().clone());
        error
    }
}

impl AsError for query::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotFound => Some(Error::general(self)),
            Self::InvalidPagination(e) => e.try_as_error(),
            Self::PageSizeExceeded { .. } => {
                Some(Error::validation(self, [format!("_limit: {self}")]))
            }
            Self::NoValues | Self::UnsupportedField(_) => {
                Some(Error::validation(self, [self.to_string()]))
            }
        }
    }
}

impl AsError for InvalidPaginationError {
    fn try_as_error(&self) -> Option<Error> {
        let param = match self {
            Self::Page => "_page",
            Self::Size => "_limit",
        };
        Some(Error::validation(self, [format!("{param}: {self}")]))
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for QueryRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::validation(self, [self.body_text()]))
    }
}

impl AsError for PathRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::validation(self, [self.body_text()]))
    }
}

#[cfg(test)]
mod spec {
    use service::{
        domain::user,
        infra::{database, json},
        query::ExecutionError,
    };

    use super::{AsError as _, Error};

    #[test]
    fn not_found_is_general_error() {
        let err = tracerr::new!(ExecutionError::NotFound).into_error();

        assert_eq!(err.http_status, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.internal_error_code, Error::GENERAL);
        assert_eq!(err.exception_message, "No users found by your request!");
        assert!(err.detail_errors.is_empty());
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn serializes_fixed_payload() {
        let json = serde_json::to_value(Error::general(&"boom")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "httpStatus": 400,
                "internalErrorCode": 0,
                "clientMessage": "Oops something went wrong :(",
                "developerMessage": "General exception for this service",
                "exceptionMessage": "boom",
                "detailErrors": [],
            }),
        );
    }

    #[test]
    fn validation_errors_name_parameters() {
        let err = ExecutionError::PageSizeExceeded { size: 500, max: 100 }
            .into_error();

        assert_eq!(err.internal_error_code, Error::VALIDATION);
        assert_eq!(
            err.detail_errors,
            ["_limit: Page size 500 exceeds the maximum of 100"],
        );

        let err = ExecutionError::InvalidPagination(
            common::pagination::InvalidPaginationError::Page,
        )
        .into_error();
        assert_eq!(
            err.detail_errors,
            ["_page: page number must be a positive integer"],
        );
    }

    #[test]
    fn provider_failure_is_internal_error() {
        let cause = database::Error::from(json::Error::DuplicateId(
            user::Id::new("AAAA123").unwrap(),
        ));

        let err = tracerr::new!(ExecutionError::Db(cause)).into_error();

        assert_eq!(err.http_status, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.internal_error_code, Error::INTERNAL);
        assert_eq!(err.client_message, "Service is temporarily unavailable :(");
        assert!(err.backtrace.is_some());

        let json = serde_json::to_value(&err).unwrap();
        let mut keys = json.as_object().unwrap().keys().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(
            keys,
            [
                "clientMessage",
                "detailErrors",
                "developerMessage",
                "exceptionMessage",
                "httpStatus",
                "internalErrorCode",
            ],
        );
        assert_eq!(json["httpStatus"], 500);
        assert_eq!(json["internalErrorCode"], 2);
    }
}
