//! [`User`]-related definitions.

use serde::Serialize;
use service::domain;

/// A [`User`] profile as exposed over HTTP.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of this [`User`].
    pub uuid: String,

    /// First name of this [`User`].
    pub first_name: Option<String>,

    /// Last name of this [`User`].
    pub last_name: Option<String>,

    /// Primary email address of this [`User`].
    pub email: Option<String>,

    /// Gmail address of this [`User`].
    pub gmail: Option<String>,

    /// Slack handle of this [`User`].
    pub slack: Option<String>,

    /// Skype handle of this [`User`].
    pub skype: Option<String>,

    /// LinkedIn profile of this [`User`].
    pub linkedin: Option<String>,

    /// Facebook profile of this [`User`].
    pub facebook: Option<String>,

    /// Twitter profile of this [`User`].
    pub twitter: Option<String>,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        let domain::User {
            id,
            first_name,
            last_name,
            email,
            gmail,
            slack,
            skype,
            linkedin,
            facebook,
            twitter,
        } = user;
        Self {
            uuid: id.into(),
            first_name,
            last_name,
            email,
            gmail,
            slack,
            skype,
            linkedin,
            facebook,
            twitter,
        }
    }
}
