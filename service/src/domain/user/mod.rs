//! [`User`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Profile record of a platform user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// ID of this [`User`].
    #[serde(rename = "uuid")]
    pub id: Id,

    /// First name of this [`User`].
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name of this [`User`].
    #[serde(default)]
    pub last_name: Option<String>,

    /// Primary email address of this [`User`].
    #[serde(default)]
    pub email: Option<String>,

    /// Secondary (Gmail) email address of this [`User`].
    #[serde(default)]
    pub gmail: Option<String>,

    /// Slack handle of this [`User`].
    #[serde(default)]
    pub slack: Option<String>,

    /// Skype handle of this [`User`].
    #[serde(default)]
    pub skype: Option<String>,

    /// LinkedIn profile URL of this [`User`].
    #[serde(default)]
    pub linkedin: Option<String>,

    /// Facebook profile URL of this [`User`].
    #[serde(default)]
    pub facebook: Option<String>,

    /// Twitter profile URL of this [`User`].
    #[serde(default)]
    pub twitter: Option<String>,
}

/// ID of a [`User`].
///
/// Never empty.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is not empty.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    /// Returns this [`Id`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id).ok_or("`Id` must not be empty")
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

/// Searchable attribute of a [`User`].
///
/// Parsed from and displayed as the attribute's external (camelCase) name.
#[derive(
    Clone,
    Copy,
    Debug,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    /// [`User::id`].
    Uuid,

    /// [`User::first_name`].
    FirstName,

    /// [`User::last_name`].
    LastName,

    /// [`User::email`].
    Email,

    /// [`User::gmail`].
    Gmail,

    /// [`User::slack`].
    Slack,

    /// [`User::skype`].
    Skype,

    /// [`User::linkedin`].
    Linkedin,

    /// [`User::facebook`].
    Facebook,

    /// [`User::twitter`].
    Twitter,
}

/// Accessor of a single [`User`] attribute.
pub type Accessor = fn(&User) -> Option<&str>;

impl Field {
    /// Returns the [`Accessor`] reading this [`Field`] out of a [`User`].
    #[must_use]
    pub fn accessor(self) -> Accessor {
        match self {
            Self::Uuid => |u| Some(u.id.as_str()),
            Self::FirstName => |u| u.first_name.as_deref(),
            Self::LastName => |u| u.last_name.as_deref(),
            Self::Email => |u| u.email.as_deref(),
            Self::Gmail => |u| u.gmail.as_deref(),
            Self::Slack => |u| u.slack.as_deref(),
            Self::Skype => |u| u.skype.as_deref(),
            Self::Linkedin => |u| u.linkedin.as_deref(),
            Self::Facebook => |u| u.facebook.as_deref(),
            Self::Twitter => |u| u.twitter.as_deref(),
        }
    }

    /// Reads the value of this [`Field`] out of the provided [`User`].
    #[must_use]
    pub fn value(self, user: &User) -> Option<&str> {
        self.accessor()(user)
    }

    /// Indicates whether this [`Field`] is a contact handle, so a set of its
    /// values may be resolved into [`User`] IDs.
    #[must_use]
    pub const fn is_handle(self) -> bool {
        match self {
            Self::Email
            | Self::Gmail
            | Self::Slack
            | Self::Skype
            | Self::Linkedin
            | Self::Facebook
            | Self::Twitter => true,
            Self::Uuid | Self::FirstName | Self::LastName => false,
        }
    }
}
