//! Background [`Task`]s definitions.

mod background;
pub mod refresh_users;

pub use common::Handler as Task;

pub use self::{background::Background, refresh_users::RefreshUsers};
