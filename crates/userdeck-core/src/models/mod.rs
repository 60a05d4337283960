//! Data models for the users API.
//!
//! - `UserRecord`: a single user, immutable once decoded
//! - `Envelope`: the `{ "data": ... }` wrapper every endpoint responds with
//! - `UserCursor`: prev/next browsing over a range of user ids

pub mod navigation;
pub mod user;

pub use navigation::UserCursor;
pub use user::{Envelope, UserRecord, UNNAMED_USER};

#[cfg(test)]
pub(crate) use user::sample_user;
