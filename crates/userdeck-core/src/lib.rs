//! Core library for userdeck.
//!
//! Fetches user records from the demo users API, downloads avatars through
//! an in-memory cache and keeps a local list of favorites.

pub mod api;
pub mod cache;
pub mod config;
pub mod favorites;
pub mod models;
pub mod utils;

pub use api::{FetchError, UserClient};
pub use cache::{AvatarImage, ImageCache};
pub use config::Config;
pub use favorites::{Favorite, FavoritesError, FavoritesStore};
pub use models::{Envelope, UserCursor, UserRecord};
