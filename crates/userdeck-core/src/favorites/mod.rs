//! Local favorites storage.
//!
//! `FavoritesStore` keeps the user records a person has marked as favorites
//! in a JSON file, by default `~/.local/share/userdeck/favorites.json`.

pub mod store;

pub use store::{Favorite, FavoritesError, FavoritesStore};
