use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::UserRecord;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("User {0} is already in favorites")]
    AlreadyInFavorites(i64),

    #[error("User {0} is not in favorites")]
    NotInFavorites(i64),

    #[error("Favorites file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites file is corrupt: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FavoritesError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FavoritesError::AlreadyInFavorites(_) => {
                "You've already favorited this user. You must REALLY like them!"
            }
            FavoritesError::NotInFavorites(_) => "This user is not in your favorites.",
            FavoritesError::Io(_) | FavoritesError::Serialize(_) => {
                "There was an error favoriting this user. Please try again."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub user: UserRecord,
    pub saved_at: DateTime<Utc>,
}

/// Favorites persisted as a JSON array, in the order they were added.
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all favorites. A missing file means no favorites yet.
    pub fn load(&self) -> Result<Vec<Favorite>, FavoritesError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let favorites: Vec<Favorite> = serde_json::from_str(&contents)?;
        debug!(count = favorites.len(), path = %self.path.display(), "Loaded favorites");
        Ok(favorites)
    }

    fn save(&self, favorites: &[Favorite]) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(favorites)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    pub fn contains(&self, id: i64) -> Result<bool, FavoritesError> {
        Ok(self.load()?.iter().any(|f| f.user.id() == id))
    }

    /// Persist `user`. Fails without touching the file if it is already saved.
    pub fn add(&self, user: &UserRecord) -> Result<(), FavoritesError> {
        let mut favorites = self.load()?;
        if favorites.iter().any(|f| f.user.id() == user.id()) {
            return Err(FavoritesError::AlreadyInFavorites(user.id()));
        }
        favorites.push(Favorite {
            user: user.clone(),
            saved_at: Utc::now(),
        });
        self.save(&favorites)?;
        info!(id = user.id(), "Added favorite");
        Ok(())
    }

    /// Remove the favorite with `id`, returning the record that was stored.
    pub fn remove(&self, id: i64) -> Result<UserRecord, FavoritesError> {
        let mut favorites = self.load()?;
        let index = favorites
            .iter()
            .position(|f| f.user.id() == id)
            .ok_or(FavoritesError::NotInFavorites(id))?;
        let removed = favorites.remove(index);
        self.save(&favorites)?;
        info!(id, "Removed favorite");
        Ok(removed.user)
    }
}
