//! Output formatting utilities

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use userdeck_core::utils::fit_column;
use userdeck_core::{AvatarImage, Favorite, UserCursor, UserRecord};

const ID_WIDTH: usize = 4;
const NAME_WIDTH: usize = 24;
const EMAIL_WIDTH: usize = 32;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("warning: {}", msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg);
}

/// Pretty-print any serializable value as JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn header(extra: &str) {
    println!(
        "{} {} {} {}",
        fit_column("ID", ID_WIDTH),
        fit_column("NAME", NAME_WIDTH),
        fit_column("EMAIL", EMAIL_WIDTH),
        extra
    );
}

fn row(user: &UserRecord, extra: &str) {
    println!(
        "{} {} {} {}",
        fit_column(&user.id().to_string(), ID_WIDTH),
        fit_column(&user.display_name(), NAME_WIDTH),
        fit_column(user.email(), EMAIL_WIDTH),
        extra
    );
}

/// One line per user; favorites are marked with a heart
pub fn user_table(users: &[UserRecord], favorite_ids: &[i64]) {
    if users.is_empty() {
        info("No users on this page.");
        return;
    }
    header("FAV");
    for user in users {
        let marker = if favorite_ids.contains(&user.id()) { "♥" } else { "" };
        row(user, marker);
    }
}

pub fn user_detail(user: &UserRecord, cursor: Option<&UserCursor>) {
    println!("{}", user.display_name());
    println!("  id:     {}", user.id());
    println!("  email:  {} ({})", user.email(), user.mailto());
    println!("  avatar: {}", user.avatar_url());

    if let Some(cursor) = cursor {
        let prev = cursor.prev().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let next = cursor.next().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  prev:   {}    next: {}", prev, next);
    }
}

pub fn image_summary(user: &UserRecord, image: &AvatarImage) {
    println!(
        "{}: {}x{} {} ({} bytes)",
        user.display_name(),
        image.width(),
        image.height(),
        image.extension(),
        image.bytes().len()
    );
}

/// Favorites with the size of their avatar, or "no image" when it could not be fetched
pub fn favorites_table(favorites: &[Favorite], avatars: &[Option<Arc<AvatarImage>>]) {
    header("SAVED / AVATAR");
    for (favorite, avatar) in favorites.iter().zip(avatars) {
        let avatar = match avatar {
            Some(image) => format!("{}x{}", image.width(), image.height()),
            None => "no image".to_string(),
        };
        let saved = favorite.saved_at.format("%b %d, %Y");
        row(&favorite.user, &format!("{} / {}", saved, avatar));
    }
}
