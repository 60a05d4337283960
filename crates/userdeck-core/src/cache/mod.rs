//! In-memory image caching.
//!
//! `ImageCache` maps avatar URLs to decoded images for the lifetime of the
//! client that owns it. There is no size bound and no eviction; entries are
//! only removed by an explicit `clear`.

pub mod avatar;

pub use avatar::{AvatarImage, ImageCache};

#[cfg(test)]
pub(crate) use avatar::png_fixture;
