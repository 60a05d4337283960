//! REST API client module for the demo users service.
//!
//! This module provides the `UserClient` for listing users, fetching a
//! single user and downloading avatar images. Record fetches report a
//! `FetchError`; image fetches degrade to "no image".

pub mod client;
pub mod error;


pub use client::UserClient;
pub use error::FetchError;
