//! bookstore-rs: A lightweight bookstore catalog API.
//!
//! This crate serves a small, read-only book catalog keyed by ISBN and
//! lets users register themselves.
//!
//! # Features
//!
//! - Lookup by ISBN, exact author, or exact title
//! - Per-book reviews
//! - User self-registration with unique usernames
//! - Built-in seed catalog, or any JSON seed keyed by ISBN
//! - Original API status codes, or distinct ones per failure kind

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// User registration.
pub mod auth;
/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// Book records and catalog.
pub mod library;
/// HTTP server.
pub mod server;


pub use auth::UserRegistry;
pub use config::{Cli, Command, Config};
pub use error::{AppError, Result};
pub use library::{Book, Catalog};
pub use server::AppState;
