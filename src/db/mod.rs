//! Database module: the credential table, its row model and the store seam.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: the `CredentialStore` trait the gateway talks to
//! - `sqlite.rs`: sqlx-backed implementation of the store

pub mod models;
pub mod schema;
pub mod sqlite;
pub mod store;

pub use models::CredentialRow;
pub use schema::SQLITE_INIT;
pub use sqlite::{LoginsStorage, SqlitePool};
pub use store::{CredentialStore, InsertOutcome};
