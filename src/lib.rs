pub mod config;
pub mod error;
pub mod service;
pub mod router;
pub mod middleware;
pub mod handlers;
pub mod db;
pub mod types;

pub use error::LoginsError;
pub use service::gateway::{CredentialGateway, LoginOutcome};
