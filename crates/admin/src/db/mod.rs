//! Database operations against the marketplace `PostgreSQL`.
//!
//! # Schema: `marketplace`
//!
//! ## Tables
//!
//! - `account` - shoppers, vendors, and admins in one table (`role` column)
//! - `product` - vendor products, partitioned by `storefront`
//! - `product_order` - orders with the product snapshot embedded
//! - `category` - storefront categories
//! - `report` - user-submitted reports (append-only)
//! - `address` - user shipping addresses
//! - `review` - product reviews
//! - `session` - tower-sessions storage
//!
//! Queries use the sqlx runtime API with explicit row structs; stored enums
//! are lowercase text and an unknown value surfaces as
//! [`RepositoryError::DataCorruption`], never a panic.
//!
//! # Migrations
//!
//! Plain SQL under `crates/admin/migrations/`, applied with
//! `sqlx migrate run --source crates/admin/migrations`.

pub mod accounts;
pub mod addresses;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reports;
pub mod reviews;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::{AccountRepository, VerificationOutcome};
pub use addresses::AddressRepository;
pub use categories::{CategoryRepository, NewCategory};
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reports::ReportRepository;
pub use reviews::ReviewRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate external id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
fn map_unique_violation(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}
