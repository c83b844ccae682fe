//! Shared test utilities for the bakehouse crate.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{auth::SessionUser, material, product},
    entities::{self, client, user},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A session for tests that do not care about the acting user.
#[must_use]
pub fn test_session() -> SessionUser {
    SessionUser {
        id: 1,
        name: "Test User".to_string(),
        role: "admin".to_string(),
        username: "test_user".to_string(),
    }
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * `recipe`: None
/// * prices: 1.50 / 1.25 / 1.25
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), None, 1.5, 1.25, 1.25).await
}

/// Creates a test material with sensible defaults (unit "qq", no supplier).
pub async fn create_test_material(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::material::Model> {
    material::create_material(db, name.to_string(), "qq".to_string(), None).await
}

/// Creates a test supplier without a phone number.
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::supplier::Model> {
    material::create_supplier(db, name.to_string(), None).await
}

/// Inserts a client row directly; clients are reference data with no
/// dedicated creation operation.
pub async fn create_test_client(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::client::Model> {
    let model = client::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Inserts a user row with role "admin" and the given credentials.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<entities::user::Model> {
    let model = user::ActiveModel {
        name: Set("Test User".to_string()),
        role: Set("admin".to_string()),
        username: Set(username.to_string()),
        password: Set(password.to_string()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with one product.
/// Returns (db, product) for common test scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, product))
}
