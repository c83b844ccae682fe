//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to generate SQL
//! from the entity models, so the schema always matches the Rust structs
//! without hand-written SQL.

use crate::entities::{
    Batch, Client, Material, Movement, Product, Sale, Snapshot, Supplier, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/bakehouse.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// falls back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all necessary tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let product_table = schema.create_table_from_entity(Product);
    let batch_table = schema.create_table_from_entity(Batch);
    let material_table = schema.create_table_from_entity(Material);
    let supplier_table = schema.create_table_from_entity(Supplier);
    let movement_table = schema.create_table_from_entity(Movement);
    let sale_table = schema.create_table_from_entity(Sale);
    let client_table = schema.create_table_from_entity(Client);
    let snapshot_table = schema.create_table_from_entity(Snapshot);
    let user_table = schema.create_table_from_entity(User);

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&batch_table)).await?;
    db.execute(builder.build(&material_table)).await?;
    db.execute(builder.build(&supplier_table)).await?;
    db.execute(builder.build(&movement_table)).await?;
    db.execute(builder.build(&sale_table)).await?;
    db.execute(builder.build(&client_table)).await?;
    db.execute(builder.build(&snapshot_table)).await?;
    db.execute(builder.build(&user_table)).await?;

    Ok(())
}
