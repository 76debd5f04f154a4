//! Database configuration module for `PaintDesk`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to automatically
//! generate SQL statements from the entity models, ensuring that the database
//! schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Material, Notification, PriceApproval, SupplierInvoice};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
///
/// The URL normally comes from [`crate::config::settings::AppConfig`], which
/// resolves `DATABASE_URL` and config.toml.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate
/// proper SQL statements for table creation, ensuring the database schema
/// matches the Rust struct definitions. It creates tables for materials,
/// supplier invoices, price approvals, and notifications.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    // Use SeaORM's proper table creation using Schema::create_table_from_entity
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Create tables using SeaORM's schema generation
    let material_table = schema.create_table_from_entity(Material);
    let invoice_table = schema.create_table_from_entity(SupplierInvoice);
    let approval_table = schema.create_table_from_entity(PriceApproval);
    let notification_table = schema.create_table_from_entity(Notification);

    db.execute(builder.build(&material_table)).await?;
    db.execute(builder.build(&invoice_table)).await?;
    db.execute(builder.build(&approval_table)).await?;
    db.execute(builder.build(&notification_table)).await?;

    Ok(())
}
