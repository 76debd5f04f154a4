//! Shared test utilities for `PaintDesk`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    config::database::create_tables,
    core::{invoice::recompute_derived, material, sku},
    entities::{LineItem, LineItems, notification, price_approval, supplier_invoice},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Supplier used for fixtures that don't care about the supplier.
pub const TEST_SUPPLIER: &str = "Testleverancier";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Fields for a test catalog entry with sensible defaults.
///
/// # Defaults
/// * `category`: "verf"
/// * `unit`: "l"
/// * `price_excl_vat`: 10.0
/// * `discount_percentage`: 0.0
/// * `vat_rate`: 21
/// * `supplier`: [`TEST_SUPPLIER`], SKU generated from name and supplier
#[must_use]
pub fn new_material_fields(company_id: &str, name: &str) -> material::NewMaterial {
    material::NewMaterial {
        company_id: company_id.to_string(),
        name: name.to_string(),
        category: "verf".to_string(),
        unit: "l".to_string(),
        price_excl_vat: 10.0,
        discount_percentage: 0.0,
        vat_rate: 21,
        sku: sku::generate_sku(name, TEST_SUPPLIER, &[]),
        supplier: TEST_SUPPLIER.to_string(),
    }
}

/// Creates a test catalog entry with the defaults of
/// [`new_material_fields`].
pub async fn create_test_material(
    db: &DatabaseConnection,
    company_id: &str,
    name: &str,
) -> Result<crate::entities::material::Model> {
    material::create_material(db, new_material_fields(company_id, name)).await
}

/// Creates a test catalog entry with custom price and discount.
pub async fn create_custom_material(
    db: &DatabaseConnection,
    company_id: &str,
    name: &str,
    price_excl_vat: f64,
    discount_percentage: f64,
) -> Result<crate::entities::material::Model> {
    let mut fields = new_material_fields(company_id, name);
    fields.price_excl_vat = price_excl_vat;
    fields.discount_percentage = discount_percentage;
    material::create_material(db, fields).await
}

/// Builds a line item the way the extraction pipeline would, with the
/// derived amounts already computed.
///
/// # Defaults
/// * `unit`: "l"
/// * `vat_rate`: 21
/// * no supplier SKU, no category, no confidence, not yet reviewed
#[must_use]
pub fn make_line_item(
    id: &str,
    name: &str,
    gross_unit_price: f64,
    discount: f64,
    quantity: f64,
) -> LineItem {
    let mut item = LineItem {
        id: id.to_string(),
        name: name.to_string(),
        sku: None,
        quantity,
        unit: "l".to_string(),
        gross_unit_price,
        unit_price: 0.0,
        discount,
        vat_rate: 21,
        total_price: 0.0,
        category: None,
        confidence: None,
        approval_status: None,
    };
    recompute_derived(&mut item);
    item
}

/// Creates a test invoice holding the given line items.
///
/// # Defaults
/// * `status`: `pending_approval`
/// * no invoice number, no invoice-level decision
pub async fn create_test_invoice(
    db: &DatabaseConnection,
    company_id: &str,
    supplier_name: &str,
    line_items: Vec<LineItem>,
) -> Result<supplier_invoice::Model> {
    let now = Utc::now();
    let invoice = supplier_invoice::ActiveModel {
        company_id: Set(company_id.to_string()),
        supplier_name: Set(supplier_name.to_string()),
        invoice_number: Set(None),
        status: Set(crate::core::invoice::STATUS_PENDING_APPROVAL.to_string()),
        line_items: Set(LineItems(line_items)),
        approved_by: Set(None),
        approved_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    invoice.insert(db).await.map_err(Into::into)
}

/// Creates a pending price approval, as the extraction pipeline would when
/// an extracted price deviates from the catalog.
pub async fn create_test_approval(
    db: &DatabaseConnection,
    company_id: &str,
    supplier_invoice_id: i64,
    material_name: &str,
) -> Result<price_approval::Model> {
    let approval = price_approval::ActiveModel {
        company_id: Set(company_id.to_string()),
        supplier_invoice_id: Set(supplier_invoice_id),
        material_name: Set(material_name.to_string()),
        status: Set(crate::core::approval::STATUS_PENDING.to_string()),
        material_id: Set(None),
        reviewed_by: Set(None),
        reviewed_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    approval.insert(db).await.map_err(Into::into)
}

/// Creates a notification referencing an invoice.
pub async fn create_test_notification(
    db: &DatabaseConnection,
    company_id: &str,
    supplier_invoice_id: i64,
) -> Result<notification::Model> {
    let entry = notification::ActiveModel {
        company_id: Set(company_id.to_string()),
        kind: Set("price_approval".to_string()),
        supplier_invoice_id: Set(Some(supplier_invoice_id)),
        message: Set("Prijsafwijking gevonden op factuur".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}
