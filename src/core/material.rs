//! Material catalog business logic - Handles all catalog operations.
//!
//! This module provides functions for creating, retrieving, updating, and
//! deleting catalog entries within a company scope. Catalog writes come
//! from two places only: the reconciliation engine (on line-item approval)
//! and direct manual edits. All functions are async and return Result types
//! for proper error handling throughout the system.

use crate::{
    entities::{LineItem, Material, material},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Category assigned when the extractor did not guess one.
pub const CATEGORY_UNKNOWN: &str = "unknown";

/// Fields for a new catalog entry.
#[derive(Debug, Clone)]
pub struct NewMaterial {
    /// Company the entry belongs to
    pub company_id: String,
    /// Material name as it appears on invoices
    pub name: String,
    /// Category for organization
    pub category: String,
    /// Sales unit
    pub unit: String,
    /// Net list price per unit
    pub price_excl_vat: f64,
    /// Supplier discount percentage (0-100)
    pub discount_percentage: f64,
    /// VAT percentage
    pub vat_rate: i32,
    /// Stable catalog identifier
    pub sku: String,
    /// Supplier the terms came from
    pub supplier: String,
}

/// Optional updates for a manual catalog edit; `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct MaterialPatch {
    /// New material name
    pub name: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New sales unit
    pub unit: Option<String>,
    /// New net list price
    pub price_excl_vat: Option<f64>,
    /// New discount percentage
    pub discount_percentage: Option<f64>,
    /// New VAT percentage
    pub vat_rate: Option<i32>,
    /// New supplier
    pub supplier: Option<String>,
    /// Activate or deactivate the entry
    pub is_active: Option<bool>,
}

/// Retrieves every catalog entry of a company, ordered alphabetically by name.
///
/// This is the catalog slice the matcher and the review feed operate on;
/// the name ordering makes within-tier tie-breaking deterministic.
pub async fn get_materials_for_company(
    db: &DatabaseConnection,
    company_id: &str,
) -> Result<Vec<material::Model>> {
    Material::find()
        .filter(material::Column::CompanyId.eq(company_id))
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific catalog entry by its unique ID.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Collects every SKU in use within a company, for sequence scanning.
pub async fn collect_skus_for_company(
    db: &DatabaseConnection,
    company_id: &str,
) -> Result<Vec<String>> {
    Ok(get_materials_for_company(db, company_id)
        .await?
        .into_iter()
        .map(|entry| entry.sku)
        .collect())
}

/// Creates a new catalog entry, performing input validation.
///
/// New entries are always active. The caller supplies the SKU (normally
/// from [`crate::core::sku::generate_sku`]).
///
/// # Errors
/// Returns an error if:
/// - The company id or material name is empty or whitespace-only
/// - The price or discount is negative, not finite, or the discount exceeds 100
/// - The database insert operation fails
pub async fn create_material(
    db: &DatabaseConnection,
    fields: NewMaterial,
) -> Result<material::Model> {
    if fields.company_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "Material requires a company scope".to_string(),
        });
    }
    if fields.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Material name cannot be empty".to_string(),
        });
    }
    validate_price(fields.price_excl_vat)?;
    validate_discount(fields.discount_percentage)?;

    let now = Utc::now();
    let material = material::ActiveModel {
        company_id: Set(fields.company_id),
        name: Set(fields.name.trim().to_string()),
        category: Set(fields.category),
        unit: Set(fields.unit),
        price_excl_vat: Set(fields.price_excl_vat),
        discount_percentage: Set(fields.discount_percentage),
        vat_rate: Set(fields.vat_rate),
        sku: Set(fields.sku),
        supplier: Set(fields.supplier),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    material.insert(db).await.map_err(Into::into)
}

/// Applies a manual catalog edit, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - A patched name is empty or whitespace-only
/// - A patched price or discount is out of range
/// - The entry does not exist
/// - The database update operation fails
pub async fn update_material(
    db: &DatabaseConnection,
    material_id: i64,
    patch: MaterialPatch,
) -> Result<material::Model> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Material name cannot be empty".to_string(),
            });
        }
    }
    if let Some(price) = patch.price_excl_vat {
        validate_price(price)?;
    }
    if let Some(discount) = patch.discount_percentage {
        validate_discount(discount)?;
    }

    let mut material: material::ActiveModel = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::MaterialNotFound {
            id: material_id.to_string(),
        })?
        .into();

    if let Some(name) = patch.name {
        material.name = Set(name.trim().to_string());
    }
    if let Some(category) = patch.category {
        material.category = Set(category);
    }
    if let Some(unit) = patch.unit {
        material.unit = Set(unit);
    }
    if let Some(price) = patch.price_excl_vat {
        material.price_excl_vat = Set(price);
    }
    if let Some(discount) = patch.discount_percentage {
        material.discount_percentage = Set(discount);
    }
    if let Some(vat_rate) = patch.vat_rate {
        material.vat_rate = Set(vat_rate);
    }
    if let Some(supplier) = patch.supplier {
        material.supplier = Set(supplier);
    }
    if let Some(is_active) = patch.is_active {
        material.is_active = Set(is_active);
    }
    material.updated_at = Set(Utc::now());

    material.update(db).await.map_err(Into::into)
}

/// Overwrites a catalog entry's commercial terms with an approved line item's.
///
/// This is the engine's write path: price, discount, VAT rate, category, and
/// supplier are replaced wholesale with the line's current values. Previous
/// terms are not retained anywhere.
///
/// # Errors
/// Returns an error if the entry does not exist or the update fails.
pub async fn overwrite_material_terms(
    db: &DatabaseConnection,
    material_id: i64,
    line_item: &LineItem,
    supplier: &str,
) -> Result<material::Model> {
    let mut material: material::ActiveModel = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::MaterialNotFound {
            id: material_id.to_string(),
        })?
        .into();

    material.price_excl_vat = Set(line_item.unit_price);
    material.discount_percentage = Set(line_item.discount);
    material.vat_rate = Set(line_item.vat_rate);
    material.category = Set(line_item
        .category
        .clone()
        .unwrap_or_else(|| CATEGORY_UNKNOWN.to_string()));
    material.supplier = Set(supplier.to_string());
    material.updated_at = Set(Utc::now());

    material.update(db).await.map_err(Into::into)
}

/// Hard-deletes a catalog entry.
///
/// An entry that is already gone counts as success: deletes are idempotent
/// so a repeated or raced delete never fails the caller.
pub async fn delete_material(db: &DatabaseConnection, material_id: i64) -> Result<()> {
    let result = Material::delete_by_id(material_id).exec(db).await?;
    if result.rows_affected == 0 {
        tracing::debug!(material_id, "material already gone, delete is a no-op");
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

fn validate_discount(discount: f64) -> Result<()> {
    if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
        return Err(Error::InvalidAmount { amount: discount });
    }
    Ok(())
}
