//! Material entity - Represents one entry of a company's material catalog.
//!
//! The catalog is the company's reusable list of materials with current
//! price, discount, and VAT terms. Entries are created lazily by the
//! reconciliation engine on first approval of a previously unseen name and
//! overwritten on later approvals of matching names; price history is not
//! retained. The `sku` is unique within a company by convention.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the catalog entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tenant boundary - every lookup and mutation is restricted to one company
    pub company_id: String,
    /// Material name as it appears on supplier invoices (e.g., "Muurverf Extra Mat")
    pub name: String,
    /// Category for organization (e.g., "verf", "unknown")
    pub category: String,
    /// Sales unit (e.g., "l", "stuk")
    pub unit: String,
    /// Current list price per unit, excluding VAT
    pub price_excl_vat: f64,
    /// Current supplier discount as an integer-valued percentage (0-100)
    pub discount_percentage: f64,
    /// VAT percentage applied to the price: 0, 6, or 21
    pub vat_rate: i32,
    /// Stable catalog identifier (e.g., "ABC-MUURV-0004")
    pub sku: String,
    /// Supplier the current terms were taken from
    pub supplier: String,
    /// Whether the entry is offered for matching and display
    pub is_active: bool,
    /// When the entry was created
    pub created_at: DateTimeUtc,
    /// When the entry was last modified
    pub updated_at: DateTimeUtc,
}

/// Materials reference no other table; the company is an external resource
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
