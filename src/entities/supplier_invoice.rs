//! Supplier invoice entity - An extracted invoice with its line items.
//!
//! The invoice carries its ordered line-item collection as a JSON column
//! (see [`super::line_item`]). Invoice `status` is coarse-grained review
//! state and is independent of the per-line-item `approval_status`:
//! `"pending_approval"`, `"needs_quick_review"`, `"needs_manual_review"`,
//! `"approved"`, `"rejected"`, or `"credit_note"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::line_item::LineItems;

/// Supplier invoice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_invoices")]
pub struct Model {
    /// Unique identifier for the invoice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tenant boundary - the company the invoice belongs to
    pub company_id: String,
    /// Supplier the invoice came from (e.g., "Akzo Groothandel")
    pub supplier_name: String,
    /// Supplier's invoice number, when the extractor found one
    pub invoice_number: Option<String>,
    /// Coarse review state of the whole invoice
    pub status: String,
    /// Ordered line-item collection, stored as JSON in extraction order
    pub line_items: LineItems,
    /// Who approved or rejected the invoice as a whole
    pub approved_by: Option<String>,
    /// When the invoice-level decision was made
    pub approved_at: Option<DateTimeUtc>,
    /// When the invoice was created by the extraction pipeline
    pub created_at: DateTimeUtc,
    /// When the invoice record was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between the invoice and its dependent records
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Price approvals raised for lines of this invoice
    #[sea_orm(has_many = "super::price_approval::Entity")]
    PriceApproval,
}

impl Related<super::price_approval::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PriceApproval.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
