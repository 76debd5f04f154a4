//! Material price approval entity - One pending review per deviating line.
//!
//! The extraction pipeline raises one record per (invoice, material name)
//! whose extracted price deviates from the catalog. The reconciliation
//! engine resolves the record when a reviewer approves or rejects the
//! corresponding line item, stamping reviewer, time, and the resolved
//! material. `status` is `"pending"`, `"approved"`, or `"rejected"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material price approval database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_price_approvals")]
pub struct Model {
    /// Unique identifier for the approval record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tenant boundary - the company the approval belongs to
    pub company_id: String,
    /// Invoice whose line raised this approval
    pub supplier_invoice_id: i64,
    /// Material name as printed on the invoice line
    pub material_name: String,
    /// Review state: `"pending"`, `"approved"`, or `"rejected"`
    pub status: String,
    /// Catalog entry the approval resolved to, once reviewed
    pub material_id: Option<i64>,
    /// Who resolved the approval
    pub reviewed_by: Option<String>,
    /// When the approval was resolved
    pub reviewed_at: Option<DateTimeUtc>,
    /// When the extraction pipeline raised the approval
    pub created_at: DateTimeUtc,
}

/// Defines relationships between the approval and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each approval belongs to one supplier invoice
    #[sea_orm(
        belongs_to = "super::supplier_invoice::Entity",
        from = "Column::SupplierInvoiceId",
        to = "super::supplier_invoice::Column::Id"
    )]
    SupplierInvoice,
}

impl Related<super::supplier_invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierInvoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
