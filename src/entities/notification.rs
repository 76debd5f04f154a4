//! Notification entity - User-facing notices raised by invoice processing.
//!
//! Notifications are created by the extraction pipeline (out of scope
//! here); this crate only reads and deletes them, as cleanup when the
//! invoice they reference is deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tenant boundary - the company the notification belongs to
    pub company_id: String,
    /// Notification kind (e.g., `"price_approval"`, `"invoice_ready"`)
    pub kind: String,
    /// Invoice the notification refers to, if any
    pub supplier_invoice_id: Option<i64>,
    /// Human-readable notification text
    pub message: String,
    /// When the notification was raised
    pub created_at: DateTimeUtc,
}

/// Notifications carry only a loose invoice reference, no enforced relation
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
