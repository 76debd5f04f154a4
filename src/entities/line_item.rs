//! Line item - One row of a supplier invoice, embedded as JSON.
//!
//! Line items are produced by the extraction pipeline and stored on the
//! invoice record as an ordered JSON collection rather than as a table of
//! their own. Every item carries a stable `id` assigned at extraction time;
//! the engine addresses items by that id, never by position.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Review state of a single line item. Absent means not yet reviewed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineApprovalStatus {
    /// The reviewer confirmed the line; its terms flow into the catalog
    Approved,
    /// The reviewer dismissed the line; the catalog is untouched
    Rejected,
}

/// One extracted invoice row.
///
/// Derived fields obey `unit_price = gross_unit_price * (1 - discount/100)`
/// and `total_price = unit_price * quantity`, both rounded to cents and
/// recomputed on every edit to quantity, price, or discount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable identifier assigned at extraction time
    pub id: String,
    /// Material name as printed on the invoice
    pub name: String,
    /// Supplier's own article code, when the extractor found one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Purchased quantity
    pub quantity: f64,
    /// Sales unit (e.g., "l", "stuk")
    pub unit: String,
    /// List price per unit before discount, excluding VAT
    pub gross_unit_price: f64,
    /// Net price per unit after discount, excluding VAT (derived)
    pub unit_price: f64,
    /// Supplier discount percentage (0-100)
    pub discount: f64,
    /// VAT percentage: 0, 6, or 21
    pub vat_rate: i32,
    /// Net line total (derived)
    pub total_price: f64,
    /// Category guessed by the extractor, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Extraction confidence (0-1), if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Review state; `None` until a reviewer acts on the line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<LineApprovalStatus>,
}

/// The ordered line-item collection as stored on the invoice record.
///
/// Wrapping the vector lets SeaORM persist it as a single JSON column; the
/// whole collection is rewritten on every line-item change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LineItems(pub Vec<LineItem>);

impl LineItems {
    /// Finds a line item by its stable identifier.
    #[must_use]
    pub fn get(&self, line_item_id: &str) -> Option<&LineItem> {
        self.0.iter().find(|item| item.id == line_item_id)
    }

    /// Finds a line item mutably by its stable identifier.
    pub fn get_mut(&mut self, line_item_id: &str) -> Option<&mut LineItem> {
        self.0.iter_mut().find(|item| item.id == line_item_id)
    }
}
