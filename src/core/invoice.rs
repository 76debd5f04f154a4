//! Supplier invoice business logic - invoice access and line-item arithmetic.
//!
//! Line items live on the invoice record as one JSON collection, so every
//! line-item change rewrites the whole collection. The derived-amount
//! invariants (`unit_price`, `total_price`) are enforced here and nowhere
//! else: every edit path goes through [`recompute_derived`].

use crate::{
    entities::{
        LineApprovalStatus, LineItem, Notification, PriceApproval, SupplierInvoice, notification,
        price_approval, supplier_invoice,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::time::Duration;
use tracing::{debug, info};

/// Invoice waiting for its first review pass
pub const STATUS_PENDING_APPROVAL: &str = "pending_approval";
/// Extraction was confident; a quick confirmation suffices
pub const STATUS_NEEDS_QUICK_REVIEW: &str = "needs_quick_review";
/// Extraction was unsure; every line needs a human look
pub const STATUS_NEEDS_MANUAL_REVIEW: &str = "needs_manual_review";
/// Invoice approved as a whole
pub const STATUS_APPROVED: &str = "approved";
/// Invoice rejected as a whole
pub const STATUS_REJECTED: &str = "rejected";
/// Negative invoice correcting an earlier one
pub const STATUS_CREDIT_NOTE: &str = "credit_note";

/// Rounds a monetary amount to two decimals.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Recomputes a line item's derived amounts from its editable fields.
///
/// `unit_price = gross_unit_price * (1 - discount/100)` and
/// `total_price = unit_price * quantity`, both rounded to cents.
pub fn recompute_derived(item: &mut LineItem) {
    item.unit_price = round2(item.gross_unit_price * (1.0 - item.discount / 100.0));
    item.total_price = round2(item.unit_price * item.quantity);
}

/// Retrieves an invoice by its unique ID.
pub async fn get_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Option<supplier_invoice::Model>> {
    SupplierInvoice::find_by_id(invoice_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an invoice by ID, failing when it no longer exists.
pub async fn require_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<supplier_invoice::Model> {
    get_invoice(db, invoice_id)
        .await?
        .ok_or_else(|| Error::InvoiceNotFound {
            id: invoice_id.to_string(),
        })
}

/// Sets the review status of one line item, rewriting the whole collection.
///
/// # Errors
/// Returns an error if the invoice or the line item no longer exists, or if
/// the write fails.
pub async fn set_line_item_status(
    db: &DatabaseConnection,
    invoice_id: i64,
    line_item_id: &str,
    status: LineApprovalStatus,
) -> Result<supplier_invoice::Model> {
    let invoice = require_invoice(db, invoice_id).await?;

    let mut line_items = invoice.line_items.clone();
    let item = line_items
        .get_mut(line_item_id)
        .ok_or_else(|| Error::LineItemNotFound {
            invoice_id,
            line_item_id: line_item_id.to_string(),
        })?;
    item.approval_status = Some(status);

    let mut active: supplier_invoice::ActiveModel = invoice.into();
    active.line_items = Set(line_items);
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Applies a manual edit to a line item's quantity, gross price, or discount,
/// recomputing the derived amounts.
///
/// # Errors
/// Returns an error if:
/// - A patched value is not finite, the quantity is not positive, or the
///   discount is outside 0-100
/// - The invoice or the line item no longer exists
/// - The write fails
pub async fn edit_line_item_pricing(
    db: &DatabaseConnection,
    invoice_id: i64,
    line_item_id: &str,
    quantity: Option<f64>,
    gross_unit_price: Option<f64>,
    discount: Option<f64>,
) -> Result<supplier_invoice::Model> {
    if let Some(quantity) = quantity {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(Error::InvalidAmount { amount: quantity });
        }
    }
    if let Some(price) = gross_unit_price {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidAmount { amount: price });
        }
    }
    if let Some(discount) = discount {
        if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
            return Err(Error::InvalidAmount { amount: discount });
        }
    }

    let invoice = require_invoice(db, invoice_id).await?;

    let mut line_items = invoice.line_items.clone();
    let item = line_items
        .get_mut(line_item_id)
        .ok_or_else(|| Error::LineItemNotFound {
            invoice_id,
            line_item_id: line_item_id.to_string(),
        })?;

    if let Some(quantity) = quantity {
        item.quantity = quantity;
    }
    if let Some(price) = gross_unit_price {
        item.gross_unit_price = price;
    }
    if let Some(discount) = discount {
        item.discount = discount;
    }
    recompute_derived(item);

    let mut active: supplier_invoice::ActiveModel = invoice.into();
    active.line_items = Set(line_items);
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Removes one line item from an invoice.
///
/// A vanished invoice or an unknown line id makes the delete a no-op, like
/// every other delete in the crate.
pub async fn delete_line_item(
    db: &DatabaseConnection,
    invoice_id: i64,
    line_item_id: &str,
) -> Result<()> {
    let Some(invoice) = get_invoice(db, invoice_id).await? else {
        debug!(invoice_id, "invoice already gone, line delete is a no-op");
        return Ok(());
    };

    let mut line_items = invoice.line_items.clone();
    let before = line_items.0.len();
    line_items.0.retain(|item| item.id != line_item_id);
    if line_items.0.len() == before {
        debug!(invoice_id, line_item_id, "line item already gone, delete is a no-op");
        return Ok(());
    }

    let mut active: supplier_invoice::ActiveModel = invoice.into();
    active.line_items = Set(line_items);
    active.updated_at = Set(Utc::now());
    active.update(db).await?;
    Ok(())
}

/// Deletes an invoice together with its dependent records.
///
/// Notifications referencing the invoice and price approvals raised for it
/// are removed first, then the invoice itself. An invoice that is already
/// gone counts as success.
pub async fn delete_invoice(db: &DatabaseConnection, invoice_id: i64) -> Result<()> {
    let notifications = Notification::find()
        .filter(notification::Column::SupplierInvoiceId.eq(invoice_id))
        .all(db)
        .await?;
    for entry in notifications {
        Notification::delete_by_id(entry.id).exec(db).await?;
    }

    let approvals = PriceApproval::find()
        .filter(price_approval::Column::SupplierInvoiceId.eq(invoice_id))
        .all(db)
        .await?;
    for entry in approvals {
        PriceApproval::delete_by_id(entry.id).exec(db).await?;
    }

    let result = SupplierInvoice::delete_by_id(invoice_id).exec(db).await?;
    if result.rows_affected == 0 {
        debug!(invoice_id, "invoice already gone, delete is a no-op");
    }
    Ok(())
}

/// Deletes a batch of invoices sequentially.
///
/// Items are processed one by one with a pause in between, to stay friendly
/// to storage-backend rate limits. Invoices already deleted by an earlier,
/// partially completed run are skipped over without error. Returns the
/// number of processed ids.
pub async fn bulk_delete_invoices(
    db: &DatabaseConnection,
    invoice_ids: &[i64],
    delay_ms: u64,
) -> Result<usize> {
    info!(count = invoice_ids.len(), "bulk deleting invoices");

    for (index, &invoice_id) in invoice_ids.iter().enumerate() {
        delete_invoice(db, invoice_id).await?;
        if delay_ms > 0 && index + 1 < invoice_ids.len() {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }

    Ok(invoice_ids.len())
}
