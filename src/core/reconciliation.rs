//! Reconciliation engine - the approval workflow that writes the catalog.
//!
//! This is the only component with side effects: everything upstream of a
//! reviewer's decision (normalizing, matching, classifying) is pure and
//! read-only. Approving a line item materializes its terms into the catalog
//! (create-or-overwrite), marks the line, and resolves the pending price
//! approval; rejecting skips the catalog entirely.
//!
//! Every step is an independent write with no surrounding transaction and
//! no rollback: when the catalog write succeeds but a later step fails, the
//! catalog keeps the new terms while the line and the approval record stay
//! stale. Each step reports its own failure to the caller, which should
//! refresh catalog, invoice, and approvals from storage after every call.

use crate::{
    core::{approval, classifier, invoice, matcher, material, sku},
    entities::{LineApprovalStatus, supplier_invoice},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{debug, info};

/// What an approve/reject call did to the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// The line named an unseen material; a catalog entry was created
    CreatedMaterial,
    /// The line matched an entry whose terms were overwritten
    UpdatedMaterial,
    /// The line was rejected; the catalog is untouched
    Rejected,
}

/// Result of one approve/reject call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalResult {
    /// What happened to the catalog
    pub outcome: ReconciliationOutcome,
    /// The catalog entry the line resolved to, when one exists
    pub material_id: Option<i64>,
    /// The resolved entry's SKU, when one exists
    pub sku: Option<String>,
}

/// Approves one line item, materializing its terms into the catalog.
///
/// Re-entering is allowed: approving an already-approved line re-runs the
/// catalog step. For a matched line that step is an idempotent overwrite;
/// for an unmatched line every call creates a new entry, so the first call
/// is what makes later calls match instead of create.
///
/// # Errors
/// Returns an error if the invoice lacks a company scope, if the invoice or
/// line item no longer exists, or if a persistence step fails. A failed
/// catalog write aborts before any other mutation; failures after it leave
/// the partial state described in the module docs.
pub async fn approve_line_item(
    db: &DatabaseConnection,
    invoice_id: i64,
    line_item_id: &str,
    reviewed_by: &str,
) -> Result<ApprovalResult> {
    let invoice = invoice::require_invoice(db, invoice_id).await?;
    if invoice.company_id.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("invoice {invoice_id} has no company scope"),
        });
    }
    let line_item = invoice
        .line_items
        .get(line_item_id)
        .ok_or_else(|| Error::LineItemNotFound {
            invoice_id,
            line_item_id: line_item_id.to_string(),
        })?
        .clone();

    let catalog = material::get_materials_for_company(db, &invoice.company_id).await?;
    let matched = matcher::find_matching_material(&line_item.name, &catalog, &invoice.company_id);

    let (outcome, entry) = match matched {
        Some(hit) => {
            info!(
                invoice_id,
                line_item_id,
                material_id = hit.id,
                "approving line item, overwriting matched catalog entry"
            );
            let updated =
                material::overwrite_material_terms(db, hit.id, &line_item, &invoice.supplier_name)
                    .await?;
            (ReconciliationOutcome::UpdatedMaterial, updated)
        }
        None => {
            let existing_skus = material::collect_skus_for_company(db, &invoice.company_id).await?;
            let new_sku =
                sku::generate_sku(&line_item.name, &invoice.supplier_name, &existing_skus);
            info!(
                invoice_id,
                line_item_id,
                sku = %new_sku,
                "approving line item, creating new catalog entry"
            );
            let created = material::create_material(
                db,
                material::NewMaterial {
                    company_id: invoice.company_id.clone(),
                    name: line_item.name.clone(),
                    category: line_item
                        .category
                        .clone()
                        .unwrap_or_else(|| material::CATEGORY_UNKNOWN.to_string()),
                    unit: line_item.unit.clone(),
                    price_excl_vat: line_item.unit_price,
                    discount_percentage: line_item.discount,
                    vat_rate: line_item.vat_rate,
                    sku: new_sku,
                    supplier: invoice.supplier_name.clone(),
                },
            )
            .await?;
            (ReconciliationOutcome::CreatedMaterial, created)
        }
    };

    invoice::set_line_item_status(db, invoice_id, line_item_id, LineApprovalStatus::Approved)
        .await?;

    resolve_pending_approval(
        db,
        invoice_id,
        &line_item.name,
        approval::STATUS_APPROVED,
        reviewed_by,
        Some(entry.id),
    )
    .await?;

    Ok(ApprovalResult {
        outcome,
        material_id: Some(entry.id),
        sku: Some(entry.sku),
    })
}

/// Rejects one line item. The catalog is never touched; only the line's
/// status and the pending price approval are updated.
///
/// # Errors
/// Returns an error if the invoice or line item no longer exists, or if a
/// persistence step fails.
pub async fn reject_line_item(
    db: &DatabaseConnection,
    invoice_id: i64,
    line_item_id: &str,
    reviewed_by: &str,
) -> Result<ApprovalResult> {
    let invoice = invoice::require_invoice(db, invoice_id).await?;
    let line_item = invoice
        .line_items
        .get(line_item_id)
        .ok_or_else(|| Error::LineItemNotFound {
            invoice_id,
            line_item_id: line_item_id.to_string(),
        })?
        .clone();

    info!(invoice_id, line_item_id, "rejecting line item");
    invoice::set_line_item_status(db, invoice_id, line_item_id, LineApprovalStatus::Rejected)
        .await?;

    resolve_pending_approval(
        db,
        invoice_id,
        &line_item.name,
        approval::STATUS_REJECTED,
        reviewed_by,
        None,
    )
    .await?;

    Ok(ApprovalResult {
        outcome: ReconciliationOutcome::Rejected,
        material_id: None,
        sku: None,
    })
}

/// Approves an invoice as a whole.
///
/// This is the coarse-grained decision: it stamps the invoice itself and
/// deliberately does not cascade into the line items' own approval states.
pub async fn approve_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
    approved_by: &str,
) -> Result<supplier_invoice::Model> {
    set_invoice_decision(db, invoice_id, invoice::STATUS_APPROVED, approved_by).await
}

/// Rejects an invoice as a whole. Does not cascade into line items.
pub async fn reject_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
    approved_by: &str,
) -> Result<supplier_invoice::Model> {
    set_invoice_decision(db, invoice_id, invoice::STATUS_REJECTED, approved_by).await
}

async fn set_invoice_decision(
    db: &DatabaseConnection,
    invoice_id: i64,
    status: &str,
    approved_by: &str,
) -> Result<supplier_invoice::Model> {
    let invoice = invoice::require_invoice(db, invoice_id).await?;

    info!(invoice_id, status, "recording invoice-level decision");
    let mut active: supplier_invoice::ActiveModel = invoice.into();
    active.status = Set(status.to_string());
    active.approved_by = Set(Some(approved_by.to_string()));
    active.approved_at = Set(Some(Utc::now()));
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Resolves the line's pending price approval when one exists; a missing
/// record is the normal case for lines whose price never deviated.
async fn resolve_pending_approval(
    db: &DatabaseConnection,
    invoice_id: i64,
    material_name: &str,
    status: &str,
    reviewed_by: &str,
    material_id: Option<i64>,
) -> Result<()> {
    match approval::find_pending_approval(db, invoice_id, material_name).await? {
        Some(pending) => {
            approval::resolve_approval(db, pending.id, status, reviewed_by, material_id).await?;
        }
        None => {
            debug!(invoice_id, material_name, "no pending price approval to resolve");
        }
    }
    Ok(())
}

/// Classifies a line item against the company catalog without mutating
/// anything, for presentation ahead of the reviewer's decision.
pub async fn classify_line_item(
    db: &DatabaseConnection,
    invoice_id: i64,
    line_item_id: &str,
) -> Result<classifier::Classification> {
    let invoice = invoice::require_invoice(db, invoice_id).await?;
    let line_item = invoice
        .line_items
        .get(line_item_id)
        .ok_or_else(|| Error::LineItemNotFound {
            invoice_id,
            line_item_id: line_item_id.to_string(),
        })?;

    let catalog = material::get_materials_for_company(db, &invoice.company_id).await?;
    let matched = matcher::find_matching_material(&line_item.name, &catalog, &invoice.company_id);
    Ok(classifier::classify(line_item, matched))
}
