//! Review feed generation - the read-only view ahead of approval decisions.
//!
//! This module assembles, per invoice, the classification of every line
//! item against the company catalog plus summary counts. All functions are
//! framework-agnostic and return structured data that a presentation layer
//! formats; nothing here mutates storage.

use crate::{
    core::{
        classifier::{self, ChangeCategory, Classification, Favorability},
        invoice, matcher, material,
    },
    entities::LineItem,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// One line item with its match and classification.
#[derive(Debug, Clone)]
pub struct LineReview {
    /// The line item under review
    pub line_item: LineItem,
    /// Catalog entry the name matched, if any
    pub matched_material_id: Option<i64>,
    /// How the line's terms differ from the catalog
    pub classification: Classification,
}

/// Represents a full review feed for one invoice.
#[derive(Debug, Clone)]
pub struct InvoiceReview {
    /// The invoice being reviewed
    pub invoice_id: i64,
    /// Supplier the invoice came from
    pub supplier_name: String,
    /// Coarse invoice status
    pub status: String,
    /// Per-line classifications, in extraction order
    pub lines: Vec<LineReview>,
    /// Lines naming a material the catalog has never seen
    pub new_material_count: usize,
    /// Lines with favorable drift
    pub favorable_count: usize,
    /// Lines with unfavorable drift
    pub unfavorable_count: usize,
    /// Lines flagged for a human look
    pub flagged_count: usize,
    /// Lines not yet approved or rejected
    pub pending_count: usize,
}

/// Builds the review feed for an invoice.
///
/// Retrieves the invoice and the company catalog, classifies every line
/// item, and tallies the summary counts the review screen shows.
///
/// # Errors
/// Returns an error if the invoice no longer exists or a read fails.
pub async fn build_invoice_review(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<InvoiceReview> {
    let invoice = invoice::require_invoice(db, invoice_id).await?;
    let catalog = material::get_materials_for_company(db, &invoice.company_id).await?;

    let mut lines = Vec::with_capacity(invoice.line_items.0.len());
    let mut new_material_count = 0;
    let mut favorable_count = 0;
    let mut unfavorable_count = 0;
    let mut flagged_count = 0;
    let mut pending_count = 0;

    for item in &invoice.line_items.0 {
        let matched = matcher::find_matching_material(&item.name, &catalog, &invoice.company_id);
        let classification = classifier::classify(item, matched);

        if classification.category == ChangeCategory::NewMaterial {
            new_material_count += 1;
        }
        match classification.category.favorability() {
            Favorability::Favorable => favorable_count += 1,
            Favorability::Unfavorable => unfavorable_count += 1,
            Favorability::Flagged => flagged_count += 1,
            Favorability::Neutral => {}
        }
        if item.approval_status.is_none() {
            pending_count += 1;
        }

        lines.push(LineReview {
            line_item: item.clone(),
            matched_material_id: matched.map(|entry| entry.id),
            classification,
        });
    }

    Ok(InvoiceReview {
        invoice_id: invoice.id,
        supplier_name: invoice.supplier_name,
        status: invoice.status,
        lines,
        new_material_count,
        favorable_count,
        unfavorable_count,
        flagged_count,
        pending_count,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::reconciliation;
    use crate::test_utils::{
        create_custom_material, create_test_invoice, make_line_item, setup_test_db,
    };

    #[tokio::test]
    async fn test_review_classifies_each_line() -> Result<()> {
        let db = setup_test_db().await?;
        // Catalog: 10.00 at 0% discount
        let known = create_custom_material(&db, "c1", "Muurverf Wit", 10.0, 0.0).await?;
        let invoice = create_test_invoice(
            &db,
            "c1",
            "Leverancier",
            vec![
                // Matches, price up: 12.00 vs 10.00
                make_line_item("li-1", "Muurverf Wit", 12.0, 0.0, 1.0),
                // No catalog entry
                make_line_item("li-2", "Plamuur Fijn", 5.0, 0.0, 1.0),
                // Matches, unchanged
                make_line_item("li-3", "Muurverf Wit", 10.0, 0.0, 1.0),
            ],
        )
        .await?;

        let review = build_invoice_review(&db, invoice.id).await?;

        assert_eq!(review.lines.len(), 3);
        assert_eq!(review.lines[0].matched_material_id, Some(known.id));
        assert_eq!(review.lines[0].classification.category, ChangeCategory::PriceUp);
        assert_eq!(review.lines[1].matched_material_id, None);
        assert_eq!(
            review.lines[1].classification.category,
            ChangeCategory::NewMaterial
        );
        assert_eq!(review.lines[2].classification.category, ChangeCategory::NoChange);

        assert_eq!(review.new_material_count, 1);
        assert_eq!(review.unfavorable_count, 1);
        assert_eq!(review.favorable_count, 0);
        assert_eq!(review.flagged_count, 0);
        assert_eq!(review.pending_count, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_review_pending_count_follows_decisions() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(
            &db,
            "c1",
            "Leverancier",
            vec![
                make_line_item("li-1", "Muurverf Wit", 10.0, 0.0, 1.0),
                make_line_item("li-2", "Plamuur Fijn", 5.0, 0.0, 1.0),
            ],
        )
        .await?;

        reconciliation::approve_line_item(&db, invoice.id, "li-1", "tester").await?;

        let review = build_invoice_review(&db, invoice.id).await?;
        assert_eq!(review.pending_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_review_missing_invoice() -> Result<()> {
        let db = setup_test_db().await?;
        let result = build_invoice_review(&db, 999).await;
        assert!(result.is_err());
        Ok(())
    }
}
