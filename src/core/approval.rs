//! Price approval business logic - pending-review records per deviating line.
//!
//! The extraction pipeline raises one pending record per (invoice, material
//! name) whose extracted price deviates from the catalog; this module finds
//! and resolves them on behalf of the reconciliation engine.

use crate::{
    entities::{PriceApproval, price_approval},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Approval waiting for a reviewer
pub const STATUS_PENDING: &str = "pending";
/// Approval confirmed; its terms went into the catalog
pub const STATUS_APPROVED: &str = "approved";
/// Approval dismissed
pub const STATUS_REJECTED: &str = "rejected";

/// Finds the pending approval for an invoice line, matching the material
/// name case-insensitively. Returns the first hit when several qualify.
pub async fn find_pending_approval(
    db: &DatabaseConnection,
    invoice_id: i64,
    material_name: &str,
) -> Result<Option<price_approval::Model>> {
    // Name comparison happens in memory: collations differ per backend,
    // the review queue per invoice is small
    let pending = PriceApproval::find()
        .filter(price_approval::Column::SupplierInvoiceId.eq(invoice_id))
        .filter(price_approval::Column::Status.eq(STATUS_PENDING))
        .all(db)
        .await?;

    let wanted = material_name.to_lowercase();
    Ok(pending
        .into_iter()
        .find(|approval| approval.material_name.to_lowercase() == wanted))
}

/// Lists a company's pending approvals, newest first.
pub async fn list_pending_for_company(
    db: &DatabaseConnection,
    company_id: &str,
) -> Result<Vec<price_approval::Model>> {
    PriceApproval::find()
        .filter(price_approval::Column::CompanyId.eq(company_id))
        .filter(price_approval::Column::Status.eq(STATUS_PENDING))
        .order_by_desc(price_approval::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves an approval record, stamping reviewer, time, and the resolved
/// material.
///
/// # Errors
/// Returns an error if the record no longer exists or the update fails.
pub async fn resolve_approval(
    db: &DatabaseConnection,
    approval_id: i64,
    status: &str,
    reviewed_by: &str,
    material_id: Option<i64>,
) -> Result<price_approval::Model> {
    let mut approval: price_approval::ActiveModel = PriceApproval::find_by_id(approval_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ApprovalNotFound {
            id: approval_id.to_string(),
        })?
        .into();

    approval.status = Set(status.to_string());
    approval.reviewed_by = Set(Some(reviewed_by.to_string()));
    approval.reviewed_at = Set(Some(Utc::now()));
    approval.material_id = Set(material_id);

    approval.update(db).await.map_err(Into::into)
}

/// Deletes an approval record. A record that is already gone counts as
/// success.
pub async fn delete_approval(db: &DatabaseConnection, approval_id: i64) -> Result<()> {
    let result = PriceApproval::delete_by_id(approval_id).exec(db).await?;
    if result.rows_affected == 0 {
        tracing::debug!(approval_id, "approval already gone, delete is a no-op");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_approval, create_test_invoice, setup_test_db};

    #[tokio::test]
    async fn test_find_pending_approval_case_insensitive() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db, "c1", "Leverancier", vec![]).await?;
        let approval = create_test_approval(&db, "c1", invoice.id, "Muurverf Wit").await?;

        let found = find_pending_approval(&db, invoice.id, "MUURVERF WIT").await?;
        assert_eq!(found.map(|a| a.id), Some(approval.id));

        let missing = find_pending_approval(&db, invoice.id, "Lakverf").await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_pending_ignores_resolved() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db, "c1", "Leverancier", vec![]).await?;
        let approval = create_test_approval(&db, "c1", invoice.id, "Muurverf Wit").await?;

        resolve_approval(&db, approval.id, STATUS_APPROVED, "tester", Some(7)).await?;

        let found = find_pending_approval(&db, invoice.id, "Muurverf Wit").await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_approval_stamps_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db, "c1", "Leverancier", vec![]).await?;
        let approval = create_test_approval(&db, "c1", invoice.id, "Muurverf Wit").await?;

        let resolved =
            resolve_approval(&db, approval.id, STATUS_APPROVED, "tester", Some(42)).await?;

        assert_eq!(resolved.status, STATUS_APPROVED);
        assert_eq!(resolved.reviewed_by.as_deref(), Some("tester"));
        assert!(resolved.reviewed_at.is_some());
        assert_eq!(resolved.material_id, Some(42));
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_missing_approval_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let result = resolve_approval(&db, 999, STATUS_APPROVED, "tester", None).await;
        assert!(matches!(result, Err(Error::ApprovalNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_pending_scoped_to_company() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db, "c1", "Leverancier", vec![]).await?;
        create_test_approval(&db, "c1", invoice.id, "Muurverf Wit").await?;
        create_test_approval(&db, "other", invoice.id, "Lakverf").await?;

        let pending = list_pending_for_company(&db, "c1").await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].material_name, "Muurverf Wit");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_approval_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let invoice = create_test_invoice(&db, "c1", "Leverancier", vec![]).await?;
        let approval = create_test_approval(&db, "c1", invoice.id, "Muurverf Wit").await?;

        delete_approval(&db, approval.id).await?;
        delete_approval(&db, approval.id).await?;
        Ok(())
    }
}
