//! Material matching - looks up a catalog entry for an invoice line name.
//!
//! Matching is evaluated in strict tier order over the company-scoped
//! catalog; the first hit wins and no similarity score is computed:
//!
//! 1. exact name equality, ignoring case
//! 2. fingerprint equality (see [`crate::core::normalizer`])
//! 3. fingerprint containment either way, only when both fingerprints are
//!    long enough to make containment meaningful
//!
//! No hit means the line names a material the catalog has never seen.

use crate::core::normalizer::normalize;
use crate::entities::material;

/// Tier 3 is skipped for fingerprints shorter than this; substring
/// containment on short names produces false positives ("lak" is inside
/// half the catalog).
const MIN_CONTAINMENT_LEN: usize = 6;

/// Finds the catalog entry matching an invoice line name, if any.
///
/// Only entries belonging to `company_id` are eligible. Ties within a tier
/// resolve by catalog iteration order; callers that load the catalog through
/// [`crate::core::material::get_materials_for_company`] get name order.
#[must_use]
pub fn find_matching_material<'a>(
    item_name: &str,
    catalog: &'a [material::Model],
    company_id: &str,
) -> Option<&'a material::Model> {
    let scoped: Vec<&material::Model> = catalog
        .iter()
        .filter(|entry| entry.company_id == company_id)
        .collect();

    // Tier 1: exact, case-insensitive
    let item_lower = item_name.to_lowercase();
    if let Some(hit) = scoped
        .iter()
        .find(|entry| entry.name.to_lowercase() == item_lower)
        .copied()
    {
        return Some(hit);
    }

    let item_fingerprint = normalize(item_name);

    // Tier 2: normalized exact. An empty fingerprint (all-noise name) would
    // "equal" every other all-noise name, so it never matches here.
    if !item_fingerprint.is_empty() {
        if let Some(hit) = scoped
            .iter()
            .find(|entry| normalize(&entry.name) == item_fingerprint)
            .copied()
        {
            return Some(hit);
        }
    }

    // Tier 3: substring containment, both fingerprints long enough
    if item_fingerprint.len() >= MIN_CONTAINMENT_LEN {
        if let Some(hit) = scoped
            .iter()
            .find(|entry| {
                let entry_fingerprint = normalize(&entry.name);
                entry_fingerprint.len() >= MIN_CONTAINMENT_LEN
                    && (entry_fingerprint.contains(&item_fingerprint)
                        || item_fingerprint.contains(&entry_fingerprint))
            })
            .copied()
        {
            return Some(hit);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::Utc;

    fn catalog_entry(id: i64, company_id: &str, name: &str) -> material::Model {
        let now = Utc::now();
        material::Model {
            id,
            company_id: company_id.to_string(),
            name: name.to_string(),
            category: "verf".to_string(),
            unit: "l".to_string(),
            price_excl_vat: 10.0,
            discount_percentage: 0.0,
            vat_rate: 21,
            sku: format!("TST-ENTRY-{id:04}"),
            supplier: "Testleverancier".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_tier1_exact_case_insensitive() {
        let catalog = vec![catalog_entry(1, "c1", "Muurverf Wit")];
        let hit = find_matching_material("muurverf wit", &catalog, "c1").unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_tier1_preferred_over_later_tiers() {
        // "muurverfwit" would match "Muurverf Wit" on tier 3 (containment),
        // but the exact-case entry must win because tier 1 runs first.
        let catalog = vec![
            catalog_entry(1, "c1", "Muurverf Wit"),
            catalog_entry(2, "c1", "muurverfwit"),
        ];
        let hit = find_matching_material("muurverfwit", &catalog, "c1").unwrap();
        assert_eq!(hit.id, 2);
    }

    #[test]
    fn test_tier2_normalized_equality() {
        let catalog = vec![catalog_entry(1, "c1", "Muurverf Extra Mat 10L")];
        let hit = find_matching_material("Muurverf Extra Mat 2,5L", &catalog, "c1").unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_tier3_containment() {
        let catalog = vec![catalog_entry(1, "c1", "Muurverf Extra Mat")];
        // "muurverfextramatzijdeglans" contains "muurverfextramat"
        let hit =
            find_matching_material("Muurverf Extra Mat Zijdeglans", &catalog, "c1").unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_tier3_short_fingerprints_never_match() {
        // "lak" (3 chars) is inside "lakverf" but below the containment floor
        let catalog = vec![catalog_entry(1, "c1", "Lakverf")];
        assert!(find_matching_material("Lak", &catalog, "c1").is_none());
    }

    #[test]
    fn test_company_scope_enforced() {
        let catalog = vec![catalog_entry(1, "other-company", "Muurverf Wit")];
        assert!(find_matching_material("Muurverf Wit", &catalog, "c1").is_none());
    }

    #[test]
    fn test_no_match_returns_none() {
        let catalog = vec![catalog_entry(1, "c1", "Muurverf Wit")];
        assert!(find_matching_material("Plamuur Fijn", &catalog, "c1").is_none());
    }

    #[test]
    fn test_first_match_wins_within_tier() {
        let catalog = vec![
            catalog_entry(1, "c1", "Muurverf Extra Mat 10L"),
            catalog_entry(2, "c1", "Muurverf Extra Mat 5L"),
        ];
        // Both entries share the fingerprint; iteration order decides
        let hit = find_matching_material("Muurverf Extra Mat", &catalog, "c1").unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn test_all_noise_name_does_not_match_tier2() {
        let catalog = vec![catalog_entry(1, "c1", "Kleur Wit 10L")];
        assert!(find_matching_material("Grijs 5L", &catalog, "c1").is_none());
    }
}
