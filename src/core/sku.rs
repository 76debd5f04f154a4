//! SKU generation - stable catalog identifiers for new materials.
//!
//! A SKU is `<SUP>-<MATER>-<NNNN>`: the first three alphanumerics of the
//! supplier, the first five of the material name, both uppercased, and a
//! four-digit sequence one past the highest suffix already in use for that
//! prefix. Gaps in the sequence are never refilled.
//!
//! The scan-then-increment runs client-side over a caller-provided SKU
//! list; two concurrent calls with the same prefix can compute the same
//! next suffix. Callers must serialize approvals per company (the UI's
//! duplicate-submit guard) until sequence generation moves server-side.

use chrono::Utc;
use tracing::warn;

/// Derives a SKU for a new catalog entry.
///
/// Never fails: when either name yields no alphanumeric characters to build
/// a prefix from, a timestamp-based identifier is returned instead.
#[must_use]
pub fn generate_sku(material_name: &str, supplier_name: &str, existing_skus: &[String]) -> String {
    build_sku(material_name, supplier_name, existing_skus).unwrap_or_else(|| {
        warn!(
            material_name,
            supplier_name, "SKU derivation failed, falling back to timestamp identifier"
        );
        format!("MAT-{}", Utc::now().timestamp_millis())
    })
}

fn build_sku(material_name: &str, supplier_name: &str, existing_skus: &[String]) -> Option<String> {
    let material_part = alphanumeric_prefix(material_name, 5);
    let supplier_part = alphanumeric_prefix(supplier_name, 3);
    if material_part.is_empty() || supplier_part.is_empty() {
        return None;
    }

    let prefix = format!("{supplier_part}-{material_part}");
    let max_sequence = existing_skus
        .iter()
        .filter(|sku| sku.starts_with(&prefix))
        .filter_map(|sku| trailing_sequence(sku))
        .max()
        .unwrap_or(0);

    Some(format!("{prefix}-{:04}", max_sequence + 1))
}

/// First `len` alphanumeric characters of the input, uppercased.
fn alphanumeric_prefix(input: &str, len: usize) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(len)
        .collect::<String>()
        .to_uppercase()
}

/// The numeric suffix after the last `-`, when the suffix is all digits.
fn trailing_sequence(sku: &str) -> Option<u32> {
    let (_, suffix) = sku.rsplit_once('-')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
