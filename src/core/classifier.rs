//! Change classification - how does a line item differ from the catalog?
//!
//! Given an invoice line and the catalog entry it matched (if any), the
//! classifier returns a deterministic category plus a Dutch label and
//! message for display. Price is compared against the catalog's net list
//! price with a one-cent dead-zone; discount is compared as integer
//! percentages. The message lists every non-zero delta regardless of the
//! category chosen.

use serde::{Deserialize, Serialize};

use crate::entities::{LineItem, material};

/// Price deltas within ±€0.01 count as "no price change".
const PRICE_DEAD_ZONE: f64 = 0.01;

/// Deterministic taxonomy of price/discount drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    /// No catalog entry matched the line's name
    NewMaterial,
    /// Neither price nor discount moved
    NoChange,
    /// Price rose and discount fell
    BothUnfavorable,
    /// Price fell and discount rose
    BothFavorable,
    /// Price rose, discount unchanged
    PriceUp,
    /// Price fell, discount unchanged
    PriceDown,
    /// Discount rose, price unchanged
    DiscountUp,
    /// Discount fell, price unchanged
    DiscountDown,
    /// Price and discount moved in the same direction; flagged for a human
    MixedChange,
}

/// Whether a category is good or bad news for the company.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Favorability {
    /// Cheaper terms than the catalog
    Favorable,
    /// More expensive terms than the catalog
    Unfavorable,
    /// No economic difference
    Neutral,
    /// Not auto-classified; needs a human look
    Flagged,
}

impl ChangeCategory {
    /// Stable snake_case identifier, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewMaterial => "new_material",
            Self::NoChange => "no_change",
            Self::BothUnfavorable => "both_unfavorable",
            Self::BothFavorable => "both_favorable",
            Self::PriceUp => "price_up",
            Self::PriceDown => "price_down",
            Self::DiscountUp => "discount_up",
            Self::DiscountDown => "discount_down",
            Self::MixedChange => "mixed_change",
        }
    }

    /// Short Dutch display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewMaterial => "Nieuw materiaal",
            Self::NoChange => "Geen wijziging",
            Self::BothUnfavorable => "Prijs en korting ongunstig",
            Self::BothFavorable => "Prijs en korting gunstig",
            Self::PriceUp => "Prijs gestegen",
            Self::PriceDown => "Prijs gedaald",
            Self::DiscountUp => "Korting gestegen",
            Self::DiscountDown => "Korting gedaald",
            Self::MixedChange => "Gemengde wijziging",
        }
    }

    /// How the category scores for the company.
    #[must_use]
    pub const fn favorability(self) -> Favorability {
        match self {
            Self::NewMaterial | Self::NoChange => Favorability::Neutral,
            Self::BothUnfavorable | Self::PriceUp | Self::DiscountDown => Favorability::Unfavorable,
            Self::BothFavorable | Self::PriceDown | Self::DiscountUp => Favorability::Favorable,
            Self::MixedChange => Favorability::Flagged,
        }
    }
}

/// Classification of one invoice line against its matched catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Taxonomy bucket
    pub category: ChangeCategory,
    /// Short Dutch display label
    pub label: String,
    /// Dutch sentence listing each non-zero delta magnitude
    pub message: String,
}

/// Classifies how a line item's terms differ from the matched catalog entry.
///
/// With no matched entry the result is always `new_material`. Otherwise the
/// price delta (against `price_excl_vat`, ±€0.01 dead-zone) and discount
/// delta (integer percent) select one of the eight drift categories.
#[must_use]
pub fn classify(line_item: &LineItem, matched: Option<&material::Model>) -> Classification {
    let Some(material) = matched else {
        return Classification {
            category: ChangeCategory::NewMaterial,
            label: ChangeCategory::NewMaterial.label().to_string(),
            message: format!("\"{}\" staat nog niet in de prijslijst", line_item.name),
        };
    };

    let raw_price_delta = line_item.unit_price - material.price_excl_vat;
    let price_delta = if raw_price_delta.abs() <= PRICE_DEAD_ZONE {
        0.0
    } else {
        raw_price_delta
    };
    #[allow(clippy::cast_possible_truncation)]
    let discount_delta =
        (line_item.discount.round() as i64) - (material.discount_percentage.round() as i64);

    let price_direction = if price_delta > 0.0 {
        1
    } else if price_delta < 0.0 {
        -1
    } else {
        0
    };

    let category = match (price_direction, discount_delta.signum()) {
        (0, 0) => ChangeCategory::NoChange,
        (1, -1) => ChangeCategory::BothUnfavorable,
        (-1, 1) => ChangeCategory::BothFavorable,
        (1, 0) => ChangeCategory::PriceUp,
        (-1, 0) => ChangeCategory::PriceDown,
        (0, 1) => ChangeCategory::DiscountUp,
        (0, -1) => ChangeCategory::DiscountDown,
        _ => ChangeCategory::MixedChange,
    };

    Classification {
        category,
        label: category.label().to_string(),
        message: build_message(price_delta, discount_delta),
    }
}

/// Assembles the delta sentence, independent of the chosen category.
fn build_message(price_delta: f64, discount_delta: i64) -> String {
    let mut parts = Vec::with_capacity(2);

    if price_delta != 0.0 {
        let direction = if price_delta > 0.0 {
            "gestegen"
        } else {
            "gedaald"
        };
        parts.push(format!("prijs {direction} met €{:.2}", price_delta.abs()));
    }
    if discount_delta != 0 {
        let direction = if discount_delta > 0 {
            "gestegen"
        } else {
            "gedaald"
        };
        parts.push(format!("korting {direction} met {}%", discount_delta.abs()));
    }

    if parts.is_empty() {
        "geen prijswijzigingen".to_string()
    } else {
        parts.join(" en ")
    }
}
