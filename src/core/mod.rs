//! Core business logic - framework-agnostic reconciliation operations.
//!
//! The pure functions live in [`normalizer`], [`matcher`], [`classifier`],
//! and [`sku`]; they never fail and touch no storage. The resource modules
//! ([`material`], [`invoice`], [`approval`]) wrap the persistence contracts,
//! and [`reconciliation`] orchestrates them into the approval workflow.
//! [`review`] assembles the read-only classification feed for display.

pub mod approval;
pub mod classifier;
pub mod invoice;
pub mod matcher;
pub mod material;
pub mod normalizer;
pub mod reconciliation;
pub mod review;
pub mod sku;
