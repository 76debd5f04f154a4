//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Line items are not a table of their own: they live as a JSON document on
//! the supplier invoice, in extraction order.

pub mod line_item;
pub mod material;
pub mod notification;
pub mod price_approval;
pub mod supplier_invoice;

// Re-export specific types to avoid conflicts
pub use line_item::{LineApprovalStatus, LineItem, LineItems};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use price_approval::{
    Column as PriceApprovalColumn, Entity as PriceApproval, Model as PriceApprovalModel,
};
pub use supplier_invoice::{
    Column as SupplierInvoiceColumn, Entity as SupplierInvoice, Model as SupplierInvoiceModel,
};
