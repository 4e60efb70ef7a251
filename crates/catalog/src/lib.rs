//! Sample pack catalog.
//!
//! This crate owns the catalog data model, the product-creation schema, the
//! in-memory store and the checkout collaborator. It has no HTTP knowledge.

pub mod checkout;
pub mod pack;
pub mod schema;
pub mod seed;
pub mod store;

pub use checkout::{
    CheckoutError, CheckoutReceipt, MockPaymentProcessor, PaymentProcessor, PaymentRequest, checkout,
};
pub use pack::{PackDraft, PackSort, SamplePack, format_price, sort_packs};
pub use schema::{IssueCode, ValidationErrors, ValidationIssue, validate_draft};
pub use store::{CatalogStore, InMemoryCatalogStore, StoreError, StoreResult};
