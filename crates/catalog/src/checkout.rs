//! Checkout: look the pack up, then hand the charge to a payment collaborator.
//!
//! The only processor shipped is [`MockPaymentProcessor`], which accepts every
//! charge without side effects.

use serde::Serialize;
use thiserror::Error;

use packstore_core::{DomainError, PackId};

use crate::pack::format_price;
use crate::store::{CatalogStore, StoreError};

/// What the payment collaborator is asked to charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub pack_id: PackId,
    /// Minor currency units (cents).
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub success: bool,
    pub message: String,
}

/// External payment collaborator.
pub trait PaymentProcessor: Send + Sync {
    fn charge(&self, request: &PaymentRequest) -> CheckoutReceipt;
}

/// Stub processor: every charge succeeds, nothing is recorded.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPaymentProcessor;

impl PaymentProcessor for MockPaymentProcessor {
    fn charge(&self, _request: &PaymentRequest) -> CheckoutReceipt {
        CheckoutReceipt {
            success: true,
            message: "Payment processed successfully".to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Charge for one pack. Fails with [`DomainError::NotFound`] for unknown ids.
pub fn checkout<S, P>(store: &S, processor: &P, pack_id: PackId) -> Result<CheckoutReceipt, CheckoutError>
where
    S: CatalogStore + ?Sized,
    P: PaymentProcessor + ?Sized,
{
    let pack = store.get(pack_id)?.ok_or_else(DomainError::not_found)?;

    let request = PaymentRequest {
        pack_id: pack.id,
        amount: pack.price,
    };
    let receipt = processor.charge(&request);

    tracing::info!(
        pack_id = %pack.id,
        amount = %format_price(pack.price),
        success = receipt.success,
        "checkout processed"
    );

    Ok(receipt)
}
