//! Checkout flow
//!
//! Submission state machine: `Editing → Submitting → {Succeeded, Failed}`.
//! Entry to `Submitting` requires a non-empty cart and valid contact
//! details; while submitting, resubmission is rejected. `Failed` surfaces
//! the triggering error and permits a retry; `Succeeded` clears the cart
//! and is terminal for that cart instance.
//!
//! The submission itself is a sequential async chain: resolve every cart
//! line (bounded fan-out), compute totals, then persist the header together
//! with all items in one atomic [`OrderWriter::create_order`] call. Nothing
//! is persisted before that call, so dropping the in-flight submission
//! (e.g. the customer navigates away) leaves no half-created order; a
//! fresh flow is constructed for the next checkout page.

pub mod resolver;
pub mod totals;

use crate::cart::CartManager;
use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::orders::{OrderWriteError, OrderWriter};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCategory, ErrorCode};
use shared::models::{ShippingMethod, shipping_method};
use shared::order::{ContactInfo, Order};
use shared::util::now_millis;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use validator::Validate;

pub use resolver::{LineResolver, ResolveError};
pub use totals::{OrderTotals, tax_included};

/// Checkout submission errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("contact validation failed: {0}")]
    InvalidContact(#[from] validator::ValidationErrors),

    #[error("unknown shipping method: {0}")]
    UnknownShipping(String),

    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("checkout already completed for this cart")]
    AlreadyCompleted,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Persistence(#[from] OrderWriteError),
}

impl From<&CheckoutError> for AppError {
    fn from(err: &CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => AppError::new(ErrorCode::CartEmpty),
            CheckoutError::InvalidContact(errors) => {
                AppError::with_message(ErrorCode::ValidationFailed, errors.to_string())
            }
            CheckoutError::UnknownShipping(id) => {
                AppError::new(ErrorCode::UnknownShippingMethod).with_detail("method", id.clone())
            }
            CheckoutError::SubmissionInProgress => AppError::new(ErrorCode::SubmissionInProgress),
            CheckoutError::AlreadyCompleted => AppError::new(ErrorCode::CheckoutCompleted),
            CheckoutError::Resolve(ResolveError::ConfigMissing(id)) => {
                AppError::new(ErrorCode::BundleNotFound).with_detail("config", id.clone())
            }
            CheckoutError::Resolve(ResolveError::Catalog(err)) => AppError::network(err.to_string()),
            CheckoutError::Persistence(err) => AppError::storage(err.to_string()),
        }
    }
}

/// Submission state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutPhase {
    Editing,
    Submitting,
    Succeeded { order_id: String },
    Failed { error: AppError },
}

/// The checkout submission state machine
pub struct CheckoutFlow {
    catalog: Arc<dyn Catalog>,
    orders: Arc<dyn OrderWriter>,
    tax_rate: u32,
    resolve_concurrency: usize,
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        orders: Arc<dyn OrderWriter>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            catalog,
            orders,
            tax_rate: config.tax_rate,
            resolve_concurrency: config.resolve_concurrency,
            phase: CheckoutPhase::Editing,
        }
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Acknowledge a failure and return to editing; reports whether the
    /// transition applied
    pub fn edit(&mut self) -> bool {
        match self.phase {
            CheckoutPhase::Failed { .. } => {
                self.phase = CheckoutPhase::Editing;
                true
            }
            _ => false,
        }
    }

    /// Submit the cart as an order
    ///
    /// Pre-flight rejections (empty cart, invalid contact, unknown shipping
    /// method) keep the flow in `Editing`; failures past that point
    /// transition to `Failed` with the error surfaced. On success the cart
    /// is cleared and the new order id is returned.
    pub async fn submit(
        &mut self,
        cart: &mut CartManager,
        contact: &ContactInfo,
        shipping_method_id: &str,
    ) -> Result<String, CheckoutError> {
        match &self.phase {
            CheckoutPhase::Submitting => return Err(CheckoutError::SubmissionInProgress),
            CheckoutPhase::Succeeded { .. } => return Err(CheckoutError::AlreadyCompleted),
            CheckoutPhase::Editing | CheckoutPhase::Failed { .. } => {}
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        contact.validate()?;
        let method = shipping_method(shipping_method_id)
            .ok_or_else(|| CheckoutError::UnknownShipping(shipping_method_id.to_string()))?;

        self.phase = CheckoutPhase::Submitting;
        match self.run(cart, contact, &method).await {
            Ok(order_id) => {
                info!(order_id = %order_id, "order created");
                self.phase = CheckoutPhase::Succeeded {
                    order_id: order_id.clone(),
                };
                Ok(order_id)
            }
            Err(err) => {
                let surfaced: AppError = (&err).into();
                if surfaced.code.category() == ErrorCategory::System {
                    error!(code = %surfaced.code, message = %surfaced.message, "submission failed");
                } else {
                    warn!(code = %surfaced.code, message = %surfaced.message, "submission rejected");
                }
                self.phase = CheckoutPhase::Failed { error: surfaced };
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        cart: &mut CartManager,
        contact: &ContactInfo,
        method: &ShippingMethod,
    ) -> Result<String, CheckoutError> {
        let order_id = uuid::Uuid::new_v4().to_string();

        let resolver = LineResolver::new(self.catalog.as_ref(), self.resolve_concurrency);
        let items = resolver.resolve_cart(&order_id, cart.lines()).await?;
        let totals = OrderTotals::compute(&items, method.fee, self.tax_rate);

        let order = Order {
            id: order_id.clone(),
            contact: contact.clone(),
            shipping_method: method.id.clone(),
            subtotal: totals.subtotal,
            shipping_fee: totals.shipping_fee,
            total: totals.total,
            tax_included: totals.tax_included,
            created_at: now_millis(),
        };

        // Header and items are persisted in one atomic call; the writer
        // either stores all of it or nothing
        self.orders.create_order(&order, &items).await?;

        // The order exists; a cart-clear failure must not fail the
        // submission or a retry would create a duplicate order
        if let Err(err) = cart.clear() {
            warn!(order_id = %order_id, error = %err, "cart clear failed after order creation");
        }

        Ok(order_id)
    }
}
