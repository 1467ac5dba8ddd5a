//! Order persistence collaborator
//!
//! Append-only: one header plus its items, created exactly once and never
//! updated or deleted by this subsystem. The contract is atomic: a writer
//! either persists the header together with every item or persists nothing,
//! so no order can exist with missing items.

use async_trait::async_trait;
use shared::order::{Order, OrderItem};
use std::sync::Mutex;
use thiserror::Error;

/// Order persistence failure; fatal for the submission, the user may retry
#[derive(Debug, Clone, Error)]
pub enum OrderWriteError {
    #[error("order persistence failed: {0}")]
    Backend(String),
}

/// Append-only order persistence
#[async_trait]
pub trait OrderWriter: Send + Sync {
    /// Atomically persist an order header together with all of its items
    async fn create_order(&self, order: &Order, items: &[OrderItem])
    -> Result<(), OrderWriteError>;
}

/// In-memory order writer for tests and embedded deployments
#[derive(Default)]
pub struct MemoryOrderWriter {
    orders: Mutex<Vec<(Order, Vec<OrderItem>)>>,
}

impl MemoryOrderWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All orders created so far
    pub fn orders(&self) -> Vec<(Order, Vec<OrderItem>)> {
        self.orders.lock().unwrap().clone()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderWriter for MemoryOrderWriter {
    async fn create_order(
        &self,
        order: &Order,
        items: &[OrderItem],
    ) -> Result<(), OrderWriteError> {
        self.orders
            .lock()
            .unwrap()
            .push((order.clone(), items.to_vec()));
        Ok(())
    }
}
