//! Cart manager
//!
//! [`CartManager`] owns the in-memory line list and the durable store it
//! was constructed with; there is no global cart singleton. The manager is
//! the single owner of persistence timing: every mutation rewrites the
//! whole cart through [`CartStore::persist`] before the in-memory state is
//! updated, so memory never gets ahead of disk.

pub mod storage;

use shared::cart::{CartLine, LineIdentity};
use tracing::debug;

pub use storage::{CartStore, StorageError, StorageResult};

/// The cart: a list of lines with quantity coalescing and durable persistence
pub struct CartManager {
    store: CartStore,
    lines: Vec<CartLine>,
}

impl CartManager {
    /// Rehydrate the cart from the store
    pub fn load(store: CartStore) -> StorageResult<Self> {
        let lines = store.load()?;
        debug!(line_count = lines.len(), "cart rehydrated");
        Ok(Self { store, lines })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of cart rows
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all rows
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Add a line, coalescing with an existing line of the same identity
    ///
    /// Single lines merge on `(item, variant)` and the existing row's
    /// quantity grows by the incoming amount. Bundle lines only merge on an
    /// exact repeat of the same line id; two separate adds of an identical
    /// bundle stay distinct rows.
    pub fn add_line(&mut self, line: CartLine) -> StorageResult<()> {
        let mut next = self.lines.clone();
        let identity = line.identity();
        match next.iter_mut().find(|l| l.identity() == identity) {
            Some(existing) => existing.add_quantity(line.quantity()),
            None => next.push(line),
        }
        self.commit(next)
    }

    /// Remove the line matching the identity exactly; reports whether a
    /// line was removed
    pub fn remove_line(&mut self, identity: &LineIdentity) -> StorageResult<bool> {
        let mut next = self.lines.clone();
        let before = next.len();
        next.retain(|l| &l.identity() != identity);
        let removed = next.len() != before;
        if removed {
            self.commit(next)?;
        }
        Ok(removed)
    }

    /// Set the quantity of a line; zero removes it. Reports whether a line
    /// matched.
    pub fn set_quantity(&mut self, identity: &LineIdentity, quantity: u32) -> StorageResult<bool> {
        if quantity == 0 {
            return self.remove_line(identity);
        }
        let mut next = self.lines.clone();
        match next.iter_mut().find(|l| &l.identity() == identity) {
            Some(line) => {
                line.set_quantity(quantity);
                self.commit(next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Empty the cart
    pub fn clear(&mut self) -> StorageResult<()> {
        self.commit(Vec::new())
    }

    /// Persist the candidate state, then make it current
    fn commit(&mut self, next: Vec<CartLine>) -> StorageResult<()> {
        self.store.persist(&next)?;
        self.lines = next;
        Ok(())
    }
}
