//! redb-based durable cart store
//!
//! # Table
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `cart` | `"lines"` | JSON `Vec<CartLine>` | Full cart contents |
//!
//! Every mutation writes the ENTIRE line list under a single key in one
//! transaction. redb commits are copy-on-write with an atomic pointer swap,
//! so a crash mid-write leaves the previous cart intact; there is no
//! incremental patching and therefore no partially-updated state to repair
//! on restart.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::cart::CartLine;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for the cart: key = "lines", value = JSON-serialized Vec<CartLine>
const CART_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cart");

const LINES_KEY: &str = "lines";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Cart store backed by redb
#[derive(Clone)]
pub struct CartStore {
    db: Arc<Database>,
}

impl CartStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing and ephemeral sessions)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(CART_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Read the full cart; an absent key is an empty cart
    pub fn load(&self) -> StorageResult<Vec<CartLine>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TABLE)?;

        match table.get(LINES_KEY)? {
            Some(value) => {
                let lines: Vec<CartLine> = serde_json::from_slice(value.value())?;
                Ok(lines)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the full cart in one transaction
    pub fn persist(&self, lines: &[CartLine]) -> StorageResult<()> {
        let value = serde_json::to_vec(lines)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CART_TABLE)?;
            table.insert(LINES_KEY, value.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
