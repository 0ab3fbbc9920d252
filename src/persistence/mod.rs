//! JSON file persistence for the order book.
//!
//! The book itself is pure in-memory state; this module serializes both
//! sides to a `{ "buy": [...], "sell": [...] }` document and rebuilds a book
//! by replaying every persisted order through the normal insert path. The
//! balance invariant of the trees is therefore derived on load, never
//! stored. There is no schema versioning and no atomic-write guarantee; a
//! missing or malformed file surfaces as an error for the caller to map to
//! a fresh empty book.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::orderbook::types::Order;
use crate::orderbook::OrderBook;

#[derive(Debug)]
pub enum StoreError {
    /// File could not be read or written
    Io(std::io::Error),

    /// File contents are not a valid book document
    Malformed(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "store I/O error: {}", err),
            StoreError::Malformed(err) => write!(f, "malformed book file: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Malformed(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err)
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// On-disk shape of the book: both sides, each in price order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBook {
    pub buy: Vec<Order>,
    pub sell: Vec<Order>,
}

impl PersistedBook {
    pub fn from_book(book: &OrderBook) -> Self {
        Self {
            buy: book.buy_orders(),
            sell: book.sell_orders(),
        }
    }

    /// Rebuild the book by re-inserting every order. Replay does not run
    /// matching, so loading never changes a quantity.
    pub fn into_book(self) -> OrderBook {
        let mut book = OrderBook::new();
        for order in self.buy.into_iter().chain(self.sell) {
            book.restore_order(order);
        }
        book
    }
}

/// File-backed store with a caller-supplied path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize both sides of the book to the store file.
    pub fn save(&self, book: &OrderBook) -> StoreResult<()> {
        let snapshot = PersistedBook::from_book(book);
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), orders = book.total_orders(), "book saved");
        Ok(())
    }

    /// Read and parse the store file.
    pub fn load(&self) -> StoreResult<PersistedBook> {
        let contents = fs::read_to_string(&self.path)?;
        let snapshot: PersistedBook = serde_json::from_str(&contents)?;
        info!(
            path = %self.path.display(),
            buys = snapshot.buy.len(),
            sells = snapshot.sell.len(),
            "book loaded"
        );
        Ok(snapshot)
    }
}
