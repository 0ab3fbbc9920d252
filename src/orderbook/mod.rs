//! Core order book implementation module
//!
//! An AVL-tree-backed limit order book: one height-balanced tree of resting
//! orders per side, rebalanced on every insert, matched one unit at a time
//! on price priority.

pub mod avl;
pub mod book;
pub mod matching;
pub mod types;

// Re-export main types for convenience
pub use avl::AvlTree;
pub use book::OrderBook;
pub use matching::MatchingEngine;
pub use types::{Order, OrderId, Price, Quantity, Side, Trade};
