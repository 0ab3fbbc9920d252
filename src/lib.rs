//! AVL Order Book Engine
//!
//! A small limit order book that keeps each side of the market in a
//! self-balancing binary search tree keyed by price, with JSON-file
//! persistence and a one-unit-per-step price-priority matching rule.
//!
//! # Quick Start
//!
//! ```rust
//! use avl_orderbook::orderbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//!
//! // A resting ask, then a bid that crosses it.
//! assert!(book.add_order(Order::new(1, Side::Sell, 10000, 5)).is_none());
//! let trade = book.add_order(Order::new(2, Side::Buy, 10000, 3));
//!
//! assert_eq!(trade.unwrap().quantity, 1);
//! println!("Best bid: {:?}", book.best_bid());
//! println!("Best ask: {:?}", book.best_ask());
//! ```
//!
//! # Architecture
//!
//! Each side of the book is an AVL tree ([`orderbook::AvlTree`]) rebalanced
//! on every insert, so a full in-order walk always yields that side sorted
//! by price. The matching step ([`orderbook::MatchingEngine`]) materializes
//! both walks, takes the highest bid and the lowest ask, and moves exactly
//! one unit when they cross. [`persistence::JsonStore`] writes both walks to
//! a `{ "buy": [...], "sell": [...] }` file and rebuilds the trees on load
//! by replaying inserts.
//!
//! The engine is single-threaded and synchronous: every operation is an
//! in-memory transformation the caller follows with an explicit save.

pub mod orderbook;
pub mod persistence;
pub mod utils;

pub use orderbook::{Order, OrderBook, Side, Trade};
pub use persistence::JsonStore;
