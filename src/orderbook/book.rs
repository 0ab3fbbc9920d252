use tracing::{debug, info};

use crate::orderbook::avl::AvlTree;
use crate::orderbook::matching::MatchingEngine;
use crate::orderbook::types::{Order, Price, Side, Trade};

/// Order book backed by one AVL tree per side.
///
/// The book is a plain value owned by the caller; it performs no I/O of its
/// own. Persistence of the two sides is the job of
/// [`crate::persistence::JsonStore`], invoked by the caller after each
/// mutation.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: AvlTree,
    asks: AvlTree,
}

impl OrderBook {
    pub fn new() -> Self {
        info!("creating empty order book");
        Self {
            bids: AvlTree::new(),
            asks: AvlTree::new(),
        }
    }

    /// Add an order to its side of the book, then run one matching step.
    ///
    /// Returns the trade if the new order crossed the spread. Matching moves
    /// a single unit per call; the book re-scans both sides each time, which
    /// is O(n) per add and fine at console-simulation scale.
    pub fn add_order(&mut self, order: Order) -> Option<Trade> {
        debug!(%order, "adding order");

        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }

        MatchingEngine::match_once(&mut self.bids, &mut self.asks)
    }

    /// Insert without matching. Used when rebuilding from persisted state,
    /// where replaying must not change any quantity.
    pub fn restore_order(&mut self, order: Order) {
        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    /// All resting buy orders, ascending by price.
    pub fn buy_orders(&self) -> Vec<Order> {
        self.bids.in_order()
    }

    /// All resting sell orders, ascending by price.
    pub fn sell_orders(&self) -> Vec<Order> {
        self.asks.in_order()
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.in_order().last().map(|o| o.price)
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.in_order().first().map(|o| o.price)
    }

    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) if ask > bid => Some(ask - bid),
            _ => None,
        }
    }

    pub fn total_orders(&self) -> usize {
        self.bids.len() + self.asks.len()
    }
}
