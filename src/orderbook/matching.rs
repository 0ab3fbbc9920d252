//! Price-priority matching step.
//!
//! Pairs the highest-price bid against the lowest-price ask whenever the bid
//! meets or crosses the ask. Each step moves exactly one unit; draining a
//! larger imbalance takes repeated steps.

use tracing::{debug, info};

use crate::orderbook::avl::AvlTree;
use crate::orderbook::types::Trade;

pub struct MatchingEngine;

impl MatchingEngine {
    /// Run one matching step over the two sides.
    ///
    /// Both sides are materialized in price order: the last bid is the
    /// highest buy, the first ask is the lowest sell. When they cross, each
    /// side receives a replacement order with one unit less, re-inserted
    /// through the normal insert path. The stale full-quantity nodes stay in
    /// the trees next to their replacements; DESIGN.md records why this
    /// known-defective accounting is kept.
    pub fn match_once(bids: &mut AvlTree, asks: &mut AvlTree) -> Option<Trade> {
        let highest_buy = *bids.in_order().last()?;
        let lowest_sell = *asks.in_order().first()?;

        if highest_buy.price < lowest_sell.price {
            debug!(
                best_bid = highest_buy.price,
                best_ask = lowest_sell.price,
                "book not crossed, no match"
            );
            return None;
        }

        bids.insert(highest_buy.with_quantity(highest_buy.quantity.saturating_sub(1)));
        asks.insert(lowest_sell.with_quantity(lowest_sell.quantity.saturating_sub(1)));

        let trade = Trade::new(highest_buy.id, lowest_sell.id, highest_buy.price, 1);
        info!(
            buy_order = trade.buy_order_id,
            sell_order = trade.sell_order_id,
            price = trade.price,
            "matched one unit"
        );
        Some(trade)
    }
}
