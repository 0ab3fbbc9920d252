//! Price-keyed AVL tree holding one side of the book.
//!
//! Each side of the market keeps its resting orders in a self-balancing
//! binary search tree keyed by price. Insertion rebalances bottom-up on the
//! return path, so the tree height stays logarithmic no matter the order in
//! which prices arrive. Equal prices always recurse right, which gives a
//! deterministic placement for duplicates without any secondary key.

use crate::orderbook::types::Order;

#[derive(Debug)]
struct AvlNode {
    order: Order,
    height: u32,
    left: Option<Box<AvlNode>>,
    right: Option<Box<AvlNode>>,
}

impl AvlNode {
    fn new(order: Order) -> Self {
        Self {
            order,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn recompute_height(&mut self) {
        self.height = 1 + height(self.left.as_deref()).max(height(self.right.as_deref()));
    }

    fn balance_factor(&self) -> i32 {
        height(self.left.as_deref()) as i32 - height(self.right.as_deref()) as i32
    }
}

fn height(node: Option<&AvlNode>) -> u32 {
    node.map_or(0, |n| n.height)
}

fn balance_factor(node: Option<&AvlNode>) -> i32 {
    node.map_or(0, AvlNode::balance_factor)
}

/// Right rotation around `y`: its left child becomes the new subtree root.
/// Heights are recomputed child-before-parent; nothing is reallocated and no
/// other node in the subtree is touched.
fn rotate_right(mut y: Box<AvlNode>) -> Box<AvlNode> {
    match y.left.take() {
        Some(mut x) => {
            y.left = x.right.take();
            y.recompute_height();
            x.right = Some(y);
            x.recompute_height();
            x
        }
        None => y,
    }
}

/// Mirror of `rotate_right`.
fn rotate_left(mut x: Box<AvlNode>) -> Box<AvlNode> {
    match x.right.take() {
        Some(mut y) => {
            x.right = y.left.take();
            x.recompute_height();
            y.left = Some(x);
            y.recompute_height();
            y
        }
        None => x,
    }
}

/// Restore the AVL invariant at `node` after an insert below it.
///
/// Four cases, driven by the balance factor (left height minus right height):
/// left-left and right-right take a single rotation, left-right and
/// right-left rotate the child first to reduce to the single-rotation case.
fn rebalance(mut node: Box<AvlNode>) -> Box<AvlNode> {
    let factor = node.balance_factor();

    if factor > 1 {
        if balance_factor(node.left.as_deref()) < 0 {
            if let Some(left) = node.left.take() {
                node.left = Some(rotate_left(left));
            }
        }
        rotate_right(node)
    } else if factor < -1 {
        if balance_factor(node.right.as_deref()) > 0 {
            if let Some(right) = node.right.take() {
                node.right = Some(rotate_right(right));
            }
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert_node(node: Option<Box<AvlNode>>, order: Order) -> Box<AvlNode> {
    let mut node = match node {
        None => return Box::new(AvlNode::new(order)),
        Some(node) => node,
    };

    if order.price < node.order.price {
        node.left = Some(insert_node(node.left.take(), order));
    } else {
        // Equal prices go right: deterministic tie placement.
        node.right = Some(insert_node(node.right.take(), order));
    }

    node.recompute_height();
    rebalance(node)
}

/// One side of the order book: an AVL tree of orders keyed by price.
///
/// Insertion cannot fail; duplicate prices are simply placed as additional
/// nodes. Traversal materializes the full side sorted ascending by price.
#[derive(Debug, Default)]
pub struct AvlTree {
    root: Option<Box<AvlNode>>,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn insert(&mut self, order: Order) {
        self.root = Some(insert_node(self.root.take(), order));
        self.len += 1;
    }

    /// Full in-order dump, ascending by price. One-shot materialization, not
    /// a cursor; calling it twice with no intervening insert yields the same
    /// sequence.
    pub fn in_order(&self) -> Vec<Order> {
        let mut orders = Vec::with_capacity(self.len);
        walk(self.root.as_deref(), &mut orders);
        orders
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> u32 {
        height(self.root.as_deref())
    }
}

fn walk(node: Option<&AvlNode>, out: &mut Vec<Order>) {
    if let Some(node) = node {
        walk(node.left.as_deref(), out);
        out.push(node.order);
        walk(node.right.as_deref(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::types::Side;
    use proptest::prelude::*;

    fn order(id: u64, price: u64) -> Order {
        Order::new(id, Side::Buy, price, 10)
    }

    /// Returns the subtree height if the AVL and height invariants hold
    /// everywhere below `node`, or `None` on the first violation.
    fn check_invariants(node: Option<&AvlNode>) -> Option<u32> {
        let node = match node {
            None => return Some(0),
            Some(node) => node,
        };

        let left = check_invariants(node.left.as_deref())?;
        let right = check_invariants(node.right.as_deref())?;

        if left.abs_diff(right) > 1 {
            return None;
        }
        if node.height != 1 + left.max(right) {
            return None;
        }
        Some(node.height)
    }

    #[test]
    fn test_empty_tree() {
        let tree = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.in_order().is_empty());
    }

    #[test]
    fn test_single_insert() {
        let mut tree = AvlTree::new();
        tree.insert(order(1, 100));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.in_order()[0].price, 100);
    }

    #[test]
    fn test_right_right_case_single_left_rotation() {
        // Ascending inserts lean right; the third insert triggers one left
        // rotation and the middle price becomes the root.
        let mut tree = AvlTree::new();
        tree.insert(order(1, 10));
        tree.insert(order(2, 20));
        tree.insert(order(3, 30));

        let root = tree.root.as_deref().unwrap();
        assert_eq!(root.order.price, 20);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_deref().unwrap().order.price, 10);
        assert_eq!(root.right.as_deref().unwrap().order.price, 30);
    }

    #[test]
    fn test_left_left_case_single_right_rotation() {
        let mut tree = AvlTree::new();
        tree.insert(order(1, 30));
        tree.insert(order(2, 20));
        tree.insert(order(3, 10));

        let root = tree.root.as_deref().unwrap();
        assert_eq!(root.order.price, 20);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_deref().unwrap().order.price, 10);
        assert_eq!(root.right.as_deref().unwrap().order.price, 30);
    }

    #[test]
    fn test_left_right_case_double_rotation() {
        let mut tree = AvlTree::new();
        tree.insert(order(1, 30));
        tree.insert(order(2, 10));
        tree.insert(order(3, 20));

        let root = tree.root.as_deref().unwrap();
        assert_eq!(root.order.price, 20);
        assert_eq!(root.left.as_deref().unwrap().order.price, 10);
        assert_eq!(root.right.as_deref().unwrap().order.price, 30);
    }

    #[test]
    fn test_right_left_case_double_rotation() {
        let mut tree = AvlTree::new();
        tree.insert(order(1, 10));
        tree.insert(order(2, 30));
        tree.insert(order(3, 20));

        let root = tree.root.as_deref().unwrap();
        assert_eq!(root.order.price, 20);
        assert_eq!(root.left.as_deref().unwrap().order.price, 10);
        assert_eq!(root.right.as_deref().unwrap().order.price, 30);
    }

    #[test]
    fn test_duplicate_prices_are_kept() {
        let mut tree = AvlTree::new();
        tree.insert(order(1, 100));
        tree.insert(order(2, 100));
        tree.insert(order(3, 100));

        let orders = tree.in_order();
        assert_eq!(orders.len(), 3);
        assert!(orders.iter().all(|o| o.price == 100));
        assert!(check_invariants(tree.root.as_deref()).is_some());
    }

    #[test]
    fn test_traversal_is_sorted_and_idempotent() {
        let mut tree = AvlTree::new();
        for (id, price) in [(1, 50), (2, 20), (3, 80), (4, 20), (5, 65)] {
            tree.insert(order(id, price));
        }

        let first = tree.in_order();
        let prices: Vec<_> = first.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![20, 20, 50, 65, 80]);
        assert_eq!(tree.in_order(), first);
    }

    #[test]
    fn test_len_tracks_insertions() {
        let mut tree = AvlTree::new();
        for id in 0..64 {
            tree.insert(order(id, id * 3 % 17));
        }
        assert_eq!(tree.len(), 64);
        assert_eq!(tree.in_order().len(), 64);
    }

    proptest! {
        #[test]
        fn prop_tree_stays_balanced(prices in proptest::collection::vec(0u64..10_000, 0..256)) {
            let mut tree = AvlTree::new();
            for (id, price) in prices.iter().enumerate() {
                tree.insert(order(id as u64, *price));
                prop_assert!(check_invariants(tree.root.as_deref()).is_some());
            }
        }

        #[test]
        fn prop_traversal_sorted_and_complete(prices in proptest::collection::vec(0u64..1_000, 0..256)) {
            let mut tree = AvlTree::new();
            for (id, price) in prices.iter().enumerate() {
                tree.insert(order(id as u64, *price));
            }

            let orders = tree.in_order();
            prop_assert_eq!(orders.len(), prices.len());
            prop_assert!(orders.windows(2).all(|w| w[0].price <= w[1].price));

            let mut expected = prices.clone();
            expected.sort_unstable();
            let got: Vec<_> = orders.iter().map(|o| o.price).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
