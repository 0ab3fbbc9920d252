//! Interactive console front end for the order book.
//!
//! Menu-driven loop over stdin: add an order, view both sides, exit. The
//! book is loaded from the JSON store at startup (or started empty if the
//! file is missing or unreadable) and saved after every add.

use std::io::{self, BufRead, Write};

use rand::Rng;
use tracing::{error, info, warn};

use avl_orderbook::orderbook::{Order, OrderBook, Side};
use avl_orderbook::persistence::JsonStore;
use avl_orderbook::utils;

const DEFAULT_BOOK_PATH: &str = "order_book.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BOOK_PATH.to_string());
    let store = JsonStore::new(&path);

    let mut book = match store.load() {
        Ok(snapshot) => snapshot.into_book(),
        Err(err) => {
            warn!(%err, path = %path, "no usable book file, starting empty");
            OrderBook::new()
        }
    };

    info!(path = %path, orders = book.total_orders(), "order book ready");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\nWelcome to the Stock Market Order Book Simulation!");
        println!("--------------------------------------------------");
        println!("1. Add Order\n2. View Orders\n3. Exit");

        match prompt(&mut lines, "Enter your choice: ")?.as_deref() {
            Some("1") => add_order(&mut lines, &mut book, &store)?,
            Some("2") => display_orders(&book),
            Some("3") | None => return Ok(()),
            Some(_) => println!("Invalid option!"),
        }
    }
}

fn add_order(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    book: &mut OrderBook,
    store: &JsonStore,
) -> io::Result<()> {
    let side = match prompt(lines, "Enter order type (buy/sell): ")?.as_deref() {
        Some("buy") => Side::Buy,
        Some("sell") => Side::Sell,
        _ => {
            println!("Order type must be 'buy' or 'sell'.");
            return Ok(());
        }
    };

    let price = match prompt(lines, "Enter price: ")?.and_then(|s| utils::parse_price(&s)) {
        Some(price) => price,
        None => {
            println!("Price must be a non-negative number.");
            return Ok(());
        }
    };

    let quantity = match prompt(lines, "Enter quantity: ")?.and_then(|s| s.parse().ok()) {
        Some(quantity) => quantity,
        None => {
            println!("Quantity must be a non-negative integer.");
            return Ok(());
        }
    };

    let order = Order::new(rand::thread_rng().gen_range(1..=1000), side, price, quantity);
    if let Some(trade) = book.add_order(order) {
        println!(
            "Matched Order! {} share(s) at {}",
            trade.quantity,
            utils::format_price(trade.price)
        );
    }

    if let Err(err) = store.save(book) {
        error!(%err, "failed to save order book");
        println!("Warning: could not save the order book.");
    }

    println!("Order added successfully.");
    Ok(())
}

fn display_orders(book: &OrderBook) {
    println!("\nBuy Orders:");
    for order in book.buy_orders() {
        println!("  {} ({})", order, utils::format_price(order.price));
    }
    println!("\nSell Orders:");
    for order in book.sell_orders() {
        println!("  {} ({})", order, utils::format_price(order.price));
    }
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None), // stdin closed
    }
}
