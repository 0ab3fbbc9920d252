//! Price formatting for the console front end.
//!
//! The book keys orders by integer ticks; the console speaks decimal
//! dollars. One tick is one cent.

use crate::orderbook::types::Price;

pub const TICK_SIZE: f64 = 0.01;

/// Render a tick price as dollars, e.g. `10000` -> `"$100.00"`.
pub fn format_price(price_ticks: Price) -> String {
    format!("${:.2}", price_ticks as f64 * TICK_SIZE)
}

/// Parse a decimal dollar amount into ticks. Rejects negatives and garbage.
pub fn parse_price(input: &str) -> Option<Price> {
    let dollars: f64 = input.trim().parse().ok()?;
    if !dollars.is_finite() || dollars < 0.0 {
        return None;
    }
    Some((dollars / TICK_SIZE).round() as Price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(10000), "$100.00");
        assert_eq!(format_price(12550), "$125.50");
        assert_eq!(format_price(0), "$0.00");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("100.0"), Some(10000));
        assert_eq!(parse_price(" 125.50 "), Some(12550));
        assert_eq!(parse_price("0"), Some(0));
    }

    #[test]
    fn test_parse_price_rejects_bad_input() {
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price(""), None);
    }
}
