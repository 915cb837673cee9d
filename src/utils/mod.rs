use rust_decimal::Decimal;

/// Format a price with two fraction digits and the currency suffix.
pub fn format_price(price: Decimal) -> String {
    format!("{:.2} руб.", price.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_pads_fraction() {
        assert_eq!(format_price(Decimal::new(1080, 0)), "1080.00 руб.");
        assert_eq!(format_price(Decimal::new(995, 1)), "99.50 руб.");
    }

    #[test]
    fn test_format_price_rounds_to_cents() {
        assert_eq!(format_price(Decimal::new(12345, 3)), "12.35 руб.");
    }
}
