use chrono::Duration;
use rust_decimal::Decimal;

// Format amount with appropriate precision for the currency
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let code = currency.to_uppercase();
    let decimals = match code.as_str() {
        "BTC" | "ETH" => 8,
        "USD" | "EUR" | "GBP" | "RUB" | "UAH" | "KZT" | "TRY" | "USDT" | "USDC" => 2,
        _ => 6,
    };
    format!("{} {}", amount.round_dp(decimals).normalize(), code)
}

// Shorten an identifier for display
pub fn shorten_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 12 {
        return id.to_string();
    }

    let start: String = chars[..6].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", start, end)
}

// Human readable remaining time, e.g. "2h 05m", "4m 10s", "45s"
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        (total % 86_400) / 3_600,
        (total % 3_600) / 60,
        total % 60,
    );

    if days > 0 {
        format!("{}d {:02}h", days, hours)
    } else if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_currency_precision() {
        assert_eq!(format_amount(Decimal::new(150025, 2), "usd"), "1500.25 USD");
        assert_eq!(format_amount(Decimal::new(1234567891, 10), "BTC"), "0.12345679 BTC");
        assert_eq!(format_amount(Decimal::new(10, 0), "EUR"), "10 EUR");
    }

    #[test]
    fn long_ids_are_shortened() {
        assert_eq!(shorten_id("tx-1"), "tx-1");
        assert_eq!(shorten_id("0123456789abcdef"), "012345...cdef");
    }

    #[test]
    fn durations_pick_two_units() {
        assert_eq!(format_duration(Duration::seconds(45)), "45s");
        assert_eq!(format_duration(Duration::seconds(250)), "4m 10s");
        assert_eq!(format_duration(Duration::minutes(125)), "2h 05m");
        assert_eq!(format_duration(Duration::hours(50)), "2d 02h");
        assert_eq!(format_duration(Duration::seconds(-3)), "0s");
    }
}
