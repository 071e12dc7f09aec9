//! Presentation helpers for price lists

use chrono::NaiveDate;

use super::price::{MarketPrice, parse_arrival_date};

/// Whole rupees with Indian digit grouping: `₹1,23,456`
pub fn format_price(price: f64) -> String {
    let rounded = price.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}₹{}", sign, grouped)
}

/// Relative label for an arrival date: Today, Yesterday, "N days ago" within
/// a week, otherwise the date itself. Unparseable input is returned as is.
pub fn format_market_date(raw: &str, today: NaiveDate) -> String {
    let Some(date) = parse_arrival_date(raw) else {
        return raw.to_string();
    };
    match (today - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=6 => format!("{} days ago", days),
        _ => date.format("%d/%m/%Y").to_string(),
    }
}

/// Group by crop name, keeping first-seen order
pub fn group_by_commodity(prices: &[MarketPrice]) -> Vec<(String, Vec<MarketPrice>)> {
    let mut groups: Vec<(String, Vec<MarketPrice>)> = Vec::new();
    for price in prices {
        match groups.iter_mut().find(|(name, _)| *name == price.crop_name) {
            Some((_, group)) => group.push(price.clone()),
            None => groups.push((price.crop_name.clone(), vec![price.clone()])),
        }
    }
    groups
}

/// Highest modal price; the first one wins ties
pub fn best_price(prices: &[MarketPrice]) -> Option<&MarketPrice> {
    prices.iter().fold(None, |best, price| match best {
        Some(b) if price.modal_price <= b.modal_price => Some(b),
        _ => Some(price),
    })
}

/// Prices that arrived within the last `max_days_old` days. Records with
/// unreadable dates are kept.
pub fn recent_prices(prices: &[MarketPrice], max_days_old: i64, today: NaiveDate) -> Vec<MarketPrice> {
    let cutoff = today - chrono::Duration::days(max_days_old);
    prices
        .iter()
        .filter(|price| price.arrival().is_none_or(|date| date >= cutoff))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::price::fallback_prices;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_format_price_grouping() {
        assert_eq!(format_price(0.0), "₹0");
        assert_eq!(format_price(950.0), "₹950");
        assert_eq!(format_price(2250.0), "₹2,250");
        assert_eq!(format_price(123456.0), "₹1,23,456");
        assert_eq!(format_price(12345678.0), "₹1,23,45,678");
        assert_eq!(format_price(1799.5), "₹1,800");
        assert_eq!(format_price(-4500.0), "-₹4,500");
    }

    #[test]
    fn test_relative_dates() {
        let today = day(19);
        assert_eq!(format_market_date("19/10/2026", today), "Today");
        assert_eq!(format_market_date("18/10/2026", today), "Yesterday");
        assert_eq!(format_market_date("14/10/2026", today), "5 days ago");
        assert_eq!(format_market_date("1/10/2026", today), "01/10/2026");
        assert_eq!(format_market_date("not a date", today), "not a date");
    }

    #[test]
    fn test_group_and_best() {
        let mut prices = fallback_prices(day(19));
        let mut extra = prices[0].clone();
        extra.modal_price = 2400.0;
        extra.market = "Gaya".to_string();
        prices.push(extra);

        let groups = group_by_commodity(&prices);
        let names: Vec<_> = groups.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["Wheat", "Rice", "Potato"]);
        assert_eq!(groups[0].1.len(), 2);

        let best = best_price(&groups[0].1).unwrap();
        assert_eq!(best.market, "Gaya");
        assert!(best_price(&[]).is_none());
    }

    #[test]
    fn test_recent_filter() {
        let mut prices = fallback_prices(day(19));
        prices[1].arrival_date = "01/10/2026".to_string();
        prices[2].arrival_date = "garbled".to_string();

        let recent = recent_prices(&prices, 7, day(19));
        let crops: Vec<_> = recent.iter().map(|p| p.crop_name.as_str()).collect();
        assert_eq!(crops, ["Wheat", "Potato"]);
    }
}
