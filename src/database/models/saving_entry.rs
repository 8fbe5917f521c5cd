use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// A logged savings entry as stored in `savings_entries`.
#[derive(Debug, Clone)]
pub struct SavingEntry {
    pub entry_id: i64,
    pub name: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// Payload for a new entry before it gets an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewSavingEntry {
    pub name: String,
    pub amount: Decimal,
}

impl SavingEntry {
    /// Display form used by the API: rupee sign, thousands separators,
    /// exactly two decimals.
    pub fn formatted_amount(&self) -> String {
        format_inr(&self.amount)
    }
}

pub fn format_inr(amount: &Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let raw = rounded.abs().to_string();
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (raw, "00".to_string()),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("\u{20b9}{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formats_with_grouping_and_two_decimals() {
        assert_eq!(format_inr(&dec("1234567.891")), "₹1,234,567.89");
        assert_eq!(format_inr(&dec("1000")), "₹1,000.00");
        assert_eq!(format_inr(&dec("999.5")), "₹999.50");
        assert_eq!(format_inr(&dec("0")), "₹0.00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_inr(&dec("10.005")), "₹10.01");
        assert_eq!(format_inr(&dec("-10.005")), "₹-10.01");
    }
}
