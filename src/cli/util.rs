use rust_decimal::Decimal;

pub fn fmt_money(v: f64) -> String {
    format!("{v:.2}")
}

pub fn fmt_rate(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

pub fn parse_money(s: &str) -> Option<Decimal> {
    Decimal::from_str_exact(s.trim()).ok()
}

pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
