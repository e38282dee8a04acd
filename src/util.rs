// Parsing, period and formatting helpers.
//
// Everything that touches raw cell text lives here so the metric stages
// only ever see `Option<f64>` and canonical period tokens.
use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};

/// Parse a cell into `f64` the way spreadsheet exports usually need:
///
/// - Accepts `Option<&str>` so absent cells flow straight through.
/// - Trims whitespace and strips thousands separators (`","`).
/// - Returns `None` for empty, unparseable or non-finite values.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', "");
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical `YYYY-MM` token: the first seven characters of the trimmed cell.
pub fn canonical_period(raw: &str) -> String {
    raw.trim().chars().take(7).collect()
}

/// Month number of a canonical period, if it is a real `YYYY-MM` month.
pub fn period_month(period: &str) -> Option<u32> {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
        .ok()
        .map(|d| d.month())
}

/// Percent change from `prev` to `cur`. Undefined when either side is
/// missing or the base is zero.
pub fn pct_change(cur: Option<f64>, prev: Option<f64>) -> Option<f64> {
    match (cur, prev) {
        (Some(c), Some(p)) if p != 0.0 => Some((c / p - 1.0) * 100.0),
        _ => None,
    }
}

/// Mean of the defined values only; `None` when nothing is defined.
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals with `en` thousands separators, e.g. `1,234,567.89`.
    let s = format!("{:.*}", decimals, n.abs());
    let neg = n.is_sign_negative() && s.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// `format_number` for optional values; missing renders as `-`.
pub fn format_opt(n: Option<f64>, decimals: usize) -> String {
    n.map(|v| format_number(v, decimals))
        .unwrap_or_else(|| "-".to_string())
}

/// Whole-unit currency amount, e.g. `12,000,000 원`.
pub fn format_won(n: Option<f64>) -> String {
    match n {
        Some(v) => format!("{} 원", format_number(v, 0)),
        None => "-".to_string(),
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
