use crate::types::{DerivedRecord, Quarter, Record};
use crate::util::{pct_change, period_month};

/// Derive YoY, MoM, delta vs prior year, the 3-period rolling average and
/// the quarter for each record.
///
/// One left-to-right pass; each output depends only on the current record
/// and at most the two before it. Output has the same length and order.
pub fn compute(records: &[Record]) -> Vec<DerivedRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let prev = i.checked_sub(1).map(|j| &records[j]);
            let window = if i >= 2 { Some(&records[i - 2..=i]) } else { None };
            DerivedRecord {
                period: r.period.clone(),
                revenue: r.revenue,
                revenue_prior_year: r.revenue_prior_year,
                reported_growth_rate: r.reported_growth_rate,
                yoy_percent: yoy_percent(r.revenue, r.revenue_prior_year),
                mom_percent: prev.and_then(|p| pct_change(r.revenue, p.revenue)),
                delta_vs_prior_year: match (r.revenue, r.revenue_prior_year) {
                    (Some(cur), Some(prior)) => Some(cur - prior),
                    _ => None,
                },
                rolling_3m_avg: window.and_then(rolling_mean),
                quarter: period_month(&r.period).and_then(Quarter::from_month),
            }
        })
        .collect()
}

/// Defined only for a strictly positive prior-year revenue.
fn yoy_percent(revenue: Option<f64>, prior: Option<f64>) -> Option<f64> {
    match (revenue, prior) {
        (Some(cur), Some(prior)) if prior > 0.0 => Some((cur / prior - 1.0) * 100.0),
        _ => None,
    }
}

// Any missing revenue in the window leaves the average undefined.
fn rolling_mean(window: &[Record]) -> Option<f64> {
    let sum = window
        .iter()
        .map(|r| r.revenue)
        .sum::<Option<f64>>()?;
    Some(sum / window.len() as f64)
}
