// Running totals, the month-to-month bridge and the Pareto ranking.
use crate::types::{DerivedRecord, Measure, ParetoEntry, SeriesPoint, WaterfallStep};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct Aggregates {
    pub cumulative: Vec<SeriesPoint>,
    pub waterfall: Vec<WaterfallStep>,
    pub pareto: Vec<ParetoEntry>,
}

pub fn aggregate(records: &[DerivedRecord]) -> Aggregates {
    Aggregates {
        cumulative: cumulative_revenue(records),
        waterfall: waterfall(records),
        pareto: pareto(records),
    }
}

/// Running sum of revenue. A record with missing revenue gets no value and
/// does not interrupt the sum.
pub fn cumulative_revenue(records: &[DerivedRecord]) -> Vec<SeriesPoint> {
    let mut running = 0.0;
    records
        .iter()
        .map(|r| SeriesPoint {
            period: r.period.clone(),
            value: r.revenue.map(|v| {
                running += v;
                running
            }),
        })
        .collect()
}

/// First revenue as an absolute bar, then one relative step per period.
/// With no missing revenue the values sum to the last revenue.
pub fn waterfall(records: &[DerivedRecord]) -> Vec<WaterfallStep> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if i == 0 {
                return WaterfallStep {
                    period: r.period.clone(),
                    value: r.revenue,
                    measure: Measure::Absolute,
                };
            }
            let value = match (r.revenue, records[i - 1].revenue) {
                (Some(cur), Some(prev)) => Some(cur - prev),
                _ => None,
            };
            WaterfallStep {
                period: r.period.clone(),
                value,
                measure: Measure::Relative,
            }
        })
        .collect()
}

/// Records by descending revenue with the running share of total revenue.
///
/// Ties keep their input order; missing revenues rank last with no share.
/// Shares are undefined everywhere when total revenue is zero.
pub fn pareto(records: &[DerivedRecord]) -> Vec<ParetoEntry> {
    let mut ranked: Vec<&DerivedRecord> = records.iter().collect();
    ranked.sort_by(|a, b| match (a.revenue, b.revenue) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    // Summing in rank order makes the last share exactly 100.
    let running: Vec<Option<f64>> = ranked
        .iter()
        .scan(0.0, |acc, r| {
            Some(r.revenue.map(|v| {
                *acc += v;
                *acc
            }))
        })
        .collect();
    let total = running.iter().rev().find_map(|v| *v).unwrap_or(0.0);

    ranked
        .into_iter()
        .zip(running)
        .map(|(r, cum)| ParetoEntry {
            period: r.period.clone(),
            revenue: r.revenue,
            cumulative_share_percent: if total == 0.0 {
                None
            } else {
                cum.map(|c| c / total * 100.0)
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute;
    use crate::metrics::tests::{four_months, record};

    #[test]
    fn cumulative_is_running_sum() {
        let c = cumulative_revenue(&four_months());
        let values: Vec<Option<f64>> = c.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(100.0), Some(220.0), Some(310.0), Some(460.0)]);
    }

    #[test]
    fn cumulative_skips_missing_revenue() {
        let mut d = four_months();
        d[1].revenue = None;
        let values: Vec<Option<f64>> = cumulative_revenue(&d).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(100.0), None, Some(190.0), Some(340.0)]);
    }

    #[test]
    fn waterfall_bridges_to_last_revenue() {
        let w = waterfall(&four_months());
        let values: Vec<f64> = w.iter().map(|s| s.value.unwrap()).collect();
        assert_eq!(values, vec![100.0, 20.0, -30.0, 60.0]);
        assert_eq!(w[0].measure, Measure::Absolute);
        assert!(w[1..].iter().all(|s| s.measure == Measure::Relative));
        let sum: f64 = values.iter().sum();
        assert!((sum - 150.0).abs() < 1e-9);
    }

    #[test]
    fn waterfall_telescopes_for_fractional_revenue() {
        let d = compute(&[
            record("2024-01", 10.1, 1.0),
            record("2024-02", -3.7, 1.0),
            record("2024-03", 0.35, 1.0),
            record("2024-04", 1234.567, 1.0),
            record("2024-05", 98.76, 1.0),
        ]);
        let sum: f64 = waterfall(&d).iter().filter_map(|s| s.value).sum();
        assert!((sum - 98.76).abs() < 1e-9);
    }

    #[test]
    fn pareto_ranks_and_accumulates_share() {
        let p = pareto(&four_months());
        let periods: Vec<&str> = p.iter().map(|e| e.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-04", "2024-02", "2024-01", "2024-03"]);
        let shares: Vec<f64> = p.iter().map(|e| e.cumulative_share_percent.unwrap()).collect();
        let expected = [32.6, 58.7, 80.4, 100.0];
        for (got, want) in shares.iter().zip(expected) {
            assert!((got - want).abs() < 0.05, "{got} vs {want}");
        }
        assert!(shares.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*shares.last().unwrap(), 100.0);
    }

    #[test]
    fn pareto_ties_keep_period_order() {
        let d = compute(&[
            record("2024-01", 50.0, 1.0),
            record("2024-02", 80.0, 1.0),
            record("2024-03", 50.0, 1.0),
        ]);
        let periods: Vec<String> = pareto(&d).into_iter().map(|e| e.period).collect();
        assert_eq!(periods, vec!["2024-02", "2024-01", "2024-03"]);
    }

    #[test]
    fn pareto_zero_total_has_no_share() {
        let d = compute(&[record("2024-01", 0.0, 1.0), record("2024-02", 0.0, 1.0)]);
        assert!(pareto(&d).iter().all(|e| e.cumulative_share_percent.is_none()));
    }

    #[test]
    fn pareto_puts_missing_last() {
        let mut d = four_months();
        d[3].revenue = None;
        let p = pareto(&d);
        assert_eq!(p.last().unwrap().period, "2024-04");
        assert_eq!(p.last().unwrap().cumulative_share_percent, None);
        assert_eq!(p[2].cumulative_share_percent, Some(100.0));
    }
}
