use crate::error::{DashboardError, Result};
use crate::types::{DerivedRecord, KpiSummary};
use crate::util::mean_defined;

/// Headline figures for a series. Means and extrema ignore missing values;
/// ties on revenue resolve to the earliest record.
pub fn summarize(records: &[DerivedRecord]) -> Result<KpiSummary> {
    if records.is_empty() {
        return Err(DashboardError::EmptyInput);
    }

    let total_revenue = records.iter().filter_map(|r| r.revenue).sum();

    let mut max_record: Option<&DerivedRecord> = None;
    let mut min_record: Option<&DerivedRecord> = None;
    for r in records {
        let Some(rev) = r.revenue else { continue };
        if max_record.and_then(|m| m.revenue).map_or(true, |m| rev > m) {
            max_record = Some(r);
        }
        if min_record.and_then(|m| m.revenue).map_or(true, |m| rev < m) {
            min_record = Some(r);
        }
    }

    Ok(KpiSummary {
        record_count: records.len(),
        total_revenue,
        mean_yoy: mean_defined(records.iter().map(|r| r.yoy_percent)),
        mean_mom: mean_defined(records.iter().map(|r| r.mom_percent)),
        mean_reported_growth: mean_defined(records.iter().map(|r| r.reported_growth_rate)),
        max_record: max_record.cloned(),
        min_record: min_record.cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterParams;
    use crate::filter::apply;
    use crate::metrics::tests::four_months;
    use crate::types::QuarterSelector;

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(summarize(&[]), Err(DashboardError::EmptyInput)));
    }

    #[test]
    fn q1_total() {
        let params = FilterParams {
            quarter: QuarterSelector::Q1,
            ..FilterParams::default()
        };
        let out = apply(&four_months(), &params);
        let kpi = summarize(&out.records).unwrap();
        assert_eq!(kpi.total_revenue, 310.0);
        assert_eq!(kpi.record_count, 3);
    }

    #[test]
    fn yoy_bounded_max_is_april() {
        let params = FilterParams {
            yoy_min: Some(0.0),
            yoy_max: Some(100.0),
            ..FilterParams::default()
        };
        let out = apply(&four_months(), &params);
        let kpi = summarize(&out.records).unwrap();
        let max = kpi.max_record.unwrap();
        assert_eq!(max.period, "2024-04");
        assert_eq!(max.revenue, Some(150.0));
        assert_eq!(kpi.min_record.unwrap().period, "2024-01");
    }

    #[test]
    fn means_skip_undefined_values() {
        let kpi = summarize(&four_months()).unwrap();
        // MoM is undefined for January: mean of 20, -25, 66.67.
        let mom = kpi.mean_mom.unwrap();
        assert!((mom - (20.0 - 25.0 + (150.0 / 90.0 - 1.0) * 100.0) / 3.0).abs() < 1e-9);
        assert!(kpi.mean_yoy.is_some());
        assert_eq!(kpi.mean_reported_growth, None);
    }

    #[test]
    fn ties_pick_first_occurrence() {
        let mut d = four_months();
        d[0].revenue = Some(150.0);
        d[2].revenue = Some(100.0);
        d[1].revenue = Some(100.0);
        let kpi = summarize(&d).unwrap();
        assert_eq!(kpi.max_record.unwrap().period, "2024-01");
        assert_eq!(kpi.min_record.unwrap().period, "2024-02");
    }

    #[test]
    fn all_missing_revenue_has_no_extrema() {
        let mut d = four_months();
        for r in &mut d {
            r.revenue = None;
        }
        let kpi = summarize(&d).unwrap();
        assert_eq!(kpi.total_revenue, 0.0);
        assert!(kpi.max_record.is_none());
        assert!(kpi.min_record.is_none());
    }
}
