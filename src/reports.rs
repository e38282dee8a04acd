// Chart-ready series and the tabular rows behind the terminal previews and
// CSV export.
use crate::aggregate::Aggregates;
use crate::config::Palette;
use crate::types::{
    DerivedRecord, DerivedRow, KpiRow, KpiSummary, ParetoEntry, ParetoRow, RevenuePair,
    SeriesPoint, WaterfallStep,
};
use crate::util::{format_number, format_opt, format_won};
use serde::Serialize;

/// Every series a chart renderer needs, plus the palette to draw it with.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub revenue_vs_prior_year: Vec<RevenuePair>,
    pub yoy_percent: Vec<SeriesPoint>,
    pub mom_percent: Vec<SeriesPoint>,
    pub rolling_3m_avg: Vec<SeriesPoint>,
    pub delta_vs_prior_year: Vec<SeriesPoint>,
    pub reported_growth_rate: Vec<SeriesPoint>,
    pub cumulative_revenue: Vec<SeriesPoint>,
    pub waterfall: Vec<WaterfallStep>,
    pub pareto: Vec<ParetoEntry>,
    pub style: Palette,
}

pub fn build_chart_bundle(
    records: &[DerivedRecord],
    aggregates: &Aggregates,
    palette: &Palette,
) -> ChartBundle {
    let series = |f: fn(&DerivedRecord) -> Option<f64>| -> Vec<SeriesPoint> {
        records
            .iter()
            .map(|r| SeriesPoint {
                period: r.period.clone(),
                value: f(r),
            })
            .collect()
    };
    ChartBundle {
        revenue_vs_prior_year: records
            .iter()
            .map(|r| RevenuePair {
                period: r.period.clone(),
                revenue: r.revenue,
                revenue_prior_year: r.revenue_prior_year,
            })
            .collect(),
        yoy_percent: series(|r| r.yoy_percent),
        mom_percent: series(|r| r.mom_percent),
        rolling_3m_avg: series(|r| r.rolling_3m_avg),
        delta_vs_prior_year: series(|r| r.delta_vs_prior_year),
        reported_growth_rate: series(|r| r.reported_growth_rate),
        cumulative_revenue: aggregates.cumulative.clone(),
        waterfall: aggregates.waterfall.clone(),
        pareto: aggregates.pareto.clone(),
        style: palette.clone(),
    }
}

pub fn derived_rows(records: &[DerivedRecord]) -> Vec<DerivedRow> {
    records
        .iter()
        .map(|r| DerivedRow {
            period: r.period.clone(),
            quarter: r.quarter.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
            revenue: format_opt(r.revenue, 0),
            revenue_prior_year: format_opt(r.revenue_prior_year, 0),
            delta_vs_prior_year: format_opt(r.delta_vs_prior_year, 0),
            yoy_percent: format_opt(r.yoy_percent, 2),
            mom_percent: format_opt(r.mom_percent, 2),
            rolling_3m_avg: format_opt(r.rolling_3m_avg, 0),
            reported_growth_rate: format_opt(r.reported_growth_rate, 1),
        })
        .collect()
}

pub fn pareto_rows(entries: &[ParetoEntry]) -> Vec<ParetoRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, e)| ParetoRow {
            rank: idx + 1,
            period: e.period.clone(),
            revenue: format_opt(e.revenue, 0),
            cumulative_share: format_opt(e.cumulative_share_percent, 1),
        })
        .collect()
}

pub fn kpi_rows(kpi: &KpiSummary) -> Vec<KpiRow> {
    let pct = |v: Option<f64>| {
        v.map(|v| format!("{}%", format_number(v, 2)))
            .unwrap_or_else(|| "-".to_string())
    };
    let extremum = |label: &str, r: &Option<DerivedRecord>| KpiRow {
        metric: label.to_string(),
        value: format_won(r.as_ref().and_then(|r| r.revenue)),
        period: r.as_ref().map(|r| r.period.clone()).unwrap_or_default(),
    };
    let mut rows = vec![
        KpiRow {
            metric: "Total revenue".to_string(),
            value: format_won(Some(kpi.total_revenue)),
            period: String::new(),
        },
        KpiRow {
            metric: "Mean YoY".to_string(),
            value: pct(kpi.mean_yoy),
            period: String::new(),
        },
        KpiRow {
            metric: "Mean MoM".to_string(),
            value: pct(kpi.mean_mom),
            period: String::new(),
        },
    ];
    if kpi.mean_reported_growth.is_some() {
        rows.push(KpiRow {
            metric: "Mean reported growth".to_string(),
            value: pct(kpi.mean_reported_growth),
            period: String::new(),
        });
    }
    rows.push(extremum("Max revenue", &kpi.max_record));
    rows.push(extremum("Min revenue", &kpi.min_record));
    rows
}
