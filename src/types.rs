use clap::ValueEnum;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tabled::Tabled;

/// One raw input row, keyed by trimmed header name.
pub type RawRow = HashMap<String, String>;

/// Tabular input as produced by the loader: trimmed headers plus
/// string-keyed rows in file order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// A normalized monthly sales record. Numeric fields are `None` when the
/// source cell was empty or could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub period: String,
    pub revenue: Option<f64>,
    pub revenue_prior_year: Option<f64>,
    pub reported_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn from_month(month: u32) -> Option<Quarter> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        f.write_str(s)
    }
}

/// Quarter selection for the filter stage. `All` keeps every quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum QuarterSelector {
    #[default]
    All,
    Q1,
    Q2,
    Q3,
    Q4,
}

impl QuarterSelector {
    pub fn matches(self, quarter: Option<Quarter>) -> bool {
        let wanted = match self {
            QuarterSelector::All => return true,
            QuarterSelector::Q1 => Quarter::Q1,
            QuarterSelector::Q2 => Quarter::Q2,
            QuarterSelector::Q3 => Quarter::Q3,
            QuarterSelector::Q4 => Quarter::Q4,
        };
        quarter == Some(wanted)
    }
}

/// A record plus the metrics derived from its position in the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRecord {
    pub period: String,
    pub revenue: Option<f64>,
    pub revenue_prior_year: Option<f64>,
    pub reported_growth_rate: Option<f64>,
    pub yoy_percent: Option<f64>,
    pub mom_percent: Option<f64>,
    pub delta_vs_prior_year: Option<f64>,
    pub rolling_3m_avg: Option<f64>,
    pub quarter: Option<Quarter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Absolute,
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallStep {
    pub period: String,
    pub value: Option<f64>,
    pub measure: Measure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoEntry {
    pub period: String,
    pub revenue: Option<f64>,
    pub cumulative_share_percent: Option<f64>,
}

/// A `(period, value)` pair in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub period: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePair {
    pub period: String,
    pub revenue: Option<f64>,
    pub revenue_prior_year: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    pub record_count: usize,
    pub total_revenue: f64,
    pub mean_yoy: Option<f64>,
    pub mean_mom: Option<f64>,
    pub mean_reported_growth: Option<f64>,
    pub max_record: Option<DerivedRecord>,
    pub min_record: Option<DerivedRecord>,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DerivedRow {
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "Quarter")]
    #[tabled(rename = "Quarter")]
    pub quarter: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "PriorYear")]
    #[tabled(rename = "PriorYear")]
    pub revenue_prior_year: String,
    #[serde(rename = "DeltaPriorYear")]
    #[tabled(rename = "DeltaPriorYear")]
    pub delta_vs_prior_year: String,
    #[serde(rename = "YoY(%)")]
    #[tabled(rename = "YoY(%)")]
    pub yoy_percent: String,
    #[serde(rename = "MoM(%)")]
    #[tabled(rename = "MoM(%)")]
    pub mom_percent: String,
    #[serde(rename = "Rolling3M")]
    #[tabled(rename = "Rolling3M")]
    pub rolling_3m_avg: String,
    #[serde(rename = "ReportedGrowth(%)")]
    #[tabled(rename = "ReportedGrowth(%)")]
    pub reported_growth_rate: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ParetoRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Period")]
    #[tabled(rename = "Period")]
    pub period: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "CumulativeShare(%)")]
    #[tabled(rename = "CumulativeShare(%)")]
    pub cumulative_share: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Period")]
    pub period: String,
}
