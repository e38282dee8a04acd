// End-to-end run: load → normalize → derive → filter → {aggregate, summarize}.

use crate::aggregate::{aggregate, Aggregates};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::{self, FilterOutcome};
use crate::kpi::summarize;
use crate::loader::{ingest, IngestReport};
use crate::metrics::compute;
use crate::normalize::{normalize, NormalizeReport};
use crate::reports::{build_chart_bundle, ChartBundle};
use crate::sample::SAMPLE_SERIES;
use crate::types::{DerivedRecord, KpiSummary};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub ingest: IngestReport,
    pub normalize: NormalizeReport,
    /// The full derived series, before filtering.
    pub derived: Vec<DerivedRecord>,
    pub filtered: FilterOutcome,
    pub aggregates: Aggregates,
    pub kpi: KpiSummary,
    pub charts: ChartBundle,
}

/// What gets written by `--export-json`.
#[derive(Debug, Serialize)]
pub struct DashboardExport<'a> {
    pub kpi: &'a KpiSummary,
    pub filter_notice: Option<String>,
    pub charts: &'a ChartBundle,
}

impl DashboardRun {
    pub fn export(&self) -> DashboardExport<'_> {
        DashboardExport {
            kpi: &self.kpi,
            filter_notice: self.filtered.notice.map(|n| n.to_string()),
            charts: &self.charts,
        }
    }
}

/// Run every stage on `input`, or on the built-in sample when `None`.
pub fn run(input: Option<&[u8]>, config: &DashboardConfig) -> Result<DashboardRun> {
    let (table, ingest_report) = ingest(input, &SAMPLE_SERIES, &config.columns)?;
    let (records, normalize_report) = normalize(&table, &config.columns)?;
    let derived = compute(&records);
    let filtered = filter::apply(&derived, &config.filter);
    let aggregates = aggregate(&filtered.records);
    let kpi = summarize(&filtered.records)?;
    let charts = build_chart_bundle(&filtered.records, &aggregates, &config.palette);

    Ok(DashboardRun {
        ingest: ingest_report,
        normalize: normalize_report,
        derived,
        filtered,
        aggregates,
        kpi,
        charts,
    })
}
