use crate::config::FilterParams;
use crate::types::DerivedRecord;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Condition the caller must surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterNotice {
    /// Nothing matched; the unfiltered series was returned instead.
    EmptyFilterResult,
}

impl fmt::Display for FilterNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterNotice::EmptyFilterResult => {
                f.write_str("no records match the filter; showing the unfiltered series")
            }
        }
    }
}

#[must_use = "an empty filter result must be reported to the user"]
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub records: Vec<DerivedRecord>,
    pub notice: Option<FilterNotice>,
}

/// Keep records in the selected quarter whose YoY lies within the bounds.
///
/// A record with undefined YoY fails any bound. When nothing survives the
/// input is returned unchanged together with `FilterNotice::EmptyFilterResult`.
pub fn apply(records: &[DerivedRecord], params: &FilterParams) -> FilterOutcome {
    let kept: Vec<DerivedRecord> = records
        .iter()
        .filter(|r| retains(r, params))
        .cloned()
        .collect();

    if kept.is_empty() {
        warn!(?params, "filter matched no records, falling back to unfiltered series");
        return FilterOutcome {
            records: records.to_vec(),
            notice: Some(FilterNotice::EmptyFilterResult),
        };
    }

    debug!(kept = kept.len(), of = records.len(), "applied filter");
    FilterOutcome {
        records: kept,
        notice: None,
    }
}

fn retains(record: &DerivedRecord, params: &FilterParams) -> bool {
    let within = |bound: Option<f64>, ok: fn(f64, f64) -> bool| match bound {
        None => true,
        Some(b) => record.yoy_percent.is_some_and(|yoy| ok(yoy, b)),
    };
    params.quarter.matches(record.quarter)
        && within(params.yoy_min, |yoy, b| yoy >= b)
        && within(params.yoy_max, |yoy, b| yoy <= b)
}
