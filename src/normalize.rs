use crate::config::ColumnMap;
use crate::error::{DashboardError, Result};
use crate::types::{RawTable, Record};
use crate::util::{canonical_period, parse_f64_safe};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizeReport {
    pub records: usize,
    /// Non-empty numeric cells that could not be parsed.
    pub unparsed_cells: usize,
    /// Records sharing a period with the record before them after sorting.
    pub duplicate_periods: usize,
}

/// Turn raw rows into period-sorted records.
///
/// Fails only when a required column is absent. Cells that do not parse
/// become `None`; duplicate periods are kept in input order.
pub fn normalize(table: &RawTable, columns: &ColumnMap) -> Result<(Vec<Record>, NormalizeReport)> {
    let period_col = columns.period.resolve(&table.headers);
    let revenue_col = columns.revenue.resolve(&table.headers);
    let prior_col = columns.revenue_prior_year.resolve(&table.headers);
    let growth_col = columns.reported_growth_rate.resolve(&table.headers);

    let (period_col, revenue_col, prior_col) = match (period_col, revenue_col, prior_col) {
        (Some(p), Some(r), Some(y)) => (p, r, y),
        _ => {
            let missing: Vec<String> = [
                (period_col, &columns.period),
                (revenue_col, &columns.revenue),
                (prior_col, &columns.revenue_prior_year),
            ]
            .into_iter()
            .filter(|(found, _)| found.is_none())
            .map(|(_, spec)| spec.name.clone())
            .collect();
            return Err(DashboardError::MissingColumns(missing));
        }
    };

    let mut unparsed_cells = 0usize;
    let mut numeric = |cell: Option<&String>, column: &str, period: &str| {
        let value = parse_f64_safe(cell.map(String::as_str));
        if value.is_none() {
            if let Some(raw) = cell.filter(|c| !c.trim().is_empty()) {
                warn!(period, column, raw = raw.as_str(), "unparseable numeric cell treated as missing");
                unparsed_cells += 1;
            }
        }
        value
    };

    let mut records: Vec<Record> = table
        .rows
        .iter()
        .map(|row| {
            let period = canonical_period(row.get(period_col).map(String::as_str).unwrap_or(""));
            let revenue = numeric(row.get(revenue_col), revenue_col, &period);
            let revenue_prior_year = numeric(row.get(prior_col), prior_col, &period);
            let reported_growth_rate = match growth_col {
                Some(col) => numeric(row.get(col), col, &period),
                None => None,
            };
            Record {
                period,
                revenue,
                revenue_prior_year,
                reported_growth_rate,
            }
        })
        .collect();

    // `sort_by` is stable, so duplicate periods keep their input order.
    records.sort_by(|a, b| a.period.cmp(&b.period));

    let duplicate_periods = records
        .windows(2)
        .filter(|w| w[0].period == w[1].period)
        .count();
    if duplicate_periods > 0 {
        warn!(duplicate_periods, "input contains duplicate periods; kept as separate records");
    }

    let report = NormalizeReport {
        records: records.len(),
        unparsed_cells,
        duplicate_periods,
    };
    debug!(?report, "normalized records");
    Ok((records, report))
}
