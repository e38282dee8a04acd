// Monthly sales metrics: load a small period/revenue table, derive growth
// figures, filter, and reduce it to KPI scalars and chart-ready series.
//
// The `sales-dashboard` binary is a thin presentation layer over
// `pipeline::run`.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod metrics;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod reports;
pub mod sample;
pub mod types;
pub mod util;
