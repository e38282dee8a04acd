// Command-line front end.
//
// Loads a CSV (or the built-in sample), runs the metrics pipeline and then:
// - prints the KPI set and previews of the derived and Pareto tables,
// - surfaces the filter notice when the filter matched nothing,
// - optionally exports the derived table to CSV and the charts to JSON.
use clap::Parser;
use sales_dashboard::config::{ColumnSpec, DashboardConfig, FilterParams};
use sales_dashboard::error::DashboardError;
use sales_dashboard::loader::InputSource;
use sales_dashboard::pipeline::{self, DashboardRun};
use sales_dashboard::types::QuarterSelector;
use sales_dashboard::{output, reports, util};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sales-dashboard", version, about = "Monthly sales KPIs and chart series")]
struct Args {
    /// CSV with period, revenue and prior-year revenue columns. Uses the
    /// built-in sample when omitted.
    #[arg(short, long, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Quarter to keep.
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = QuarterSelector::All)]
    quarter: QuarterSelector,

    /// Lowest YoY (%) to keep.
    #[arg(long, allow_negative_numbers = true)]
    yoy_min: Option<f64>,

    /// Highest YoY (%) to keep.
    #[arg(long, allow_negative_numbers = true)]
    yoy_max: Option<f64>,

    /// Header of the period column.
    #[arg(long)]
    period_col: Option<String>,

    /// Header of the revenue column.
    #[arg(long)]
    revenue_col: Option<String>,

    /// Header of the prior-year revenue column.
    #[arg(long)]
    prior_col: Option<String>,

    /// Header of the reported growth-rate column.
    #[arg(long)]
    growth_col: Option<String>,

    /// Write the derived table to this CSV file.
    #[arg(long, value_name = "CSV")]
    export_csv: Option<PathBuf>,

    /// Write KPIs and chart series to this JSON file.
    #[arg(long, value_name = "JSON")]
    export_json: Option<PathBuf>,

    /// Rows shown in each table preview.
    #[arg(long, default_value_t = 12)]
    preview_rows: usize,

    /// More log output (-v info, -vv debug). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig {
            filter: FilterParams {
                quarter: self.quarter,
                yoy_min: self.yoy_min,
                yoy_max: self.yoy_max,
            },
            ..DashboardConfig::default()
        };
        let columns = &mut config.columns;
        for (flag, spec) in [
            (&self.period_col, &mut columns.period),
            (&self.revenue_col, &mut columns.revenue),
            (&self.prior_col, &mut columns.revenue_prior_year),
            (&self.growth_col, &mut columns.reported_growth_rate),
        ] {
            if let Some(name) = flag {
                *spec = ColumnSpec::exact(name);
            }
        }
        config
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read the input file (if any) and run the pipeline.
fn handle_load(args: &Args) -> Result<DashboardRun, DashboardError> {
    let bytes = match &args.input {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };
    let run = pipeline::run(bytes.as_deref(), &args.config())?;

    match run.ingest.source {
        InputSource::Sample => println!("No input file given; using the built-in 12-month sample."),
        InputSource::Input => println!(
            "Processing dataset... ({} rows loaded, {} decoded)",
            util::format_int(run.ingest.rows_read as u64),
            run.ingest.encoding.label()
        ),
    }
    if run.ingest.rows_skipped > 0 {
        println!(
            "Note: {} rows skipped due to CSV errors.",
            util::format_int(run.ingest.rows_skipped as u64)
        );
    }
    if run.normalize.unparsed_cells > 0 {
        println!(
            "Note: {} cells could not be read as numbers and are treated as missing.",
            util::format_int(run.normalize.unparsed_cells as u64)
        );
    }
    if run.normalize.duplicate_periods > 0 {
        println!(
            "Note: {} duplicate periods kept as separate rows.",
            util::format_int(run.normalize.duplicate_periods as u64)
        );
    }
    println!();
    Ok(run)
}

/// Print the KPI set and table previews, then write any requested exports.
fn handle_generate_reports(args: &Args, run: &DashboardRun) -> Result<(), DashboardError> {
    if let Some(notice) = run.filtered.notice {
        println!("Notice: {notice}\n");
    }

    output::preview_table("Key figures", None, &reports::kpi_rows(&run.kpi), usize::MAX);

    let note = format!(
        "{} of {} periods",
        run.filtered.records.len(),
        run.derived.len()
    );
    let derived = reports::derived_rows(&run.filtered.records);
    output::preview_table("Monthly metrics", Some(&note), &derived, args.preview_rows);

    let pareto = reports::pareto_rows(&run.aggregates.pareto);
    output::preview_table(
        "Pareto: revenue contribution by month",
        Some("descending revenue, cumulative share"),
        &pareto,
        args.preview_rows,
    );

    if let Some(path) = &args.export_csv {
        output::write_csv(path, &derived)?;
        println!("(Derived table exported to {})", path.display());
    }
    if let Some(path) = &args.export_json {
        output::write_json(path, &run.export())?;
        println!("(KPIs and chart series exported to {})", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = handle_load(&args).and_then(|run| handle_generate_reports(&args, &run));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
