use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown table of the first `max_rows` rows, or a placeholder line.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    println!("{}\n", render_table(rows, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::derived_rows;
    use crate::metrics::tests::four_months;

    #[test]
    fn render_limits_rows() {
        let rows = derived_rows(&four_months());
        let table = render_table(&rows, 2);
        assert!(table.contains("2024-02"));
        assert!(!table.contains("2024-03"));
        assert!(table.contains("YoY(%)"));
        let empty: Vec<crate::types::DerivedRow> = Vec::new();
        assert_eq!(render_table(&empty, 5), "(no rows)");
    }

    #[test]
    fn csv_export_has_header_row() {
        let path = std::env::temp_dir().join(format!("sales_dashboard_{}.csv", std::process::id()));
        write_csv(&path, &derived_rows(&four_months())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Period,Quarter,Revenue"));
        assert_eq!(lines.count(), 4);
    }
}
