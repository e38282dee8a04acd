// Input decoding and CSV reading.
//
// The loader only turns bytes into trimmed, string-keyed rows. Column
// resolution and numeric coercion happen in `normalize`.
use crate::config::ColumnMap;
use crate::error::{DashboardError, Result};
use crate::sample::SampleSeries;
use crate::types::{RawRow, RawTable};
use csv::{ReaderBuilder, Trim};
use encoding_rs::EUC_KR;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextEncoding {
    Utf8,
    Cp949,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Cp949 => "cp949",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputSource {
    Sample,
    Input,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub source: InputSource,
    pub encoding: TextEncoding,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Read `input`, or the sample series when there is none.
pub fn ingest(
    input: Option<&[u8]>,
    sample: &SampleSeries,
    columns: &ColumnMap,
) -> Result<(RawTable, IngestReport)> {
    let Some(bytes) = input else {
        info!(rows = sample.0.len(), "no input supplied, using built-in sample series");
        let table = sample_table(sample, columns);
        let report = IngestReport {
            source: InputSource::Sample,
            encoding: TextEncoding::Utf8,
            rows_read: table.rows.len(),
            rows_skipped: 0,
        };
        return Ok((table, report));
    };

    let (text, encoding) = decode(bytes)?;
    let (table, rows_skipped) = read_table(&text)?;
    debug!(
        headers = ?table.headers,
        rows = table.rows.len(),
        skipped = rows_skipped,
        "read input table"
    );
    let report = IngestReport {
        source: InputSource::Input,
        encoding,
        rows_read: table.rows.len() + rows_skipped,
        rows_skipped,
    };
    Ok((table, report))
}

/// Decode as UTF-8 first, then as CP949. A UTF-8 byte-order mark is dropped.
pub fn decode(bytes: &[u8]) -> Result<(Cow<'_, str>, TextEncoding)> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        let s = s.strip_prefix('\u{feff}').unwrap_or(s);
        return Ok((Cow::Borrowed(s), TextEncoding::Utf8));
    }
    // encoding_rs' EUC-KR is the WHATWG definition, i.e. windows-949 / cp949.
    match EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => {
            info!("input is not valid UTF-8, decoded as cp949");
            Ok((text, TextEncoding::Cp949))
        }
        None => Err(DashboardError::Decoding {
            encodings: vec![TextEncoding::Utf8.label(), TextEncoding::Cp949.label()],
        }),
    }
}

/// Parse CSV text into a table. Records the reader rejects are skipped and
/// counted rather than failing the whole input.
pub fn read_table(text: &str) -> Result<(RawTable, usize)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = dedup_headers(rdr.headers()?.iter().map(|h| h.trim().to_string()));

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                // +2: one for the header row, one for 1-based lines.
                warn!(line = idx + 2, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };
        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }
    Ok((RawTable { headers, rows }, skipped))
}

/// Keep the first occurrence of a header name; later ones get a `.N`
/// suffix so they never shadow it.
fn dedup_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut headers: Vec<String> = Vec::new();
    for name in raw {
        if !headers.contains(&name) {
            headers.push(name);
            continue;
        }
        let mut n = 1;
        let renamed = loop {
            let candidate = format!("{name}.{n}");
            if !headers.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        warn!(header = name.as_str(), renamed = renamed.as_str(), "duplicate column header renamed");
        headers.push(renamed);
    }
    headers
}

fn sample_table(sample: &SampleSeries, columns: &ColumnMap) -> RawTable {
    let headers = vec![
        columns.period.name.clone(),
        columns.revenue.name.clone(),
        columns.revenue_prior_year.name.clone(),
        columns.reported_growth_rate.name.clone(),
    ];
    let rows = sample
        .0
        .iter()
        .map(|m| {
            let cells = [
                m.period.to_string(),
                m.revenue.to_string(),
                m.revenue_prior_year.to_string(),
                m.reported_growth_rate.to_string(),
            ];
            headers.iter().cloned().zip(cells).collect()
        })
        .collect();
    RawTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SAMPLE_SERIES;

    #[test]
    fn missing_input_uses_sample() {
        let columns = ColumnMap::default();
        let (table, report) = ingest(None, &SAMPLE_SERIES, &columns).unwrap();
        assert_eq!(report.source, InputSource::Sample);
        assert_eq!(table.rows.len(), 12);
        assert_eq!(table.rows[0]["월"], "2024-01");
        assert_eq!(table.rows[0]["매출액"], "12000000");
        assert_eq!(table.rows[2]["증감률"], "-14.1");
    }

    #[test]
    fn headers_are_trimmed() {
        let text = " 월 , 매출액,전년동월 \n2024-01,\"1,000\",900\n";
        let (table, skipped) = read_table(text).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(table.headers, vec!["월", "매출액", "전년동월"]);
        assert_eq!(table.rows[0]["매출액"], "1,000");
    }

    #[test]
    fn duplicate_headers_keep_first_column() {
        let text = "월,매출액,전년동월,매출액,매출액\n2024-01,100,90,5,7\n";
        let (table, _) = read_table(text).unwrap();
        assert_eq!(table.headers, vec!["월", "매출액", "전년동월", "매출액.1", "매출액.2"]);
        assert_eq!(table.rows[0]["매출액"], "100");
        assert_eq!(table.rows[0]["매출액.1"], "5");
        assert_eq!(table.rows[0]["매출액.2"], "7");
    }

    #[test]
    fn utf8_bom_is_dropped() {
        let bytes = "\u{feff}period,revenue\n".as_bytes();
        let (text, enc) = decode(bytes).unwrap();
        assert_eq!(enc, TextEncoding::Utf8);
        assert!(text.starts_with("period"));
    }

    #[test]
    fn falls_back_to_cp949() {
        let (bytes, _, _) = EUC_KR.encode("월,매출액,전년동월\n2024-01,100,90\n");
        let (table, report) =
            ingest(Some(&*bytes), &SAMPLE_SERIES, &ColumnMap::default()).unwrap();
        assert_eq!(report.encoding, TextEncoding::Cp949);
        assert_eq!(report.source, InputSource::Input);
        assert_eq!(table.headers[0], "월");
        assert_eq!(table.rows[0]["전년동월"], "90");
    }

    #[test]
    fn undecodable_input_names_both_encodings() {
        let err = decode(&[0x61, 0xff, 0xff, 0x80]).unwrap_err();
        match err {
            DashboardError::Decoding { encodings } => {
                assert_eq!(encodings, vec!["utf-8", "cp949"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_rows_keep_present_cells() {
        let text = "period,revenue,revenue_prior_year\n2024-01,100\n";
        let (table, _) = read_table(text).unwrap();
        assert_eq!(table.rows[0].get("revenue").map(String::as_str), Some("100"));
        assert!(!table.rows[0].contains_key("revenue_prior_year"));
    }
}
