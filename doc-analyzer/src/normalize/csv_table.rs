use crate::{errors::NormalizeError, file_kind::FileKind};

/// Parses CSV (first line is the header) and renders the first `max_rows`
/// data rows as a fixed-width table.
///
/// The whole file is parsed so a malformed row anywhere is reported, but only
/// the sample is rendered. Layout follows a pandas `DataFrame.to_string()`:
/// a left-justified 0-based index column, every data column right-aligned to
/// its widest cell, two spaces between columns.
///
/// # Errors
/// [`NormalizeError::Parse`] for an empty file, a row whose field count
/// differs from the header, or non-UTF-8 fields.
pub fn render_csv_sample(bytes: &[u8], max_rows: usize) -> Result<String, NormalizeError> {
    let parse_err = |e: csv::Error| NormalizeError::parse(FileKind::Csv, e);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(NormalizeError::parse(
            FileKind::Csv,
            "no columns to parse from file",
        ));
    }

    let mut sample: Vec<Vec<String>> = Vec::with_capacity(max_rows);
    let mut total_rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(parse_err)?;
        if sample.len() < max_rows {
            sample.push(record.iter().map(str::to_string).collect());
        }
        total_rows += 1;
    }

    tracing::debug!(
        columns = headers.len(),
        total_rows,
        sampled = sample.len(),
        "csv sampled"
    );

    Ok(render_table(&headers, &sample))
}

fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return format!("Empty DataFrame\nColumns: [{}]\nIndex: []", headers.join(", "));
    }

    let index: Vec<String> = (0..rows.len()).map(|i| i.to_string()).collect();
    let index_width = index.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let mut header_line = " ".repeat(index_width);
    for (h, w) in headers.iter().zip(widths.iter().copied()) {
        header_line.push_str(&format!("  {h:>w$}"));
    }
    lines.push(header_line);

    for (label, row) in index.iter().zip(rows) {
        let mut line = format!("{label:<index_width$}");
        for (cell, w) in row.iter().zip(widths.iter().copied()) {
            line.push_str(&format!("  {cell:>w$}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_file_renders_every_row() {
        let csv = b"city,temp\nOslo,3\nLima,19\nCairo,28\n";
        let out = render_csv_sample(csv, 10).unwrap();
        assert_eq!(
            out,
            "    city  temp\n0   Oslo     3\n1   Lima    19\n2  Cairo    28"
        );
    }

    #[test]
    fn large_file_keeps_header_plus_first_ten_rows() {
        let mut csv = String::from("id,value\n");
        for i in 0..25 {
            csv.push_str(&format!("{i},value-{i}\n"));
        }
        let out = render_csv_sample(csv.as_bytes(), 10).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].contains("id") && lines[0].contains("value"));
        assert!(lines[10].starts_with('9'));
        assert!(lines[10].ends_with("value-9"));
        assert!(!out.contains("value-10"));
    }

    #[test]
    fn index_labels_are_left_justified() {
        let mut csv = String::from("n\n");
        for i in 0..12 {
            csv.push_str(&format!("{}\n", i * 100));
        }
        let out = render_csv_sample(csv.as_bytes(), 12).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "       n");
        assert_eq!(lines[1], "0      0");
        assert_eq!(lines[10], "9    900");
        assert_eq!(lines[11], "10  1000");
    }

    #[test]
    fn malformed_row_anywhere_is_parse_error() {
        let mut csv = String::from("a,b\n");
        for i in 0..20 {
            csv.push_str(&format!("{i},{i}\n"));
        }
        csv.push_str("oops\n");
        let err = render_csv_sample(csv.as_bytes(), 10).unwrap_err();
        assert!(matches!(err, NormalizeError::Parse { kind: FileKind::Csv, .. }));
    }

    #[test]
    fn empty_inputs() {
        assert!(render_csv_sample(b"", 10).is_err());
        assert_eq!(
            render_csv_sample(b"a,b\n", 10).unwrap(),
            "Empty DataFrame\nColumns: [a, b]\nIndex: []"
        );
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let out = render_csv_sample(b"name,notes\n\"Doe, J\",\"x\"\n", 10).unwrap();
        assert!(out.contains("Doe, J"));
    }
}
