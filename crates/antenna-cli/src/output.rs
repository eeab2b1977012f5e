//! Output formatting utilities

use antenna_core::{Antenna, AntennaPath, Intersection, Point};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// A value printable as one row of a table or CSV file
pub trait Record: Serialize {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl Record for Antenna {
    const HEADERS: &'static [&'static str] = &["frequency", "x", "y"];

    fn row(&self) -> Vec<String> {
        vec![self.frequency.to_string(), self.x.to_string(), self.y.to_string()]
    }
}

impl Record for Point {
    const HEADERS: &'static [&'static str] = &["x", "y"];

    fn row(&self) -> Vec<String> {
        vec![self.x.to_string(), self.y.to_string()]
    }
}

impl Record for Intersection {
    const HEADERS: &'static [&'static str] = &["first", "second", "x", "y"];

    fn row(&self) -> Vec<String> {
        vec![
            self.first.to_string(),
            self.second.to_string(),
            self.midpoint.x.to_string(),
            self.midpoint.y.to_string(),
        ]
    }
}

impl Record for AntennaPath {
    const HEADERS: &'static [&'static str] = &["hops", "route"];

    fn row(&self) -> Vec<String> {
        vec![self.hops().to_string(), self.to_string()]
    }
}

/// Format records based on format type
pub fn format_output<T: Record>(records: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Table => format_table(records),
    }
}

/// Print records, or `empty` when there are none and the output is a table
pub fn print_records<T: Record>(records: &[T], format: OutputFormat, empty: &str) {
    if records.is_empty() && format == OutputFormat::Table {
        println!("{}", empty);
        return;
    }
    println!("{}", format_output(records, format));
}

fn format_csv<T: Record>(records: &[T]) -> String {
    let mut lines = vec![T::HEADERS.join(",")];
    for record in records {
        let fields: Vec<String> = record.row().iter().map(|f| csv_escape(f)).collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

fn format_table<T: Record>(records: &[T]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(T::row).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = vec![
        render(T::HEADERS.iter().map(|h| h.to_string()).collect()),
        render(widths.iter().map(|w| "-".repeat(*w)).collect()),
    ];
    lines.extend(rows.into_iter().map(render));
    lines.join("\n")
}

/// Quote a CSV field if it contains a separator, quote or newline
pub fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antenna_core::Frequency;

    fn antennas() -> Vec<Antenna> {
        let a = Frequency::new('A').unwrap();
        vec![Antenna::new(a, 1, 1), Antenna::new(a, 12, 3)]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Table);
    }

    #[test]
    fn test_format_table() {
        let table = format_output(&antennas(), OutputFormat::Table);
        assert_eq!(
            table,
            "frequency  x   y\n---------  --  -\nA          1   1\nA          12  3"
        );
    }

    #[test]
    fn test_format_csv() {
        let csv = format_output(&antennas(), OutputFormat::Csv);
        assert_eq!(csv, "frequency,x,y\nA,1,1\nA,12,3");
    }

    #[test]
    fn test_format_json() {
        let json = format_output(&antennas()[..1], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["frequency"], "A");
        assert_eq!(value[0]["x"], 1);
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("'A'(0, 0)"), "\"'A'(0, 0)\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
