//! Rendering of report rows as Markdown tables, CSV or JSON.

use crate::model::{to_cents, Amount};
use crate::Result;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// How an absent value is written in table and CSV output.
pub const NULL: &str = "NULL";

/// A row type that can be laid out as a table. `cells` must return one value per header, in the
/// same order.
pub trait Tabular {
    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

/// One value of a table row. The kind decides alignment and how money is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(String),
    /// Written with thousands separators in tables and as plain cents in CSV.
    Money(Amount),
    Null,
}

impl Cell {
    pub fn text(value: impl Display) -> Self {
        Cell::Text(value.to_string())
    }

    pub fn number(value: impl Display) -> Self {
        Cell::Number(value.to_string())
    }

    /// A decimal rounded to two places, or `Null` when absent.
    pub fn decimal(value: Option<Decimal>) -> Self {
        value.map_or(Cell::Null, |v| Cell::number(to_cents(v)))
    }

    pub fn money(value: Option<Amount>) -> Self {
        value.map_or(Cell::Null, Cell::Money)
    }

    fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }

    fn table_text(&self) -> String {
        match self {
            Cell::Text(s) | Cell::Number(s) => s.replace('|', "\\|"),
            Cell::Money(a) => a.to_string(),
            Cell::Null => NULL.to_string(),
        }
    }

    fn csv_text(&self) -> String {
        match self {
            Cell::Text(s) | Cell::Number(s) => s.clone(),
            Cell::Money(a) => to_cents(a.value()).to_string(),
            Cell::Null => NULL.to_string(),
        }
    }
}

/// The output formats a report can be rendered in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A Markdown table.
    #[default]
    Table,
    /// Comma separated values with a header row.
    Csv,
    /// A JSON array with one object per row.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Rendered report rows in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of objects where each row is a self-describing object with column names as keys.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

/// Renders `rows` in `format`.
pub fn render<T>(rows: &[T], format: OutputFormat) -> Result<Rows>
where
    T: Tabular + Serialize,
{
    match format {
        OutputFormat::Table => Ok(Rows::Table(markdown_table(rows))),
        OutputFormat::Csv => csv_text(rows).map(Rows::Csv),
        OutputFormat::Json => serde_json::to_value(rows)
            .context("Unable to serialize report rows to JSON")
            .map(Rows::Json),
    }
}

/// Lays out `rows` as a Markdown table with columns padded to a common width. Columns holding only
/// numbers, money and nulls are right aligned. A `|` inside a cell is escaped.
fn markdown_table<T: Tabular>(rows: &[T]) -> String {
    let headers = T::headers();
    let typed: Vec<Vec<Cell>> = rows.iter().map(Tabular::cells).collect();
    let numeric: Vec<bool> = (0..headers.len())
        .map(|ix| {
            !typed.is_empty()
                && typed
                    .iter()
                    .filter_map(|row| row.get(ix))
                    .all(Cell::is_numeric)
        })
        .collect();
    let cells: Vec<Vec<String>> = typed
        .iter()
        .map(|row| row.iter().map(Cell::table_text).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len().max(3)).collect();
    for row in &cells {
        for (ix, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(ix) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header_cells, &widths, &numeric);
    let separator: Vec<String> = widths
        .iter()
        .zip(&numeric)
        .map(|(w, right)| {
            if *right {
                format!("{}:", "-".repeat(w - 1))
            } else {
                "-".repeat(*w)
            }
        })
        .collect();
    out.push_str(&format!("| {} |\n", separator.join(" | ")));
    for row in &cells {
        push_line(&mut out, row, &widths, &numeric);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(ix, w)| {
            let cell = cells.get(ix).map(String::as_str).unwrap_or_default();
            if numeric.get(ix).copied().unwrap_or_default() {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    out.push_str(&format!("| {} |\n", padded.join(" | ")));
}

fn csv_text<T: Tabular>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(T::headers())
        .context("Unable to write the CSV header")?;
    for row in rows {
        writer
            .write_record(row.cells().iter().map(Cell::csv_text))
            .context("Unable to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV output: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
