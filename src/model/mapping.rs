//! Header handling for tabular input.
//!
//! Each input table arrives as rows of strings where the first row holds the column names. A
//! `Mapping` records where each header sits so rows can be read by column name regardless of
//! column order. Columns that no entity asks for are ignored.

use crate::Result;
use anyhow::{bail, Context};
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub(crate) struct Mapping {
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
}

impl Mapping {
    /// Creates a `Mapping` from a header row. Headers are trimmed. Duplicate headers are an error.
    pub(crate) fn new<S, I>(headers: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|s| s.into().trim().to_string())
            .collect();
        let mut header_map = HashMap::with_capacity(headers.len());
        for (ix, header) in headers.iter().enumerate() {
            if header_map.insert(header.clone(), ix).is_some() {
                bail!("Encountered a duplicate header '{header}'");
            }
        }
        Ok(Self {
            headers,
            header_map,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns the column index of `column`, or an error naming the missing column.
    pub(crate) fn position(&self, column: impl Display) -> Result<usize> {
        let name = column.to_string();
        self.header_map
            .get(&name)
            .copied()
            .with_context(|| format!("Required column '{name}' is missing"))
    }
}

/// An entity that can be built from one row of a table.
pub(crate) trait FromRow: Sized {
    /// The table name, used in error messages.
    const TABLE: &'static str;

    /// The column names this entity reads, in the order `from_values` receives them.
    fn columns() -> &'static [&'static str];

    fn from_values(values: &[&str]) -> Result<Self>;
}

/// Parses `rows` (header row first) into entities of type `T`. Rows where every cell is blank are
/// skipped. Rows are numbered from 1, counting the header, in error messages.
pub(crate) fn parse_rows<T, S, R>(rows: impl IntoIterator<Item = R>) -> Result<Vec<T>>
where
    T: FromRow,
    S: Into<String>,
    R: IntoIterator<Item = S>,
{
    let mut rows = rows.into_iter();
    let mapping = match rows.next() {
        Some(header_row) => Mapping::new(header_row)?,
        None => bail!("The {} table is empty, a header row is required", T::TABLE),
    };

    let positions = T::columns()
        .iter()
        .map(|c| mapping.position(c))
        .collect::<Result<Vec<usize>>>()
        .with_context(|| format!("Unable to read the header of the {} table", T::TABLE))?;

    let mut out = Vec::new();
    for (row_ix, row) in rows.enumerate() {
        let values: Vec<String> = row.into_iter().map(|s| s.into()).collect();
        if values.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        if values.len() > mapping.len() {
            bail!(
                "A row longer than the headers list was encountered at row {} of the {} table",
                row_ix + 2,
                T::TABLE
            );
        }
        let picked: Vec<&str> = positions
            .iter()
            .map(|&ix| values.get(ix).map(|v| v.trim()).unwrap_or_default())
            .collect();
        let entity = T::from_values(&picked)
            .with_context(|| format!("Invalid row {} in the {} table", row_ix + 2, T::TABLE))?;
        out.push(entity);
    }
    Ok(out)
}

/// Parses a required, non-empty field.
pub(crate) fn required<'a>(value: &'a str, column: &str) -> Result<&'a str> {
    if value.is_empty() {
        bail!("The '{column}' column must not be empty");
    }
    Ok(value)
}

/// Parses an identifier column.
pub(crate) fn parse_id(value: &str, column: &str) -> Result<u32> {
    required(value, column)?
        .parse::<u32>()
        .with_context(|| {
            format!("The '{column}' column must be a non-negative integer, got '{value}'")
        })
}
