//! Spreadsheet / CSV parsing into a [`Statement`].
//!
//! The first row is a header and is skipped. Columns are positional:
//! item label, prior period, current period. Extra columns are ignored.
//! Non-numeric values coerce to `0.0`.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use finsight_common::{FinsightError, Result};

use crate::model::{LineItem, Statement};

const REQUIRED_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// xlsx / xlsm / xlsb / xls / ods, read through calamine
    Excel,
    Csv,
}

impl SheetFormat {
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Excel),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(FinsightError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// Normalised cell, independent of the container format.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    fn label(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    fn number(&self) -> f64 {
        match self {
            Cell::Number(n) if n.is_finite() => *n,
            Cell::Text(s) => coerce_number(s),
            _ => 0.0,
        }
    }
}

impl From<&Data> for Cell {
    fn from(d: &Data) -> Self {
        match d {
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::String(s) => Cell::Text(s.clone()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Empty => Cell::Empty,
            // Booleans, dates and error cells are not amounts.
            _ => Cell::Text(d.to_string()),
        }
    }
}

/// Parse free text as an amount; anything unparseable is `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parse uploaded bytes; the format is chosen by `file_name`'s extension.
pub fn parse_statement(bytes: &[u8], file_name: &str) -> Result<Statement> {
    let (width, rows) = match SheetFormat::from_file_name(file_name)? {
        SheetFormat::Excel => read_excel(bytes)?,
        SheetFormat::Csv => read_csv(bytes)?,
    };
    let statement = rows_to_statement(width, rows)?;
    tracing::info!(file = file_name, rows = statement.items.len(), "Statement parsed");
    Ok(statement)
}

fn rows_to_statement(width: usize, rows: Vec<Vec<Cell>>) -> Result<Statement> {
    if width < REQUIRED_COLUMNS {
        return Err(FinsightError::ColumnCount { found: width });
    }

    let cell = |row: &[Cell], i: usize| row.get(i).cloned().unwrap_or(Cell::Empty);

    let items: Vec<LineItem> = rows
        .into_iter()
        .skip(1)
        .filter(|row| !row.iter().all(Cell::is_blank))
        .map(|row| LineItem {
            label: cell(&row, 0).label(),
            prior: cell(&row, 1).number(),
            current: cell(&row, 2).number(),
        })
        .collect();

    if items.is_empty() {
        return Err(FinsightError::EmptyStatement);
    }
    Ok(Statement::new(items))
}

fn read_excel(bytes: &[u8]) -> Result<(usize, Vec<Vec<Cell>>)> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| FinsightError::Spreadsheet(format!("Failed to open workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FinsightError::Spreadsheet("Workbook contains no sheets".to_string()))?
        .map_err(|e| FinsightError::Spreadsheet(format!("Failed to read first sheet: {e}")))?;

    let (_, width) = range.get_size();
    if width == 0 {
        return Err(FinsightError::EmptyStatement);
    }

    // Data may not begin at column A; keep positions absolute.
    let start_col = range.start().map(|(_, c)| c as usize).unwrap_or(0);
    let rows = range
        .rows()
        .map(|row| {
            std::iter::repeat(Cell::Empty)
                .take(start_col)
                .chain(row.iter().map(Cell::from))
                .collect()
        })
        .collect();

    Ok((start_col + width, rows))
}

fn read_csv(bytes: &[u8]) -> Result<(usize, Vec<Vec<Cell>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut width = 0;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FinsightError::Csv(e.to_string()))?;
        if rows.is_empty() {
            width = record.len();
        }
        rows.push(
            record
                .iter()
                .map(|f| if f.is_empty() { Cell::Empty } else { Cell::Text(f.to_string()) })
                .collect(),
        );
    }
    if rows.is_empty() {
        return Err(FinsightError::EmptyStatement);
    }
    Ok((width, rows))
}
