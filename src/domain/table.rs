//! Flat tabular model produced from records
//!
//! [`FieldMapping`] describes which dotted paths become which columns,
//! [`Table`] holds the projected rows in header order.

use crate::domain::errors::SheetforgeError;
use crate::domain::record::Record;
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// One (dotted path, display header) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Dotted path into the record, e.g. `"timesheet_user.full_name"`
    pub path: String,
    /// Column header shown in the sheet
    pub header: String,
}

impl FieldSpec {
    /// Create a field spec
    pub fn new(path: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header: header.into(),
        }
    }
}

/// Ordered field→header mapping
///
/// Header order defines column order. Paths may repeat; headers may not.
///
/// # Examples
///
/// ```
/// use sheetforge::domain::table::FieldMapping;
///
/// let mapping = FieldMapping::from_pairs([
///     ("timesheet_user.full_name", "Full Name"),
///     ("timesheet_for", "Timesheet For"),
/// ]).unwrap();
/// assert_eq!(mapping.headers(), vec!["Full Name", "Timesheet For"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct FieldMapping(Vec<FieldSpec>);

impl FieldMapping {
    /// Build a mapping, rejecting empty mappings, blank entries and duplicate headers
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        if fields.is_empty() {
            return Err(SheetforgeError::Validation(
                "Field mapping must contain at least one field".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if field.path.trim().is_empty() {
                return Err(SheetforgeError::Validation(format!(
                    "Field path for header '{}' cannot be empty",
                    field.header
                )));
            }
            if field.header.trim().is_empty() {
                return Err(SheetforgeError::Validation(format!(
                    "Header for path '{}' cannot be empty",
                    field.path
                )));
            }
            if !seen.insert(field.header.as_str()) {
                return Err(SheetforgeError::Validation(format!(
                    "Duplicate header '{}' in field mapping",
                    field.header
                )));
            }
        }

        Ok(Self(fields))
    }

    /// Build a mapping from `(path, header)` pairs
    pub fn from_pairs<I, P, H>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, H)>,
        P: Into<String>,
        H: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(path, header)| FieldSpec::new(path, header))
                .collect(),
        )
    }

    /// Build a mapping whose headers are the paths themselves
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::new(
            paths
                .into_iter()
                .map(|path| {
                    let path = path.into();
                    FieldSpec::new(path.clone(), path)
                })
                .collect(),
        )
    }

    /// Fields in column order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.0
    }

    /// Headers in column order
    pub fn headers(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.header.as_str()).collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed mapping
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<FieldSpec>> for FieldMapping {
    type Error = SheetforgeError;

    fn try_from(fields: Vec<FieldSpec>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<FieldMapping> for Vec<FieldSpec> {
    fn from(mapping: FieldMapping) -> Self {
        mapping.0
    }
}

/// Flattened value of one cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank cell (missing path, null, or empty mapping)
    #[default]
    Empty,
    /// Boolean
    Bool(bool),
    /// Number
    Number(Number),
    /// Text
    Text(String),
    /// Nested mapping or sequence, rendered as JSON text by the writer
    Nested(Record),
}

impl CellValue {
    /// Whether the cell renders blank
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text form of the cell
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Nested(record) => record.to_json_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Nested(_) => 4,
        }
    }

    /// Total ordering used for caller-side sorting
    ///
    /// Blank < bool < number < text < nested; numbers compare numerically,
    /// everything else by its rendered text.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ if self.rank() == other.rank() => self.render().cmp(&other.render()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n.into())
    }
}

/// One flat row, values in header order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<CellValue>,
}

impl Row {
    /// Create a row from values in header order
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    /// Value at a zero-based column position
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    /// All values in header order
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<CellValue>> FromIterator<V> for Row {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Ordered headers plus ordered rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table; every row must be as wide as the header list
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(SheetforgeError::Validation(format!(
                "Row {} has {} cells, expected {}",
                index,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Create a table from rows already known to match the header width
    pub(crate) fn from_uniform(headers: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == headers.len()));
        Self { headers, rows }
    }

    /// Headers in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in output order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable rows, for caller-side sorting
    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// Zero-based column position of a header
    pub fn column_of(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Value by row position and header
    pub fn value(&self, row: usize, header: &str) -> Option<&CellValue> {
        let column = self.column_of(header)?;
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
