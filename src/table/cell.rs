//! Cell values, formats, and the composable update chain.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GridError, Result};
use crate::geometry::GridPos;

/// Declared data format of a cell. A cell only accepts values matching its
/// current format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Number,
    Text,
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Whether this value is admissible under `format`.
    pub fn matches_format(&self, format: DataFormat) -> bool {
        matches!(
            (self, format),
            (CellValue::Number(_), DataFormat::Number) | (CellValue::Text(_), DataFormat::Text)
        )
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
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

/// One cell of the grid: a logical position, a format, and an optional value
/// whose variant always matches the format.
#[derive(Debug, Clone)]
pub struct Cell {
    position: GridPos,
    format: DataFormat,
    value: Option<CellValue>,
}

impl Cell {
    pub fn new(position: GridPos, format: DataFormat) -> Self {
        Self {
            position,
            format,
            value: None,
        }
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    pub fn value(&self) -> Option<&CellValue> {
        self.value.as_ref()
    }

    /// Change the declared format. A stored value that no longer matches is
    /// dropped, preserving the format/value invariant.
    pub fn set_format(&mut self, format: DataFormat) {
        self.format = format;
        if let Some(value) = &self.value {
            if !value.matches_format(format) {
                self.value = None;
            }
        }
    }

    /// Assign a value.
    ///
    /// # Errors
    /// `FormatMismatch` when the value's variant does not match the cell's
    /// current format; the stored value is left unchanged.
    pub fn set_value(&mut self, value: CellValue) -> Result<()> {
        if !value.matches_format(self.format) {
            return Err(GridError::FormatMismatch {
                expected: self.format,
            });
        }
        self.value = Some(value);
        Ok(())
    }
}

/// A format-change link. Built empty; `data()` supplies the payload.
#[derive(Debug, Clone, Default)]
pub struct FormatUpdate {
    data: Option<DataFormat>,
}

impl FormatUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn data(mut self, format: DataFormat) -> Self {
        self.data = Some(format);
        self
    }
}

/// A content-change link. Built empty; `data()` supplies the payload.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    data: Option<CellValue>,
}

impl ContentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn data(mut self, value: impl Into<CellValue>) -> Self {
        self.data = Some(value.into());
        self
    }
}

/// One link of an update chain.
#[derive(Debug, Clone)]
pub enum CellUpdate {
    Format(FormatUpdate),
    Content(ContentUpdate),
}

impl From<FormatUpdate> for CellUpdate {
    fn from(update: FormatUpdate) -> Self {
        CellUpdate::Format(update)
    }
}

impl From<ContentUpdate> for CellUpdate {
    fn from(update: ContentUpdate) -> Self {
        CellUpdate::Content(update)
    }
}

/// An ordered chain of heterogeneous cell updates, applied front to back.
///
/// ```
/// use cellgrid::table::{DataFormat, UpdateChain};
///
/// let chain = UpdateChain::format(DataFormat::Number).then_content(42.0);
/// assert_eq!(chain.links().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateChain {
    links: Vec<CellUpdate>,
}

impl UpdateChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain starting with a content change.
    pub fn content(value: impl Into<CellValue>) -> Self {
        Self::new().chain(ContentUpdate::new().data(value))
    }

    /// Chain starting with a format change.
    pub fn format(format: DataFormat) -> Self {
        Self::new().chain(FormatUpdate::new().data(format))
    }

    /// Append a link.
    #[must_use]
    pub fn chain(mut self, update: impl Into<CellUpdate>) -> Self {
        self.links.push(update.into());
        self
    }

    /// Append a content-change link.
    #[must_use]
    pub fn then_content(self, value: impl Into<CellValue>) -> Self {
        self.chain(ContentUpdate::new().data(value))
    }

    /// Append a format-change link.
    #[must_use]
    pub fn then_format(self, format: DataFormat) -> Self {
        self.chain(FormatUpdate::new().data(format))
    }

    pub fn links(&self) -> &[CellUpdate] {
        &self.links
    }

    /// Apply every link in order.
    ///
    /// # Errors
    /// `EmptyUpdate` when a link carries no payload: the remainder of the
    /// chain is abandoned, while effects of links already applied remain.
    /// `FormatMismatch` propagates from content links under the same partial-
    /// effect rule.
    pub(crate) fn apply_to(&self, cell: &mut Cell) -> Result<()> {
        for link in &self.links {
            match link {
                CellUpdate::Format(update) => {
                    let format = update.data.ok_or(GridError::EmptyUpdate)?;
                    cell.set_format(format);
                }
                CellUpdate::Content(update) => {
                    let value = update.data.clone().ok_or(GridError::EmptyUpdate)?;
                    cell.set_value(value)?;
                }
            }
        }
        Ok(())
    }
}
