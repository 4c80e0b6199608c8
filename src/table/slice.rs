//! Bounds-checked read-only views over a row of cells.

use crate::error::{GridError, Result};

/// A read-only, bounds-checked view over `[from, to)` of an owned source row.
///
/// Indexing past the configured end — or over a hole in the sparse source —
/// yields `None` rather than failing: partially-loaded ranges at grid edges
/// are a steady-state condition, not an error. Reads never touch the source
/// outside its own bounds.
#[derive(Debug, Clone, Default)]
pub struct BoundedSlice<T> {
    source: Vec<Option<T>>,
    from: usize,
    to: usize,
}

impl<T> BoundedSlice<T> {
    /// Create a view over `source[from..to]`.
    ///
    /// # Errors
    /// `InvalidRange` if `from > to`.
    pub fn new(source: Vec<Option<T>>, from: usize, to: usize) -> Result<Self> {
        if from > to {
            return Err(GridError::InvalidRange {
                start: from,
                end: to,
            });
        }
        Ok(Self { source, from, to })
    }

    /// A view over nothing.
    pub fn empty() -> Self {
        Self {
            source: Vec::new(),
            from: 0,
            to: 0,
        }
    }

    /// Element at offset `index` into the view, or `None` when the offset is
    /// past the view's end or the source has no element there.
    pub fn index(&self, index: usize) -> Option<&T> {
        let absolute = self.from.checked_add(index)?;
        if absolute >= self.to {
            return None;
        }
        self.source.get(absolute)?.as_ref()
    }

    /// Number of positions the view spans (present or absent).
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.to == self.from
    }
}
