//! Structured error types for cellgrid.
//!
//! Every failure in the cell model and render pipeline is raised synchronously
//! to the immediate caller; nothing in the core catches or retries.

/// All errors that can occur in the cellgrid table model and renderer.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A value was assigned to a cell whose format does not accept it.
    /// The cell's stored data is left unchanged.
    #[error("value does not match the cell's {expected:?} format")]
    FormatMismatch {
        /// Format the cell currently carries.
        expected: crate::table::DataFormat,
    },

    /// An update-chain link carries no payload. The remainder of the chain is
    /// abandoned; effects of links applied before this one remain.
    #[error("empty update data")]
    EmptyUpdate,

    /// An operation targeted a position where no cell has been initialized.
    #[error("cell at ({0}, {1}) is not initialized")]
    UninitializedCell(u32, u32),

    /// A slice was constructed with `start > end`.
    #[error("slice start {start} is past end {end}")]
    InvalidRange {
        /// Requested start index.
        start: usize,
        /// Requested end index.
        end: usize,
    },

    /// Rendering error (drawing surface unavailable, context lost, ...).
    #[error("render error: {0}")]
    Render(String),

    /// Catch-all for glue-level failures.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
