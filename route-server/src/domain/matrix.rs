//! Routing matrix response model.

/// Whether a matrix element could be reached within the request's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Reached,
    Unreached,
}

/// One element of a matrix response row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCell {
    /// Travel time in seconds; the engine's unreachable sentinel when the
    /// element failed to project or could not be reached.
    pub duration_secs: u32,
    pub status: CellStatus,
}

/// The caller-facing matrix response: a single row, index-aligned with the
/// plural side of the request. Callers depend on this flattened shape; it is
/// never a rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixResponse {
    pub row: Vec<MatrixCell>,
}

impl MatrixResponse {
    /// Count of unreached cells, for logging.
    pub fn nb_unreached(&self) -> usize {
        self.row
            .iter()
            .filter(|cell| cell.status == CellStatus::Unreached)
            .count()
    }
}
