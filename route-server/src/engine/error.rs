//! Engine error type.

/// Error raised by a routing engine call.
///
/// These are engine-internal failures (graph access, solver state), not
/// "no route" outcomes — those are expressed in each method's return shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The graph search backing a snap call failed.
    #[error("graph search failed: {0}")]
    Search(String),
    /// A path or matrix solver failed.
    #[error("solver failed: {0}")]
    Solver(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_detail() {
        let err = EngineError::Search("tile missing".to_owned());
        assert_eq!(err.to_string(), "graph search failed: tile missing");
    }
}
