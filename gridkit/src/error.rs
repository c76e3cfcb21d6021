use miette::Diagnostic;
use thiserror::Error;

/// Everything that can go wrong inside the toolkit.
///
/// `NotReachable` is a normal outcome for unsolvable instances, not a
/// programming error; callers decide whether it is fatal.
#[derive(Debug, Error, Diagnostic)]
pub enum GridError {
    #[error("malformed grid: {0}")]
    #[diagnostic(code(gridkit::malformed_grid))]
    MalformedGrid(String),

    #[error("position ({x}, {y}) is outside a {rows}x{cols} grid")]
    #[diagnostic(code(gridkit::out_of_bounds))]
    OutOfBounds {
        x: i64,
        y: i64,
        rows: usize,
        cols: usize,
    },

    #[error("no goal state is reachable from the start")]
    #[diagnostic(code(gridkit::not_reachable))]
    NotReachable,
}
