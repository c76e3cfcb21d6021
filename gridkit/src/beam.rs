use glam::I64Vec2;
use rayon::prelude::*;

use crate::error::GridError;
use crate::grid::{Direction, Grid};

/// The symbol taxonomy of a beam-contraption cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optic {
    Empty,
    /// `/` — a mirror running from the south-west to the north-east corner.
    MirrorSwNe,
    /// `\` — a mirror running from the north-west to the south-east corner.
    MirrorNwSe,
    /// `-` — passes west/east beams through, splits north/south beams.
    SplitterWE,
    /// `|` — passes north/south beams through, splits west/east beams.
    SplitterNS,
}

impl Optic {
    pub fn from_char(c: char) -> Result<Self, GridError> {
        match c {
            '.' => Ok(Optic::Empty),
            '/' => Ok(Optic::MirrorSwNe),
            '\\' => Ok(Optic::MirrorNwSe),
            '-' => Ok(Optic::SplitterWE),
            '|' => Ok(Optic::SplitterNS),
            other => Err(GridError::MalformedGrid(format!(
                "unknown contraption symbol {other:?}"
            ))),
        }
    }
}

/// A directional signal unit: one cell position plus a travel direction.
/// Entry beams start one cell outside the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beam {
    pub pos: I64Vec2,
    pub dir: Direction,
}

/// What happens to a beam entering a cell.
#[derive(Debug, Clone, Copy)]
pub enum Redirect {
    /// Keep the incoming direction.
    Straight,
    Turn(Direction),
    Split(Direction, Direction),
}

/// The full `(optic, incoming direction) -> outgoing` redirection table.
///
/// The table is owned by each simulator instance rather than being a
/// process-wide constant, so simulations with different symbol semantics can
/// coexist; [`OpticsTable::default`] encodes the classic mirror/splitter
/// rules.
#[derive(Debug, Clone)]
pub struct OpticsTable {
    entries: [[Redirect; 4]; 5],
}

impl OpticsTable {
    pub fn new(entries: [[Redirect; 4]; 5]) -> Self {
        OpticsTable { entries }
    }

    pub fn redirect(&self, optic: Optic, dir: Direction) -> Redirect {
        self.entries[optic as usize][dir as usize]
    }
}

impl Default for OpticsTable {
    fn default() -> Self {
        use Direction::*;
        use Redirect::*;
        let mut entries = [[Straight; 4]; 5];
        // Indexing follows the discriminant order of Direction: U, D, L, R.
        entries[Optic::MirrorSwNe as usize] = [Turn(Right), Turn(Left), Turn(Down), Turn(Up)];
        entries[Optic::MirrorNwSe as usize] = [Turn(Left), Turn(Right), Turn(Up), Turn(Down)];
        entries[Optic::SplitterWE as usize] = [
            Split(Left, Right),
            Split(Left, Right),
            Straight,
            Straight,
        ];
        entries[Optic::SplitterNS as usize] =
            [Straight, Straight, Split(Up, Down), Split(Up, Down)];
        OpticsTable::new(entries)
    }
}

/// Propagates beams through a grid of optics, counting energized cells.
///
/// Termination relies on the per-cell, per-direction visited mask: a beam
/// arriving at a `(cell, direction)` pair already processed is dropped, which
/// closes every mirror loop. Each run allocates a fresh mask, so runs never
/// contaminate each other and re-running the same entry is idempotent.
pub struct PropagationSimulator<'a> {
    grid: &'a Grid<Optic>,
    table: OpticsTable,
}

impl<'a> PropagationSimulator<'a> {
    pub fn new(grid: &'a Grid<Optic>) -> Self {
        Self::with_table(grid, OpticsTable::default())
    }

    pub fn with_table(grid: &'a Grid<Optic>, table: OpticsTable) -> Self {
        PropagationSimulator { grid, table }
    }

    /// Runs one propagation from `entry` and returns the number of cells
    /// touched by at least one beam.
    #[tracing::instrument(skip(self))]
    pub fn energized(&self, entry: Beam) -> usize {
        let (rows, cols) = self.grid.dimensions();
        // One direction bit per cell; bit index = Direction discriminant.
        let mut seen = vec![0u8; rows * cols];
        let mut stack = vec![entry];

        while let Some(beam) = stack.pop() {
            if let Some(idx) = self.grid.index_of(beam.pos) {
                let bit = 1u8 << beam.dir as u8;
                if seen[idx] & bit != 0 {
                    continue;
                }
                seen[idx] |= bit;
            }

            let next = beam.pos + beam.dir.offset();
            let Some(&optic) = self.grid.get(next) else {
                // Beam exits the grid.
                continue;
            };
            match self.table.redirect(optic, beam.dir) {
                Redirect::Straight => stack.push(Beam {
                    pos: next,
                    dir: beam.dir,
                }),
                Redirect::Turn(dir) => stack.push(Beam { pos: next, dir }),
                Redirect::Split(a, b) => {
                    stack.push(Beam { pos: next, dir: a });
                    stack.push(Beam { pos: next, dir: b });
                }
            }
        }

        seen.iter().filter(|&&mask| mask != 0).count()
    }

    /// Every possible edge entry: one beam per row from the left and right,
    /// one per column from the top and bottom.
    pub fn edge_entries(&self) -> Vec<Beam> {
        let (rows, cols) = self.grid.dimensions();
        let mut entries = Vec::with_capacity(2 * (rows + cols));
        for y in 0..rows as i64 {
            entries.push(Beam {
                pos: I64Vec2::new(-1, y),
                dir: Direction::Right,
            });
            entries.push(Beam {
                pos: I64Vec2::new(cols as i64, y),
                dir: Direction::Left,
            });
        }
        for x in 0..cols as i64 {
            entries.push(Beam {
                pos: I64Vec2::new(x, -1),
                dir: Direction::Down,
            });
            entries.push(Beam {
                pos: I64Vec2::new(x, rows as i64),
                dir: Direction::Up,
            });
        }
        entries
    }

    /// Maximum energized count over all edge entries. Runs are independent
    /// (fresh visited mask each), so they are evaluated in parallel.
    #[tracing::instrument(skip(self))]
    pub fn max_energized(&self) -> usize {
        self.edge_entries()
            .into_par_iter()
            .map(|entry| self.energized(entry))
            .max()
            .unwrap_or(0)
    }
}
