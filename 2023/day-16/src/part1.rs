use glam::I64Vec2;
use gridkit::{Beam, Direction, Grid, Optic, PropagationSimulator};
use miette::*;

/// A single beam enters at the top-left corner heading right; count the
/// cells it (and its splits) energize.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input, Optic::from_char)?;
    let sim = PropagationSimulator::new(&grid);
    let entry = Beam {
        pos: I64Vec2::new(-1, 0),
        dir: Direction::Right,
    };
    Ok(sim.energized(entry).to_string())
}
