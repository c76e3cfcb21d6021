use miette::*;

use crate::maze::PipeMaze;

/// Distance along the loop to the tile farthest from the start.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let maze = PipeMaze::parse(input)?;
    Ok(maze.farthest_distance().to_string())
}
