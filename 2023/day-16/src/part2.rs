use gridkit::{Grid, Optic, PropagationSimulator};
use miette::*;

/// Beams may enter from any edge cell; find the entry that energizes the
/// most cells. Each candidate run starts from a fresh visited state.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input, Optic::from_char)?;
    let sim = PropagationSimulator::new(&grid);
    Ok(sim.max_energized().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";
        assert_eq!("51", process(input)?);
        Ok(())
    }
}
