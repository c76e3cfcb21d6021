use gridkit::Grid;
use miette::*;

use crate::trail::TrailMap;

/// The slopes turn out to be climbable after all: same longest-hike search
/// with every arrow treated as an ordinary path tile.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input, Ok)?;
    let map = TrailMap::build(&grid, false)?;
    Ok(map.longest_hike()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = include_str!("../input2.txt");
        assert_eq!("154", process(input)?);
        Ok(())
    }
}
