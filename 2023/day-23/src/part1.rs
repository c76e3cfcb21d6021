use gridkit::Grid;
use miette::*;

use crate::trail::TrailMap;

/// Longest scenic hike where slope tiles force the direction of travel.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input, Ok)?;
    let map = TrailMap::build(&grid, true)?;
    Ok(map.longest_hike()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = include_str!("../input1.txt");
        assert_eq!("94", process(input)?);
        Ok(())
    }
}
