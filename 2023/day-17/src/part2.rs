use gridkit::{min_travel_cost, Grid, GridError, RunPolicy};
use miette::*;

/// Ultra crucible: four to ten consecutive steps in one direction before it
/// may turn, and it cannot stop at the target before the minimum run either.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input, |c| {
        c.to_digit(10)
            .map(|d| d as u8)
            .ok_or_else(|| GridError::MalformedGrid(format!("not a heat-loss digit: {c:?}")))
    })?;
    let policy = RunPolicy {
        min_run: 4,
        max_run: 10,
    };
    let cost = min_travel_cost(&grid, policy)?;
    Ok(cost.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(
        "2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533",
        "94"
    )]
    #[case(
        "111111111111
999999999991
999999999991
999999999991
999999999991",
        "71"
    )]
    fn it_works(#[case] input: &str, #[case] expected: &str) -> Result<()> {
        assert_eq!(expected, process(input)?);
        Ok(())
    }
}
