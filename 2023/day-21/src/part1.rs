use glam::I64Vec2;
use gridkit::{reachable_after, Grid};
use miette::*;

const STEPS: usize = 64;

fn parse(input: &str) -> Result<(Grid<char>, I64Vec2)> {
    let grid = Grid::parse(input, Ok)?;
    let start = grid
        .find(|&c| c == 'S')
        .ok_or_else(|| miette!("no start plot 'S' in garden"))?;
    Ok((grid, start))
}

pub fn plots_after(input: &str, steps: usize) -> Result<usize> {
    let (grid, start) = parse(input)?;
    Ok(reachable_after(&grid, start, steps, |&c| c != '#'))
}

/// Count the garden plots reachable in exactly 64 steps.
#[tracing::instrument(skip(input))]
pub fn process(input: &str) -> Result<String> {
    Ok(plots_after(input, STEPS)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const GARDEN: &str = "...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    #[rstest]
    #[case(1, 2)]
    #[case(2, 4)]
    #[case(3, 6)]
    #[case(6, 16)]
    fn it_works(#[case] steps: usize, #[case] expected: usize) -> Result<()> {
        assert_eq!(expected, plots_after(GARDEN, steps)?);
        Ok(())
    }
}
