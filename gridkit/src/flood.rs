use std::collections::HashSet;

use glam::I64Vec2;

use crate::grid::Grid;

/// Advances a whole frontier one step at a time for `steps` rounds and
/// returns the frontier's size: the number of distinct positions reachable in
/// exactly `steps` moves. On a toroidal grid the frontier holds unwrapped
/// coordinates, so the count keeps growing past the grid boundary.
#[tracing::instrument(skip(grid, passable), fields(rows = grid.height(), cols = grid.width()))]
pub fn reachable_after<T, P>(grid: &Grid<T>, start: I64Vec2, steps: usize, passable: P) -> usize
where
    P: Fn(&T) -> bool,
{
    let mut frontier: HashSet<I64Vec2> = HashSet::from([start]);
    for _ in 0..steps {
        let mut next = HashSet::with_capacity(frontier.len() * 2);
        for &pos in &frontier {
            next.extend(grid.neighbors_filtered(pos, &passable));
        }
        frontier = next;
        if frontier.is_empty() {
            break;
        }
    }
    frontier.len()
}

/// Evaluates the quadratic through three samples at `x`, via Newton's
/// forward-difference form. The divisions are exact when the samples lie on
/// an integer quadratic over equally spaced `x` values, which is the only way
/// this is used.
pub fn quadratic_extrapolate(samples: [(i64, i64); 3], x: i64) -> i64 {
    let [(x0, y0), (x1, y1), (x2, y2)] = samples;
    let d1 = (y1 - y0) / (x1 - x0);
    let d2 = ((y2 - y1) / (x2 - x1) - d1) / (x2 - x0);
    y0 + d1 * (x - x0) + d2 * (x - x0) * (x - x1)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::grid::Addressing;

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

    fn garden() -> (Grid<char>, I64Vec2) {
        let grid = Grid::parse(GARDEN, Ok).unwrap();
        let start = grid.find(|&c| c == 'S').unwrap();
        (grid, start)
    }

    #[test]
    fn sixteen_plots_in_six_steps() {
        let (grid, start) = garden();
        assert_eq!(reachable_after(&grid, start, 6, |&c| c != '#'), 16);
    }

    #[test]
    fn toroidal_frontier_keeps_expanding() {
        let (grid, start) = garden();
        let grid = grid.with_addressing(Addressing::Toroidal);
        assert_eq!(reachable_after(&grid, start, 6, |&c| c != '#'), 16);
        assert_eq!(reachable_after(&grid, start, 10, |&c| c != '#'), 50);
        assert_eq!(reachable_after(&grid, start, 50, |&c| c != '#'), 1594);
    }

    #[test]
    fn walled_in_frontier_dies_out() {
        let grid = Grid::parse("###\n#S#\n###", Ok).unwrap();
        let start = grid.find(|&c| c == 'S').unwrap();
        assert_eq!(reachable_after(&grid, start, 3, |&c| c != '#'), 0);
    }

    #[test]
    fn fits_an_exact_quadratic() {
        // y = 3x^2 + 2x + 5 sampled at x = 0, 1, 2.
        let samples = [(0, 5), (1, 10), (2, 21)];
        assert_eq!(quadratic_extrapolate(samples, 10), 325);
        assert_eq!(quadratic_extrapolate(samples, 0), 5);
    }
}
