use std::collections::HashMap;

use glam::I64Vec2;
use gridkit::{Direction, Grid, GridError};
use itertools::Itertools;
use miette::*;

fn slope_allows(tile: char, dir: Direction) -> bool {
    match tile {
        '.' => true,
        '^' => dir == Direction::Up,
        'v' => dir == Direction::Down,
        '<' => dir == Direction::Left,
        '>' => dir == Direction::Right,
        _ => false,
    }
}

fn is_path(tile: &char) -> bool {
    *tile != '#'
}

/// The trail network contracted to its junctions: nodes are the start, the
/// goal, and every cell with three or more path neighbors; edges carry the
/// corridor length between them. Contraction keeps the longest-path search
/// tractable and lets the visited set be a single `u64` bitmask.
pub struct TrailMap {
    graph: Vec<Vec<(usize, u64)>>,
    start: usize,
    goal: usize,
}

impl TrailMap {
    /// With `respect_slopes`, an arrow tile may only be entered in its own
    /// direction, which makes edges directed.
    pub fn build(grid: &Grid<char>, respect_slopes: bool) -> Result<Self> {
        let (rows, cols) = grid.dimensions();
        let start_pos = (0..cols as i64)
            .map(|x| I64Vec2::new(x, 0))
            .find(|&p| grid.get(p) == Some(&'.'))
            .ok_or_else(|| miette!("no open tile in the top row"))?;
        let goal_pos = (0..cols as i64)
            .map(|x| I64Vec2::new(x, rows as i64 - 1))
            .find(|&p| grid.get(p) == Some(&'.'))
            .ok_or_else(|| miette!("no open tile in the bottom row"))?;

        let junctions = grid
            .positions()
            .filter(|&pos| {
                grid.get(pos).is_some_and(is_path)
                    && pos != start_pos
                    && pos != goal_pos
                    && grid.neighbors_filtered(pos, is_path).count() >= 3
            })
            .collect_vec();
        let nodes: Vec<I64Vec2> = [start_pos, goal_pos]
            .into_iter()
            .chain(junctions)
            .collect();
        ensure!(
            nodes.len() <= 64,
            "trail has {} junctions, more than the visited bitmask can hold",
            nodes.len()
        );
        let index: HashMap<I64Vec2, usize> =
            nodes.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut graph = vec![Vec::new(); nodes.len()];
        for (id, &node) in nodes.iter().enumerate() {
            for dir in Direction::ALL {
                if let Some(edge) = walk_corridor(grid, &index, node, dir, respect_slopes) {
                    graph[id].push(edge);
                }
            }
        }

        Ok(TrailMap {
            graph,
            start: 0,
            goal: 1,
        })
    }

    /// Longest start-to-goal path over the contracted graph, searched with an
    /// explicit frame stack; each frame carries its own visited bitmask, so
    /// nothing is mutated and restored in place.
    #[tracing::instrument(skip(self), fields(nodes = self.graph.len()))]
    pub fn longest_hike(&self) -> Result<u64> {
        let mut best: Option<u64> = None;
        let mut stack = vec![(self.start, 1u64 << self.start, 0u64)];
        while let Some((node, visited, len)) = stack.pop() {
            if node == self.goal {
                best = Some(best.map_or(len, |b| b.max(len)));
                continue;
            }
            for &(next, weight) in &self.graph[node] {
                let bit = 1u64 << next;
                if visited & bit == 0 {
                    stack.push((next, visited | bit, len + weight));
                }
            }
        }
        best.ok_or_else(|| GridError::NotReachable.into())
    }
}

/// Follows the corridor leaving `node` in `dir` until it reaches another
/// node; `None` when the way is blocked, dead-ends, or runs against a slope.
fn walk_corridor(
    grid: &Grid<char>,
    index: &HashMap<I64Vec2, usize>,
    node: I64Vec2,
    dir: Direction,
    respect_slopes: bool,
) -> Option<(usize, u64)> {
    let mut pos = node;
    let mut dir = dir;
    let mut len = 0u64;
    loop {
        let next = pos + dir.offset();
        let tile = *grid.get(next)?;
        if !is_path(&tile) || (respect_slopes && !slope_allows(tile, dir)) {
            return None;
        }
        len += 1;
        pos = next;
        if let Some(&other) = index.get(&pos) {
            return Some((other, len));
        }
        // Corridor cells have exactly one way forward.
        dir = Direction::ALL
            .into_iter()
            .filter(|&d| d != dir.opposite())
            .find(|&d| grid.get(pos + d.offset()).is_some_and(is_path))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_corridor_is_one_edge() {
        let grid = Grid::parse("#.###\n#...#\n###.#", Ok).unwrap();
        let map = TrailMap::build(&grid, false).unwrap();
        assert_eq!(map.longest_hike().unwrap(), 4);
    }

    #[test]
    fn blocked_goal_is_not_reachable() {
        let grid = Grid::parse("#.#\n###\n#.#", Ok).unwrap();
        let map = TrailMap::build(&grid, false).unwrap();
        assert!(map.longest_hike().is_err());
    }

    #[test]
    fn slope_against_travel_blocks_the_edge() {
        // The only corridor contains a left-pointing slope, so walking
        // rightward is legal only when slopes are ignored.
        let grid = Grid::parse("#.###\n#.<.#\n###.#", Ok).unwrap();
        assert!(TrailMap::build(&grid, true).unwrap().longest_hike().is_err());
        assert!(TrailMap::build(&grid, false)
            .unwrap()
            .longest_hike()
            .is_ok());
    }
}
