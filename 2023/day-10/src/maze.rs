use std::collections::HashSet;

use glam::I64Vec2;
use gridkit::{Direction, Grid};
use miette::*;

/// Which directions a pipe symbol opens toward.
fn connections(tile: char) -> Option<[Direction; 2]> {
    use Direction::*;
    match tile {
        '|' => Some([Up, Down]),
        '-' => Some([Left, Right]),
        'L' => Some([Up, Right]),
        'J' => Some([Up, Left]),
        '7' => Some([Down, Left]),
        'F' => Some([Down, Right]),
        _ => None,
    }
}

fn connects(tile: char, dir: Direction) -> bool {
    connections(tile).is_some_and(|dirs| dirs.contains(&dir))
}

/// The pipe grid with the start tile's real symbol inferred and the single
/// closed loop through it traced out.
pub struct PipeMaze {
    grid: Grid<char>,
    start: I64Vec2,
    start_tile: char,
    loop_cells: HashSet<I64Vec2>,
    loop_len: usize,
}

impl PipeMaze {
    pub fn parse(input: &str) -> Result<Self> {
        let grid = Grid::parse(input, Ok)?;
        let start = grid
            .find(|&c| c == 'S')
            .ok_or_else(|| miette!("no start tile 'S' in maze"))?;

        // The start's symbol is the one connecting exactly toward the two
        // neighbors that connect back to it.
        let back_dirs: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| {
                grid.get(start + dir.offset())
                    .is_some_and(|&tile| connects(tile, dir.opposite()))
            })
            .collect();
        let &[a, b] = back_dirs.as_slice() else {
            bail!(
                "start tile has {} connecting neighbors, expected 2",
                back_dirs.len()
            );
        };
        let start_tile = "|-LJ7F"
            .chars()
            .find(|&tile| connects(tile, a) && connects(tile, b))
            .ok_or_else(|| miette!("no pipe symbol fits the start connections"))?;

        let mut maze = PipeMaze {
            grid,
            start,
            start_tile,
            loop_cells: HashSet::new(),
            loop_len: 0,
        };
        maze.trace_loop(a)?;
        Ok(maze)
    }

    /// The tile at `pos`, with the start's inferred symbol substituted.
    fn tile(&self, pos: I64Vec2) -> char {
        if pos == self.start {
            self.start_tile
        } else {
            self.grid.get(pos).copied().unwrap_or('.')
        }
    }

    fn trace_loop(&mut self, first_dir: Direction) -> Result<()> {
        let mut pos = self.start;
        let mut dir = first_dir;
        loop {
            if !self.loop_cells.insert(pos) {
                bail!(
                    "pipe run revisited ({}, {}) without closing at the start",
                    pos.x,
                    pos.y
                );
            }
            self.loop_len += 1;
            pos += dir.offset();
            if pos == self.start {
                return Ok(());
            }
            let tile = self.tile(pos);
            // A tile only continues the run if one of its ends faces the
            // arrival direction; sliding into an unconnected pipe is how a
            // malformed maze would otherwise trap the walk in a side cycle.
            if !connects(tile, dir.opposite()) {
                bail!(
                    "tile {:?} at ({}, {}) does not connect back to the run",
                    tile,
                    pos.x,
                    pos.y
                );
            }
            dir = connections(tile)
                .and_then(|dirs| dirs.into_iter().find(|&d| d != dir.opposite()))
                .ok_or_else(|| miette!("pipe loop broke off at ({}, {})", pos.x, pos.y))?;
        }
    }

    /// Steps to the farthest loop tile from the start, walking either way.
    pub fn farthest_distance(&self) -> usize {
        self.loop_len / 2
    }

    /// Tiles enclosed by the loop, counted per row by crossing parity: `|`
    /// always toggles, and a corner pair toggles only when it actually
    /// crosses the scanline (`F..J` or `L..7`, not `F..7` or `L..J`).
    pub fn enclosed_tiles(&self) -> usize {
        let (rows, cols) = self.grid.dimensions();
        let mut enclosed = 0;
        for y in 0..rows as i64 {
            let mut inside = false;
            let mut pending = None;
            for x in 0..cols as i64 {
                let pos = I64Vec2::new(x, y);
                if !self.loop_cells.contains(&pos) {
                    if inside {
                        enclosed += 1;
                    }
                    continue;
                }
                match self.tile(pos) {
                    '|' => inside = !inside,
                    tile @ ('L' | 'F') => pending = Some(tile),
                    'J' => {
                        if pending.take() != Some('L') {
                            inside = !inside;
                        }
                    }
                    '7' => {
                        if pending.take() != Some('F') {
                            inside = !inside;
                        }
                    }
                    _ => {}
                }
            }
        }
        enclosed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traces_the_simple_square_loop() {
        let input = ".....
.S-7.
.|.|.
.L-J.
.....";
        let maze = PipeMaze::parse(input).unwrap();
        assert_eq!(maze.loop_len, 8);
        assert_eq!(maze.farthest_distance(), 4);
        assert_eq!(maze.start_tile, 'F');
    }

    #[test]
    fn rejects_a_start_without_a_loop() {
        assert!(PipeMaze::parse("...\n.S.\n...").is_err());
    }

    #[test]
    fn rejects_a_run_that_slides_into_a_detached_cycle() {
        // The '|' below S points into the closed F7/LJ square, which never
        // returns to the start; parsing must fail instead of walking that
        // square forever.
        assert!(PipeMaze::parse("S7\n|.\nF7\nLJ").is_err());
    }

    #[test]
    fn single_enclosed_tile() {
        let input = "F-7
|.|
L-J";
        // No 'S' at all is also rejected.
        assert!(PipeMaze::parse(input).is_err());
        let maze = PipeMaze::parse("F-7\n|.|\nL-S").unwrap();
        assert_eq!(maze.enclosed_tiles(), 1);
    }
}
