use glam::I64Vec2;

use crate::error::GridError;

/// The four orthogonal movement directions, in screen coordinates
/// (`x` grows rightward, `y` grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> I64Vec2 {
        match self {
            Direction::Up => I64Vec2::new(0, -1),
            Direction::Down => I64Vec2::new(0, 1),
            Direction::Left => I64Vec2::new(-1, 0),
            Direction::Right => I64Vec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

}

/// How out-of-range coordinates are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Addressing {
    /// Coordinates outside the grid have no cell.
    #[default]
    Bounded,
    /// Any integer coordinate wraps onto the grid via floor modulo,
    /// so `(-1, -1)` on a 3x3 grid resolves to `(2, 2)`.
    Toroidal,
}

/// A fixed-size rectangular grid, immutable after construction.
///
/// Positions are `(x, y)` with `x` as the column and `y` as the row.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
    addressing: Addressing,
}

impl<T> Grid<T> {
    /// Builds a grid from rows of equal length. Ragged or empty input is
    /// rejected as [`GridError::MalformedGrid`].
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::MalformedGrid("grid has no cells".into()));
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::MalformedGrid(format!(
                    "row {y} has length {}, expected {width}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Grid {
            cells,
            width,
            height,
            addressing: Addressing::Bounded,
        })
    }

    /// Parses a character grid, mapping each symbol through `to_cell`.
    /// Blank lines are skipped.
    pub fn parse<F>(input: &str, mut to_cell: F) -> Result<Self, GridError>
    where
        F: FnMut(char) -> Result<T, GridError>,
    {
        let rows = input
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(&mut to_cell).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    pub fn with_addressing(mut self, addressing: Addressing) -> Self {
        self.addressing = addressing;
        self
    }

    /// `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when `pos` lies literally inside the grid, ignoring addressing.
    pub fn contains(&self, pos: I64Vec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Row-major storage index for an in-bounds position, ignoring addressing.
    pub fn index_of(&self, pos: I64Vec2) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    fn resolve(&self, pos: I64Vec2) -> Option<usize> {
        match self.addressing {
            Addressing::Bounded => self.index_of(pos),
            Addressing::Toroidal => {
                // rem_euclid is the floor modulo: correct for any negative
                // coordinate, unlike the truncating `%` operator.
                let x = pos.x.rem_euclid(self.width as i64) as usize;
                let y = pos.y.rem_euclid(self.height as i64) as usize;
                Some(y * self.width + x)
            }
        }
    }

    /// Non-erroring point query; `None` for out-of-range bounded positions.
    pub fn get(&self, pos: I64Vec2) -> Option<&T> {
        self.resolve(pos).map(|idx| &self.cells[idx])
    }

    /// Point query that reports [`GridError::OutOfBounds`] in bounded mode.
    /// Traversal code should prefer [`Grid::get`] or [`Grid::neighbors`],
    /// which treat out-of-range candidates as absent.
    pub fn at(&self, pos: I64Vec2) -> Result<&T, GridError> {
        self.get(pos).ok_or(GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            rows: self.height,
            cols: self.width,
        })
    }

    /// The up to four orthogonally adjacent positions that resolve to a cell.
    /// Toroidal grids always yield all four; the returned coordinates are the
    /// raw neighbors, not their wrapped equivalents.
    pub fn neighbors(&self, pos: I64Vec2) -> impl Iterator<Item = I64Vec2> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| pos + dir.offset())
            .filter(|&next| self.resolve(next).is_some())
    }

    /// Like [`Grid::neighbors`], additionally filtered by a predicate on the
    /// resolved cell (e.g. "not a wall").
    pub fn neighbors_filtered<'a, P>(
        &'a self,
        pos: I64Vec2,
        predicate: P,
    ) -> impl Iterator<Item = I64Vec2> + 'a
    where
        P: Fn(&T) -> bool + 'a,
    {
        Direction::ALL
            .into_iter()
            .map(move |dir| pos + dir.offset())
            .filter(move |&next| self.get(next).is_some_and(&predicate))
    }

    /// All in-bounds positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = I64Vec2> + '_ {
        (0..self.height as i64)
            .flat_map(move |y| (0..self.width as i64).map(move |x| I64Vec2::new(x, y)))
    }

    /// First position (row-major) whose cell satisfies the predicate.
    pub fn find<P>(&self, predicate: P) -> Option<I64Vec2>
    where
        P: Fn(&T) -> bool,
    {
        self.cells.iter().position(predicate).map(|idx| {
            I64Vec2::new((idx % self.width) as i64, (idx / self.width) as i64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn digit_grid(input: &str) -> Grid<u8> {
        Grid::parse(input, |c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| GridError::MalformedGrid(format!("not a digit: {c:?}")))
        })
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Grid::parse("123\n12\n123", |c| Ok(c)).unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
    }

    #[test]
    fn rejects_empty_input() {
        let err = Grid::<char>::parse("", |c| Ok(c)).unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
    }

    #[test]
    fn bounded_point_query_errors_outside() {
        let grid = digit_grid("12\n34");
        assert_eq!(*grid.at(I64Vec2::new(1, 1)).unwrap(), 4);
        assert!(matches!(
            grid.at(I64Vec2::new(2, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.at(I64Vec2::new(0, -1)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[rstest]
    #[case(I64Vec2::new(-1, -1), I64Vec2::new(2, 2))]
    #[case(I64Vec2::new(3, 4), I64Vec2::new(0, 1))]
    #[case(I64Vec2::new(-301, 599), I64Vec2::new(2, 2))]
    fn toroidal_wraps_like_repeated_modular_reduction(
        #[case] query: I64Vec2,
        #[case] canonical: I64Vec2,
    ) {
        let grid = digit_grid("123\n456\n789").with_addressing(Addressing::Toroidal);
        assert_eq!(grid.at(query).unwrap(), grid.at(canonical).unwrap());
    }

    #[test]
    fn corner_has_two_bounded_neighbors() {
        let grid = digit_grid("12\n34");
        assert_eq!(grid.neighbors(I64Vec2::ZERO).count(), 2);
        let toroidal = grid.with_addressing(Addressing::Toroidal);
        assert_eq!(toroidal.neighbors(I64Vec2::ZERO).count(), 4);
    }

    #[test]
    fn neighbor_filter_drops_walls() {
        let grid = Grid::parse(".#\n..", |c| Ok(c)).unwrap();
        let open: Vec<_> = grid
            .neighbors_filtered(I64Vec2::ZERO, |&c| c != '#')
            .collect();
        assert_eq!(open, vec![I64Vec2::new(0, 1)]);
    }

    #[test]
    fn find_locates_first_match() {
        let grid = Grid::parse("..#\n.S.", |c| Ok(c)).unwrap();
        assert_eq!(grid.find(|&c| c == 'S'), Some(I64Vec2::new(1, 1)));
        assert_eq!(grid.find(|&c| c == 'X'), None);
    }
}
