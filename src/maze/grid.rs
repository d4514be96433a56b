use std::collections::VecDeque;

use super::{Cell, Direction, Position};

/// Rectangular cell storage. Non-rectangular framings keep the rectangle and
/// carry a validity mask marking which cells belong to the playable shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: usize,
    columns: usize,
    mask: Option<Box<[bool]>>,
}

impl Grid {
    /// Creates a grid with every wall standing, or every wall cleared when
    /// `walls_present` is false.
    ///
    /// # Panics
    /// If `rows * columns` overflows. Requests are bounded by
    /// [`MAX_CELLS`](crate::pipeline::MAX_CELLS) before they get here.
    pub fn new(rows: usize, columns: usize, walls_present: bool) -> Self {
        let cell = if walls_present { Cell::CLOSED } else { Cell::OPEN };
        Grid {
            cells: vec![cell; rows * columns].into_boxed_slice(),
            rows,
            columns,
            mask: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells in storage, valid or not.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn ravel_index(&self, pos: Position) -> usize {
        pos.row * self.columns + pos.col
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.columns, index % self.columns)
    }

    pub fn index_of(&self, pos: Position) -> usize {
        self.ravel_index(pos)
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |col| Position::new(row, col)))
    }

    /// Iterates over the positions that belong to the playable shape.
    pub fn valid_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&p| self.is_valid(p))
    }

    /// The neighbor one step away in `direction`, if it is inside the rectangle.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.is_in_bounds(next).then_some(next)
    }

    /// In-bounds cardinal neighbors together with the direction that leads to them.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.step(pos, d).map(|n| (d, n)))
    }

    /// Valid neighbors reachable from `pos` through a cleared wall.
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.neighbors(pos)
            .filter(move |&(d, n)| !self[pos].has_wall(d) && self.is_valid(n))
            .map(|(_, n)| n)
    }

    /// Installs a validity mask. The mask must have one entry per cell.
    ///
    /// # Panics
    /// If the mask length differs from the number of cells.
    pub fn set_mask(&mut self, mask: Vec<bool>) {
        assert_eq!(mask.len(), self.cells.len(), "mask must cover every cell");
        self.mask = Some(mask.into_boxed_slice());
    }

    pub fn mask(&self) -> Option<&[bool]> {
        self.mask.as_deref()
    }

    /// Whether the cell belongs to the playable shape. Grids without a mask are
    /// valid everywhere inside the rectangle.
    pub fn is_valid(&self, pos: Position) -> bool {
        self.is_in_bounds(pos)
            && self
                .mask
                .as_ref()
                .is_none_or(|mask| mask[self.ravel_index(pos)])
    }

    pub fn valid_count(&self) -> usize {
        match &self.mask {
            Some(mask) => mask.iter().filter(|&&v| v).count(),
            None => self.cells.len(),
        }
    }

    /// Sets or clears the wall on `pos`'s side in `direction` and on the
    /// matching side of the neighbor, if there is one.
    pub fn set_wall(&mut self, pos: Position, direction: Direction, present: bool) {
        self[pos].set_wall(direction, present);
        if let Some(next) = self.step(pos, direction) {
            self[next].set_wall(direction.opposite(), present);
        }
    }

    pub fn clear_wall(&mut self, pos: Position, direction: Direction) {
        self.set_wall(pos, direction, false);
    }

    /// Removes the wall between two grid-adjacent cells on both sides.
    ///
    /// Callers are responsible for bounds checking.
    ///
    /// # Panics
    /// If `b` is not exactly one cardinal step away from `a`.
    pub fn clear_wall_between(&mut self, a: Position, b: Position) {
        let Some(direction) = a.direction_to(b) else {
            panic!("cells {a:?} and {b:?} are not adjacent");
        };
        self[a].set_wall(direction, false);
        self[b].set_wall(direction.opposite(), false);
    }

    /// Whether a wall separates two adjacent cells. Non-adjacent cells are
    /// always separated.
    pub fn is_wall_between(&self, a: Position, b: Position) -> bool {
        match a.direction_to(b) {
            Some(direction) => self[a].has_wall(direction),
            None => true,
        }
    }

    /// Turns a cell into an outside marker: every wall cleared and visited.
    /// The walls of valid neighbors facing it are closed so the shape keeps a
    /// boundary.
    pub fn null_out(&mut self, pos: Position) {
        self[pos] = Cell::OUTSIDE;
        for direction in Direction::ALL {
            if let Some(next) = self.step(pos, direction)
                && self.is_valid(next)
            {
                self[next].set_wall(direction.opposite(), true);
            }
        }
    }

    /// Closes the outer boundary of the rectangle.
    pub fn close_boundary(&mut self) {
        if self.is_empty() {
            return;
        }
        let (last_row, last_col) = (self.rows - 1, self.columns - 1);
        for col in 0..self.columns {
            self[Position::new(0, col)].north = true;
            self[Position::new(last_row, col)].south = true;
        }
        for row in 0..self.rows {
            self[Position::new(row, 0)].west = true;
            self[Position::new(row, last_col)].east = true;
        }
    }

    pub fn reset_visited(&mut self) {
        for index in 0..self.cells.len() {
            let pos = self.position_of(index);
            let valid = self.is_valid(pos);
            self.cells[index].visited = !valid;
        }
    }

    pub fn entrance(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|c| c.is_entrance)
            .map(|i| self.position_of(i))
    }

    pub fn exit(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|c| c.is_exit)
            .map(|i| self.position_of(i))
    }

    /// Marks every cell of `path` as part of the solution.
    pub fn mark_solution(&mut self, path: &[Position]) {
        for &pos in path {
            self[pos].is_solution = true;
        }
    }

    pub fn clear_solution(&mut self) {
        self.cells.iter_mut().for_each(|c| c.is_solution = false);
    }

    /// Breadth-first reachability over cleared walls, restricted to valid
    /// cells. Returns one flag per cell.
    pub fn reachable_from(&self, start: Position) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.is_valid(start) {
            return seen;
        }
        seen[self.ravel_index(start)] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for next in self.open_neighbors(pos) {
                let idx = self.ravel_index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_reachable(&self, from: Position, to: Position) -> bool {
        self.is_valid(to) && self.reachable_from(from)[self.ravel_index(to)]
    }

    /// Whether every valid cell can reach every other valid cell.
    pub fn is_fully_connected(&self) -> bool {
        let Some(start) = self.valid_positions().next() else {
            return true;
        };
        let seen = self.reachable_from(start);
        self.valid_positions().all(|p| seen[self.ravel_index(p)])
    }

    /// Number of cleared walls between pairs of adjacent valid cells.
    pub fn open_pairs(&self) -> usize {
        self.valid_positions()
            .flat_map(|p| {
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter_map(move |d| self.step(p, d).map(|n| (p, d, n)))
            })
            .filter(|&(p, d, n)| self.is_valid(n) && !self[p].has_wall(d))
            .count()
    }

    /// Checks that every pair of adjacent valid cells agrees on the wall between them.
    pub fn wall_symmetry_holds(&self) -> bool {
        self.valid_positions().all(|p| {
            self.neighbors(p)
                .filter(|&(_, n)| self.is_valid(n))
                .all(|(d, n)| self[p].has_wall(d) == self[n].has_wall(d.opposite()))
        })
    }
}

impl std::ops::Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Position> for Grid {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.cells[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(3, 4, true);
        let pos = Position::new(2, 3);
        grid[pos].is_exit = true;
        assert_eq!(grid.exit(), Some(pos));
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.position_of(grid.index_of(pos)), pos);
    }

    #[test]
    fn test_clear_wall_between_updates_both_sides() {
        let mut grid = Grid::new(3, 3, true);
        let a = Position::new(1, 1);
        let b = Position::new(0, 1);
        grid.clear_wall_between(a, b);
        assert!(!grid[a].north);
        assert!(!grid[b].south);
        assert!(grid.wall_symmetry_holds());
        assert_eq!(grid.open_pairs(), 1);
    }

    #[test]
    #[should_panic]
    fn test_clear_wall_between_rejects_diagonal() {
        let mut grid = Grid::new(3, 3, true);
        grid.clear_wall_between(Position::new(0, 0), Position::new(1, 1));
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let grid = Grid::new(2, 2, true);
        assert_eq!(grid.step(Position::new(0, 0), Direction::North), None);
        assert_eq!(grid.step(Position::new(0, 0), Direction::West), None);
        assert_eq!(
            grid.step(Position::new(0, 0), Direction::East),
            Some(Position::new(0, 1))
        );
        assert_eq!(grid.step(Position::new(1, 1), Direction::South), None);
    }

    #[test]
    fn test_reachability_respects_mask() {
        let mut grid = Grid::new(1, 3, false);
        grid.close_boundary();
        grid.set_mask(vec![true, false, true]);
        assert!(!grid.is_reachable(Position::new(0, 0), Position::new(0, 2)));
        assert!(!grid.is_fully_connected());
        assert_eq!(grid.valid_count(), 2);
    }

    #[test]
    fn test_null_out_closes_valid_neighbors() {
        let mut grid = Grid::new(3, 3, false);
        let mut mask = vec![true; 9];
        mask[4] = false;
        grid.set_mask(mask);
        grid.null_out(Position::new(1, 1));
        assert_eq!(grid[Position::new(1, 1)], Cell::OUTSIDE);
        assert!(grid[Position::new(0, 1)].south);
        assert!(grid[Position::new(1, 0)].east);
        assert!(grid.wall_symmetry_holds());
    }

    #[test]
    fn test_close_boundary_closes_every_outer_wall() {
        let mut grid = Grid::new(2, 3, false);
        grid.close_boundary();
        for col in 0..3 {
            assert!(grid[Position::new(0, col)].north);
            assert!(grid[Position::new(1, col)].south);
            assert!(!grid[Position::new(0, col)].south);
        }
        for row in 0..2 {
            assert!(grid[Position::new(row, 0)].west);
            assert!(grid[Position::new(row, 2)].east);
            assert!(!grid[Position::new(row, 1)].west);
        }
        assert!(grid.wall_symmetry_holds());
    }
}
