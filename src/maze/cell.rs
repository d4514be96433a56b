use super::Direction;

/// A single maze cell: four wall flags plus generation and terminal-state markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
    /// Set during generation. Cells outside the playable shape also carry it permanently.
    pub visited: bool,
    pub is_entrance: bool,
    pub is_exit: bool,
    pub is_solution: bool,
}

impl Cell {
    /// A cell with all four walls standing.
    pub const CLOSED: Cell = Cell::with_walls(true);
    /// A cell with every wall cleared.
    pub const OPEN: Cell = Cell::with_walls(false);
    /// Marker for a cell that is not part of the playable shape.
    pub const OUTSIDE: Cell = Cell {
        visited: true,
        ..Cell::OPEN
    };

    const fn with_walls(present: bool) -> Self {
        Cell {
            north: present,
            south: present,
            east: present,
            west: present,
            visited: false,
            is_entrance: false,
            is_exit: false,
            is_solution: false,
        }
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn set_wall(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::North => self.north = present,
            Direction::South => self.south = present,
            Direction::East => self.east = present,
            Direction::West => self.west = present,
        }
    }

    /// Number of walls still standing around this cell.
    pub fn wall_count(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| self.has_wall(d)).count()
    }

    /// Returns a copy with the walls swapped as seen in a mirror.
    /// `flip_rows` swaps north and south, `flip_columns` swaps east and west.
    pub fn mirrored(&self, flip_rows: bool, flip_columns: bool) -> Cell {
        let mut cell = *self;
        if flip_rows {
            std::mem::swap(&mut cell.north, &mut cell.south);
        }
        if flip_columns {
            std::mem::swap(&mut cell.east, &mut cell.west);
        }
        cell
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::CLOSED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_count() {
        let mut cell = Cell::CLOSED;
        assert_eq!(cell.wall_count(), 4);
        cell.set_wall(Direction::East, false);
        assert_eq!(cell.wall_count(), 3);
        assert!(!cell.has_wall(Direction::East));
        assert_eq!(Cell::OPEN.wall_count(), 0);
    }

    #[test]
    fn test_mirrored_swaps_pairs() {
        let mut cell = Cell::CLOSED;
        cell.north = false;
        cell.east = false;
        let flipped = cell.mirrored(true, true);
        assert!(flipped.north && !flipped.south);
        assert!(flipped.east && !flipped.west);
        assert_eq!(flipped.mirrored(true, true), cell);
    }
}
