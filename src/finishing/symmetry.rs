use crate::maze::{Grid, Position};
use crate::settings::Symmetry;

/// Returns a mirrored copy of the grid. Horizontal symmetry reflects across
/// the horizontal midline (north and south walls swap), vertical across the
/// vertical midline (east and west swap). Every cell flag and the validity
/// mask travel with their cell, so each mirror is an involution.
pub fn apply_symmetry(grid: &Grid, symmetry: Symmetry) -> Grid {
    let (flip_rows, flip_columns) = match symmetry {
        Symmetry::None => return grid.clone(),
        Symmetry::Horizontal => (true, false),
        Symmetry::Vertical => (false, true),
        Symmetry::Both => (true, true),
    };
    let source = |pos: Position| {
        Position::new(
            if flip_rows { grid.rows() - 1 - pos.row } else { pos.row },
            if flip_columns { grid.columns() - 1 - pos.col } else { pos.col },
        )
    };

    let mut mirrored = grid.clone();
    for pos in grid.positions() {
        mirrored[pos] = grid[source(pos)].mirrored(flip_rows, flip_columns);
    }
    if let Some(mask) = grid.mask() {
        mirrored.set_mask(grid.positions().map(|p| mask[grid.index_of(source(p))]).collect());
    }
    tracing::debug!("[finish] applied {:?} symmetry", symmetry);
    mirrored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, hunt_and_kill};
    use crate::settings::Percent;

    #[test]
    fn test_mirroring_is_an_involution() {
        let mut grid = hunt_and_kill(7, 9, Percent::FULL, &mut get_rng(Some(6)));
        grid[Position::new(0, 2)].is_entrance = true;
        grid[Position::new(6, 8)].is_exit = true;
        for symmetry in [Symmetry::Horizontal, Symmetry::Vertical, Symmetry::Both] {
            let once = apply_symmetry(&grid, symmetry);
            assert_ne!(once, grid);
            assert_eq!(apply_symmetry(&once, symmetry), grid);
        }
    }

    #[test]
    fn test_mirror_preserves_structure() {
        let grid = hunt_and_kill(6, 6, Percent::FULL, &mut get_rng(Some(2)));
        let mirrored = apply_symmetry(&grid, Symmetry::Vertical);
        assert!(mirrored.wall_symmetry_holds());
        assert!(mirrored.is_fully_connected());
        assert_eq!(mirrored.open_pairs(), grid.open_pairs());
        assert_eq!(
            mirrored[Position::new(0, 0)].east,
            grid[Position::new(0, 5)].west
        );
    }

    #[test]
    fn test_mask_is_mirrored() {
        let mut grid = Grid::new(2, 2, true);
        grid.set_mask(vec![true, false, true, true]);
        let mirrored = apply_symmetry(&grid, Symmetry::Vertical);
        assert_eq!(mirrored.mask(), Some(&[false, true, true, true][..]));
    }
}
