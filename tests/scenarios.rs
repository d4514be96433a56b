use std::sync::{Arc, mpsc};

use mazegen::{
    MazeError, MazeRequest,
    finishing::{apply_symmetry, place_endpoints},
    frame::Framing,
    generators::{Generator, binary_tree, generate_grid, get_rng, randomized_kruskal},
    maze::{Direction, Grid, Position},
    pipeline::generate,
    settings::{EndpointPolicy, FrameParams, MazeSettings, Percent, Symmetry},
    solvers::{
        AnimatedSearch, CancelToken, SearchState, SolveSession, Topology, depth_first_path,
        solve_instant,
    },
};

fn request(framing: Framing, generator: Generator, seed: u64) -> MazeRequest {
    MazeRequest {
        framing,
        generator,
        seed: Some(seed),
        frame: FrameParams {
            rows: 10,
            columns: 10,
            text: "Go".to_string(),
            ..FrameParams::default()
        },
        ..MazeRequest::default()
    }
}

#[test]
fn binary_tree_full_bias_gives_row_monotonic_path() {
    let grid = binary_tree(5, 5, Percent::FULL, &mut get_rng(Some(3)));
    for pos in grid.positions() {
        if pos.row > 0 {
            assert!(!grid[pos].north, "{pos} should open north");
        }
        if pos.col < 4 && pos.row > 0 {
            assert!(grid[pos].east, "{pos} should keep its east wall");
        }
    }
    let path = depth_first_path(
        &grid,
        Position::new(0, 0),
        Position::new(4, 4),
        Topology::Rectangular,
    )
    .unwrap();
    assert!(path.windows(2).all(|w| w[0].row <= w[1].row));
}

#[test]
fn kruskal_ten_by_ten_is_a_spanning_tree() {
    for seed in 0..5 {
        let grid = randomized_kruskal(10, 10, &mut get_rng(Some(seed)));
        assert_eq!(grid.open_pairs(), 99);
        assert!(grid.is_fully_connected());
        assert!(grid.wall_symmetry_holds());
    }
}

#[test]
fn hexagon_entrance_reaches_exit() {
    for generator in Generator::ALL {
        for seed in 0..3 {
            let mut req = request(Framing::Polygon, generator, seed);
            req.settings.entrance = EndpointPolicy::Side(Direction::West);
            req.settings.exit = EndpointPolicy::Side(Direction::East);
            let maze = generate(&req).unwrap();
            let grid = maze.grid();
            let entrance = grid.entrance().unwrap();
            let exit = grid.exit().unwrap();
            assert!(grid.is_valid(entrance) && grid.is_valid(exit));
            assert!(grid.is_reachable(entrance, exit), "{generator} seed {seed}");
            assert!(grid.is_fully_connected(), "{generator} seed {seed}");
            assert!(grid.wall_symmetry_holds());
        }
    }
}

#[test]
fn animated_solve_of_single_route_maze() {
    // Only one route: down the west column then along the bottom row
    let mut grid = Grid::new(3, 3, true);
    let route = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)].map(|(r, c)| Position::new(r, c));
    for pair in route.windows(2) {
        grid.clear_wall_between(pair[0], pair[1]);
    }
    grid.clear_wall_between(Position::new(0, 1), Position::new(1, 1));
    grid[route[0]].is_entrance = true;
    grid[route[4]].is_exit = true;

    let mut reports: Vec<Vec<Position>> = Vec::new();
    let outcome = AnimatedSearch::new(Topology::Rectangular, 100)
        .run(&grid, &CancelToken::new(), |p| reports.push(p.to_vec()))
        .unwrap();
    assert_eq!(outcome.state, SearchState::Found);
    let last = reports.last().unwrap();
    assert_eq!(last, &route.to_vec());
    let mut seen = last.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), last.len());
}

#[test]
fn every_framing_and_generator_is_solvable() {
    for framing in [Framing::Square, Framing::Circular, Framing::Polygon] {
        for generator in Generator::ALL {
            let mut maze = generate(&request(framing, generator, 11)).unwrap();
            assert!(maze.grid().wall_symmetry_holds(), "{framing} {generator}");
            let path = maze.show_solution().unwrap().to_vec();
            assert_eq!(path.first().copied(), maze.grid().entrance());
            assert_eq!(path.last().copied(), maze.grid().exit());
        }
    }
    let mut text = generate(&request(Framing::Text, Generator::Kruskal, 0)).unwrap();
    assert!(text.show_solution().is_ok());
}

#[test]
fn exactly_one_entrance_and_exit() {
    for framing in [Framing::Square, Framing::Circular, Framing::Polygon, Framing::Text] {
        let maze = generate(&request(framing, Generator::Wilson, 5)).unwrap();
        let grid = maze.grid();
        assert_eq!(grid.positions().filter(|&p| grid[p].is_entrance).count(), 1);
        assert_eq!(grid.positions().filter(|&p| grid[p].is_exit).count(), 1);
    }
}

#[test]
fn solving_never_changes_walls() {
    let mut grid = generate_grid(
        Generator::Eller,
        12,
        9,
        &MazeSettings::default(),
        &mut get_rng(Some(8)),
    );
    let mut rng = get_rng(Some(8));
    place_endpoints(
        &mut grid,
        EndpointPolicy::Random,
        EndpointPolicy::Farthest,
        &mut rng,
    )
    .unwrap();
    let before = grid.clone();
    solve_instant(&mut grid, Topology::Rectangular).unwrap();
    grid.clear_solution();
    assert_eq!(grid, before);
}

#[test]
fn symmetric_mazes_keep_their_structure() {
    let base = generate_grid(
        Generator::HuntAndKill,
        8,
        10,
        &MazeSettings::default(),
        &mut get_rng(Some(2)),
    );
    for symmetry in [Symmetry::Horizontal, Symmetry::Vertical, Symmetry::Both] {
        let mirrored = apply_symmetry(&base, symmetry);
        assert!(mirrored.wall_symmetry_holds());
        assert!(mirrored.is_fully_connected());
        assert_eq!(apply_symmetry(&mirrored, symmetry), base);

        let mut req = request(Framing::Square, Generator::HuntAndKill, 2);
        req.settings.symmetry = symmetry;
        let mut maze = generate(&req).unwrap();
        assert!(maze.show_solution().is_ok());
    }
}

#[test]
fn low_dead_end_density_adds_loops() {
    let settings = MazeSettings {
        dead_end_density: Percent::ZERO,
        ..MazeSettings::default()
    };
    let grid = generate_grid(
        Generator::RecurBacktrack,
        15,
        15,
        &settings,
        &mut get_rng(Some(4)),
    );
    assert!(grid.is_fully_connected());
    assert!(grid.open_pairs() > grid.len() - 1);
    assert!(grid.positions().all(|p| grid[p].wall_count() < 3));
}

#[test]
fn configuration_errors_fail_fast() {
    let mut req = request(Framing::Square, Generator::Prim, 0);
    req.frame.columns = 0;
    assert!(matches!(
        generate(&req),
        Err(MazeError::InvalidDimensions { .. })
    ));

    let mut req = request(Framing::Text, Generator::Prim, 0);
    req.settings.symmetry = Symmetry::Vertical;
    assert!(matches!(
        generate(&req),
        Err(MazeError::UnsupportedCombination { .. })
    ));

    let mut req = request(Framing::Polygon, Generator::Prim, 0);
    req.frame.sides = 2;
    assert!(matches!(
        generate(&req),
        Err(MazeError::InvalidParameter { name: "sides", .. })
    ));
}

#[test]
fn regenerating_cancels_the_running_search() {
    let first = generate(&request(Framing::Square, Generator::Kruskal, 1)).unwrap();
    let second = generate(&request(Framing::Square, Generator::Kruskal, 2)).unwrap();
    let mut session = SolveSession::new();
    let (tx, rx) = mpsc::channel();
    session
        .start(Arc::new(first.grid().clone()), first.topology(), 1, move |p| {
            tx.send(p.len()).ok();
        })
        .unwrap();
    assert!(rx.recv().is_ok());

    session
        .start(Arc::new(second.grid().clone()), second.topology(), 100, |_| {})
        .unwrap();
    // The first search has unwound and dropped its sender
    let _ = rx.iter().count();
    let outcome = session.join().unwrap();
    assert_eq!(outcome.state, SearchState::Found);
    assert_eq!(outcome.path.last().copied(), second.grid().exit());
}
