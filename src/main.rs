use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        mpsc::{self, RecvTimeoutError},
    },
    time::Duration,
};

use clap::Parser;
use crossterm::event::{self, KeyCode};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use mazegen::{
    Maze, MazeRequest,
    frame::Framing,
    generators::Generator,
    maze::{Grid, Position},
    pipeline::generate,
    render::{Renderer, tiles},
    settings::{EndpointPolicy, FrameParams, MazeSettings, Percent, Symmetry},
    solvers::{SearchState, SolveSession},
};

/// How often the animation loop checks for key presses
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(20);

#[derive(Parser)]
#[command(name = "mazegen")]
#[command(
    author,
    version,
    about = "Generate, frame and solve mazes in the terminal"
)]
/// Command-line arguments for the maze generator
struct Args {
    /// Number of rows (rings for circular framing)
    #[arg(short, long, default_value_t = 20)]
    rows: usize,

    /// Number of columns (sectors for circular framing)
    #[arg(short, long, default_value_t = 20)]
    columns: usize,

    /// Outline of the maze: square, circular, polygon or text
    #[arg(short, long, default_value = "square")]
    framing: Framing,

    /// Generation algorithm, e.g. backtracker, prim, kruskal, wilson
    #[arg(short, long, default_value = "backtracker")]
    algorithm: Generator,

    /// Number of polygon sides
    #[arg(long, default_value_t = 6)]
    sides: usize,

    /// Text to shape the maze with
    #[arg(short, long, default_value = "")]
    text: String,

    /// Glyph height in cells for text framing
    #[arg(long, default_value_t = 7)]
    glyph_height: usize,

    /// Random seed for reproducible mazes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Chance (0-100) of preferring a vertical carve or horizontal division
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    horizontal_bias: u8,

    /// Chance (0-100) that a branch is taken
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    branching: u8,

    /// Chance (0-100) that a dead end is kept
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    dead_end_density: u8,

    /// Entrance side: north, south, east, west or random
    #[arg(long, default_value = "west")]
    entrance: EndpointPolicy,

    /// Exit side: north, south, east, west, random or farthest
    #[arg(long, default_value = "east")]
    exit: EndpointPolicy,

    /// Mirroring: none, horizontal, vertical or both
    #[arg(long, default_value = "none")]
    symmetry: Symmetry,

    /// Show the solution
    #[arg(long)]
    solve: bool,

    /// Animate the search for the exit (Esc cancels)
    #[arg(long)]
    animate: bool,

    /// Animation speed from 1 (slowest) to 100 (fastest)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(1..=100))]
    speed: u8,

    /// File that receives the log output
    #[arg(long, default_value = "mazegen.log")]
    log_file: PathBuf,
}

impl Args {
    fn request(&self) -> MazeRequest {
        MazeRequest {
            framing: self.framing,
            generator: self.algorithm,
            settings: MazeSettings {
                horizontal_bias: Percent::new(self.horizontal_bias),
                branching_probability: Percent::new(self.branching),
                dead_end_density: Percent::new(self.dead_end_density),
                entrance: self.entrance,
                exit: self.exit,
                symmetry: self.symmetry,
            },
            frame: FrameParams {
                rows: self.rows,
                columns: self.columns,
                sides: self.sides,
                text: self.text.clone(),
                glyph_height: self.glyph_height,
                ..FrameParams::default()
            },
            seed: self.seed,
        }
    }
}

/// Send log output to a file so the terminal stays free for drawing.
/// The returned guard flushes the writer when dropped.
fn init_logging(path: &Path) -> WorkerGuard {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name().unwrap_or("mazegen.log".as_ref());
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args.log_file);

    let mut maze = match generate(&args.request()) {
        Ok(maze) => maze,
        Err(e) => {
            tracing::error!("[main] generation failed: {}", e);
            eprintln!("Could not generate the maze: {e}");
            return Ok(());
        }
    };

    if args.animate {
        return animate(&maze, args.speed);
    }

    if args.solve
        && let Err(e) = maze.show_solution()
    {
        eprintln!("Could not solve the maze: {e}");
    }
    Renderer::new().print(&tiles(maze.grid(), &[]))?;
    if let Some(path) = maze.solution() {
        println!("Solution length: {} cells", path.len());
    }
    Ok(())
}

/// Runs the animated search on a background thread and redraws every path it
/// reports. Esc cancels the search.
fn animate(maze: &Maze, speed: u8) -> std::io::Result<()> {
    let mut renderer = Renderer::new();
    let picture = tiles(maze.grid(), &[]);
    if !Renderer::fits_terminal(&picture)? {
        eprintln!("The terminal is too small to animate this maze. Please resize it or use --solve.");
        return Ok(());
    }

    let (path_tx, path_rx) = mpsc::channel::<Vec<Position>>();
    let mut session = SolveSession::new();
    let grid = Arc::new(maze.grid().clone());
    if let Err(e) = session.start(grid.clone(), maze.topology(), speed, move |path| {
        // Error only happens once the render loop has exited
        path_tx.send(path.to_vec()).ok();
    }) {
        eprintln!("Could not start the search: {e}");
        return Ok(());
    }

    renderer.setup_terminal()?;
    let result = animation_loop(&mut renderer, &grid, &path_rx, &mut session);
    renderer.restore()?;
    result
}

fn animation_loop(
    renderer: &mut Renderer,
    grid: &Grid,
    path_rx: &mpsc::Receiver<Vec<Position>>,
    session: &mut SolveSession,
) -> std::io::Result<()> {
    let mut cancelled = false;
    let mut latest = Vec::new();
    loop {
        match path_rx.recv_timeout(INPUT_POLL_TIMEOUT) {
            Ok(path) => {
                // Only the most recent path is worth drawing
                latest = path_rx.try_iter().last().unwrap_or(path);
                renderer.draw(&tiles(grid, &latest), "Searching... (Esc to cancel)")?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if event::poll(Duration::ZERO)?
            && let event::Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
            && key.code == KeyCode::Esc
        {
            tracing::debug!("[main] Esc pressed, cancelling search");
            session.cancel();
            cancelled = true;
            break;
        }
    }

    let state = if cancelled {
        SearchState::Cancelled
    } else {
        session.join().map_or(SearchState::Exhausted, |outcome| outcome.state)
    };
    let status = match state {
        SearchState::Found => format!("Found a path of {} cells. Press any key to exit.", latest.len()),
        SearchState::Cancelled => "Search cancelled. Press any key to exit.".to_string(),
        _ => "No path found. Press any key to exit.".to_string(),
    };
    renderer.draw(&tiles(grid, &latest), &status)?;

    loop {
        if let event::Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(());
        }
    }
}
