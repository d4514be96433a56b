//! Animated, cancellable depth-first search.
//!
//! The search reports its current path after every extension and every
//! backtrack, then sleeps `101 - speed` milliseconds. The sleep is raced
//! against a [`CancelToken`] so cancellation takes effect immediately.

use std::{
    sync::{Arc, Condvar, Mutex},
    thread::JoinHandle,
    time::Duration,
};

use super::{Topology, endpoints, passable_neighbors};
use crate::error::Result;
use crate::maze::{Grid, Position};

/// Cooperative cancellation flag shared between a search and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    signal: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (cancel_mutex, cancel_condvar) = &*self.signal;
        match cancel_mutex.lock() {
            Ok(mut cancelled) => *cancelled = true,
            Err(poisoned) => *poisoned.into_inner() = true,
        }
        cancel_condvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        // Mutex poisoned, treat as cancelled
        self.signal.0.lock().map_or(true, |cancelled| *cancelled)
    }

    /// Sleeps for `timeout` unless cancelled first. Returns whether the token
    /// is cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        let (cancel_mutex, cancel_condvar) = &*self.signal;
        let Ok(guard) = cancel_mutex.lock() else {
            return true;
        };
        match cancel_condvar.wait_timeout_while(guard, timeout, |cancelled| !*cancelled) {
            Ok((cancelled, _)) => *cancelled,
            Err(_) => true,
        }
    }
}

/// Lifecycle of an animated search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Found,
    Exhausted,
    Cancelled,
}

impl SearchState {
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            SearchState::Found | SearchState::Exhausted | SearchState::Cancelled
        )
    }
}

/// Final state of a search together with the last path it held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub state: SearchState,
    pub path: Vec<Position>,
}

/// Neighbors of one path cell that have not been tried yet.
struct Frame {
    pending: Vec<Position>,
}

pub struct AnimatedSearch {
    topology: Topology,
    delay: Duration,
    state: SearchState,
}

impl AnimatedSearch {
    /// `speed` runs from 1 (slowest) to 100 (fastest); values outside are clamped.
    pub fn new(topology: Topology, speed: u8) -> Self {
        let speed = speed.clamp(1, 100);
        AnimatedSearch {
            topology,
            delay: Duration::from_millis(u64::from(101 - speed)),
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs the search from the grid's entrance to its exit, calling `on_path`
    /// with the current path after each step. The grid is only read.
    pub fn run<F>(&mut self, grid: &Grid, cancel: &CancelToken, mut on_path: F) -> Result<SearchOutcome>
    where
        F: FnMut(&[Position]),
    {
        let (entrance, exit) = endpoints(grid)?;
        self.state = SearchState::Searching;
        tracing::debug!("[solve] animated search from {} to {}", entrance, exit);

        let mut visited = vec![false; grid.len()];
        visited[grid.index_of(entrance)] = true;
        let mut path = vec![entrance];
        on_path(&path);
        if entrance == exit {
            return Ok(self.finish(SearchState::Found, path));
        }

        let mut stack = vec![Frame {
            pending: passable_neighbors(grid, entrance, self.topology),
        }];

        while let Some(frame) = stack.last_mut() {
            if cancel.is_cancelled() {
                return Ok(self.finish(SearchState::Cancelled, path));
            }
            let next = std::iter::from_fn(|| frame.pending.pop()).find(|n| !visited[grid.index_of(*n)]);
            match next {
                Some(next) => {
                    visited[grid.index_of(next)] = true;
                    path.push(next);
                    on_path(&path);
                    if next == exit {
                        return Ok(self.finish(SearchState::Found, path));
                    }
                    if cancel.wait(self.delay) {
                        return Ok(self.finish(SearchState::Cancelled, path));
                    }
                    stack.push(Frame {
                        pending: passable_neighbors(grid, next, self.topology),
                    });
                }
                None => {
                    // Backtrack and show the shorter path
                    stack.pop();
                    path.pop();
                    if !path.is_empty() {
                        on_path(&path);
                    }
                }
            }
        }

        tracing::error!("[solve] search exhausted without reaching {}", exit);
        Ok(self.finish(SearchState::Exhausted, path))
    }

    fn finish(&mut self, state: SearchState, path: Vec<Position>) -> SearchOutcome {
        self.state = state;
        tracing::debug!("[solve] animated search finished: {:?}", state);
        SearchOutcome { state, path }
    }
}

/// Owns at most one animated search running on a background thread.
/// Starting a new search cancels and joins the previous one first.
#[derive(Default)]
pub struct SolveSession {
    active: Option<(CancelToken, JoinHandle<Result<SearchOutcome>>)>,
}

impl SolveSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }

    /// Starts animating a search over `grid`. Any search already in flight
    /// is cancelled and fully unwound before the new one begins.
    pub fn start<F>(&mut self, grid: Arc<Grid>, topology: Topology, speed: u8, on_path: F) -> Result<()>
    where
        F: FnMut(&[Position]) + Send + 'static,
    {
        self.cancel();
        endpoints(&grid)?;

        let token = CancelToken::new();
        let search_token = token.clone();
        let handle = std::thread::spawn(move || {
            AnimatedSearch::new(topology, speed).run(&grid, &search_token, on_path)
        });
        self.active = Some((token, handle));
        Ok(())
    }

    /// Cancels the search in flight, if any, and waits for it to unwind.
    pub fn cancel(&mut self) -> Option<SearchOutcome> {
        let (token, _) = self.active.as_ref()?;
        token.cancel();
        self.join()
    }

    /// Waits for the search in flight to finish on its own.
    pub fn join(&mut self) -> Option<SearchOutcome> {
        let (_, handle) = self.active.take()?;
        match handle.join() {
            Ok(Ok(outcome)) => Some(outcome),
            Ok(Err(e)) => {
                tracing::warn!("[solve] animated search failed: {}", e);
                None
            }
            Err(_) => {
                tracing::error!("[solve] animated search thread panicked");
                None
            }
        }
    }
}

impl Drop for SolveSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
