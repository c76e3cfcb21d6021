use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use glam::I64Vec2;

use crate::error::GridError;
use crate::grid::{Direction, Grid};

/// A node in the constrained search graph: position plus enough movement
/// history to express run-length rules. Two states at the same position with
/// different history are distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub pos: I64Vec2,
    /// `None` only for the start state, before the first move.
    pub dir: Option<Direction>,
    /// Consecutive steps taken in `dir` so far.
    pub run: u8,
}

impl SearchState {
    pub fn start(pos: I64Vec2) -> Self {
        SearchState {
            pos,
            dir: None,
            run: 0,
        }
    }
}

/// Frontier entries are ordered by cost alone; ties break arbitrarily.
struct FrontierEntry<S> {
    cost: u64,
    state: S,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the cheapest entry first.
        other.cost.cmp(&self.cost)
    }
}

/// Dijkstra over an implicit graph of states.
///
/// `successors` yields `(next_state, incremental_cost)` pairs; costs must be
/// non-negative (they are, being cell weights), which is what guarantees the
/// first dequeue of a goal state carries the true minimum. The goal is tested
/// on dequeue, not enqueue, so cost ties resolve correctly; a start state
/// that already satisfies the goal returns 0 without expansion.
pub fn shortest_path<S, FN, FG>(
    start: S,
    mut successors: FN,
    is_goal: FG,
) -> Result<u64, GridError>
where
    S: Eq + Hash + Clone,
    FN: FnMut(&S) -> Vec<(S, u64)>,
    FG: Fn(&S) -> bool,
{
    if is_goal(&start) {
        return Ok(0);
    }

    let mut distances: HashMap<S, u64> = HashMap::new();
    distances.insert(start.clone(), 0);
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        cost: 0,
        state: start,
    });

    while let Some(FrontierEntry { cost, state }) = frontier.pop() {
        if is_goal(&state) {
            return Ok(cost);
        }
        // Stale entry: a cheaper path to this state was already processed.
        if distances.get(&state).is_some_and(|&best| best < cost) {
            continue;
        }
        for (next, step) in successors(&state) {
            let next_cost = cost + step;
            let known = distances.get(&next).copied();
            if known.is_none_or(|best| next_cost < best) {
                distances.insert(next.clone(), next_cost);
                frontier.push(FrontierEntry {
                    cost: next_cost,
                    state: next,
                });
            }
        }
    }

    Err(GridError::NotReachable)
}

/// Movement-history rule: never reverse, at most `max_run` consecutive steps
/// in one direction, and no turning (or stopping) before `min_run` steps.
#[derive(Debug, Clone, Copy)]
pub struct RunPolicy {
    pub min_run: u8,
    pub max_run: u8,
}

impl RunPolicy {
    /// Legal moves out of `state` on a weighted grid, each costing the
    /// entered cell's weight.
    pub fn successors(&self, grid: &Grid<u8>, state: &SearchState) -> Vec<(SearchState, u64)> {
        let mut out = Vec::with_capacity(4);
        for dir in Direction::ALL {
            if let Some(prev) = state.dir {
                if dir == prev.opposite() {
                    continue;
                }
                if dir == prev && state.run >= self.max_run {
                    continue;
                }
                if dir != prev && state.run < self.min_run {
                    continue;
                }
            }
            let pos = state.pos + dir.offset();
            let Some(&weight) = grid.get(pos) else {
                continue;
            };
            let run = if state.dir == Some(dir) {
                state.run + 1
            } else {
                1
            };
            out.push((
                SearchState {
                    pos,
                    dir: Some(dir),
                    run,
                },
                u64::from(weight),
            ));
        }
        out
    }

    /// A path may end on `state` only once the minimum run is satisfied.
    pub fn can_stop(&self, state: &SearchState) -> bool {
        state.dir.is_none() || state.run >= self.min_run
    }
}

/// Minimum total cost from the top-left corner to the bottom-right corner
/// under `policy`, where each step costs the entered cell's weight.
#[tracing::instrument(skip(grid), fields(rows = grid.height(), cols = grid.width()))]
pub fn min_travel_cost(grid: &Grid<u8>, policy: RunPolicy) -> Result<u64, GridError> {
    let (rows, cols) = grid.dimensions();
    let target = I64Vec2::new(cols as i64 - 1, rows as i64 - 1);
    shortest_path(
        SearchState::start(I64Vec2::ZERO),
        |state| policy.successors(grid, state),
        |state| state.pos == target && policy.can_stop(state),
    )
}
