//! Shared grid primitives for the 2023 puzzle solvers.
//!
//! Three recurring patterns live here so the day crates stay small:
//! bounds-safe (optionally toroidal) grids, Dijkstra over states that carry
//! movement history, and beam propagation with cycle detection.

pub mod beam;
pub mod error;
pub mod flood;
pub mod grid;
pub mod search;

pub use beam::{Beam, Optic, OpticsTable, PropagationSimulator, Redirect};
pub use error::GridError;
pub use flood::{quadratic_extrapolate, reachable_after};
pub use grid::{Addressing, Direction, Grid};
pub use search::{min_travel_cost, shortest_path, RunPolicy, SearchState};
