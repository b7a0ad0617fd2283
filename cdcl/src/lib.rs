//! A conflict-driven clause-learning SAT solver in the MiniSat tradition:
//! watched-literal propagation, first-UIP learning with clause minimization,
//! VSIDS branching, Luby restarts and incremental solving under assumptions.

#[cfg(feature = "profiler")]
macro_rules! profile {
    ($name:expr) => {
        let _p = hprof::enter($name);
    };
}

#[cfg(not(feature = "profiler"))]
macro_rules! profile {
    ($name:expr) => {};
}

pub mod clausedb;
mod heap;
pub mod lits;
mod params;
mod solver;

pub use lits::*;
pub use params::{SolverParams, SolverStatistics};
pub use solver::Solver;
