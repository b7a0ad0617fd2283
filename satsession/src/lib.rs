//! Incremental SAT solving sessions.
//!
//! A `Session` wraps a search engine (by default the `cdcl` solver) and
//! tracks whether the formula built so far has been solved, found satisfiable
//! or proved unsatisfiable. Model queries are only answered when they are
//! meaningful.
//!
//! ```
//! use satsession::Session;
//!
//! let s = Session::new();
//! let a = s.new_var()?;
//! let b = s.new_var()?;
//! (&s << [a, b])?;
//! (&s << [-a, -b])?;
//! assert!(s.solve()?);
//! assert_ne!(a.value()?, b.value()?);
//! # Ok::<(), satsession::Error>(())
//! ```

pub mod codec;
mod error;
mod handle;
mod session;

pub use cdcl::SolverParams;
pub use error::{Error, Result, StateError, UsageError};
pub use handle::{Clause, Literal, Term, Variable};
pub use sattrait::{LitCode, SearchEngine, VarIndex};
pub use session::{ResultState, Session};
