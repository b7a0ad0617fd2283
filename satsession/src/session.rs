use crate::error::{Result, StateError, UsageError};
use crate::handle::{Clause, Term, Variable};
use cdcl::{Solver, SolverParams};
use log::{debug, trace};
use sattrait::{LitCode, SearchEngine};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;

/// Outcome of the latest mutation or search on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultState {
    /// Fresh, or changed since the last search.
    Unsolved,
    Satisfied,
    /// The permanent clauses are contradictory. Terminal.
    Unsat,
    /// The last search failed, but only because of its assumptions.
    UnsatUnderAssumptions,
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultState::Unsolved => "not solved yet",
            ResultState::Satisfied => "satisfied",
            ResultState::Unsat => "unsatisfiable",
            ResultState::UnsatUnderAssumptions => "unsatisfiable under assumptions",
        })
    }
}

struct Inner<E> {
    engine: E,
    state: ResultState,
    clause_count: usize,
}

impl<E> Inner<E> {
    fn transition(&mut self, next: ResultState) {
        if self.state != next {
            debug!("session: {} -> {}", self.state, next);
        }
        self.state = next;
    }
}

/// An incremental solving session owning one search engine.
///
/// All methods take `&self` so that `Variable` and `Literal` handles can
/// borrow the session they belong to. Handles from one session are rejected
/// by every other session.
pub struct Session<E: SearchEngine = Solver> {
    inner: RefCell<Inner<E>>,
}

impl Session<Solver> {
    pub fn new() -> Self {
        Self::with_params(SolverParams::default())
    }

    pub fn with_params(params: SolverParams) -> Self {
        Self::with_engine(Solver::with_params(params))
    }
}

impl Default for Session<Solver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SearchEngine> Session<E> {
    pub fn with_engine(engine: E) -> Self {
        Session {
            inner: RefCell::new(Inner {
                engine,
                state: ResultState::Unsolved,
                clause_count: 0,
            }),
        }
    }

    pub fn state(&self) -> ResultState {
        self.inner.borrow().state
    }

    /// True once any search has run, whatever its outcome.
    pub fn is_solved(&self) -> bool {
        self.state() != ResultState::Unsolved
    }

    pub fn is_satisfied(&self) -> bool {
        self.state() == ResultState::Satisfied
    }

    pub fn num_vars(&self) -> usize {
        self.inner.borrow().engine.num_vars()
    }

    /// Number of clauses accepted without making the session unsatisfiable.
    pub fn num_clauses(&self) -> usize {
        self.inner.borrow().clause_count
    }

    fn ensure_not_unsat(&self) -> Result<()> {
        match self.state() {
            ResultState::Unsat => Err(StateError::Unsatisfiable.into()),
            _ => Ok(()),
        }
    }

    fn ensure_owner(&self, other: &Session<E>) -> Result<()> {
        if std::ptr::eq(self, other) {
            Ok(())
        } else {
            Err(UsageError::ForeignHandle.into())
        }
    }

    fn encode<'s, T: Into<Term<'s, E>>>(
        &'s self,
        terms: impl IntoIterator<Item = T>,
    ) -> Result<SmallVec<[LitCode; 8]>> {
        terms
            .into_iter()
            .map(|t| {
                let t = t.into();
                self.ensure_owner(t.session())?;
                Ok(t.code())
            })
            .collect()
    }

    pub fn new_var(&self) -> Result<Variable<'_, E>> {
        self.ensure_not_unsat()?;
        let mut inner = self.inner.borrow_mut();
        let index = inner.engine.new_var();
        inner.transition(ResultState::Unsolved);
        Ok(Variable::new(self, index))
    }

    /// Add a clause to the permanent formula.
    ///
    /// If the engine finds the formula contradictory, the session becomes
    /// `Unsat` and the clause is not counted. This is not an error; the
    /// next mutating call is.
    pub fn add_clause<'s, T: Into<Term<'s, E>>>(
        &'s self,
        terms: impl IntoIterator<Item = T>,
    ) -> Result<&'s Self> {
        self.ensure_not_unsat()?;
        let lits = self.encode(terms)?;
        trace!("add_clause {:?}", lits);

        let mut inner = self.inner.borrow_mut();
        if inner.engine.add_clause(&lits) {
            inner.clause_count += 1;
            inner.transition(ResultState::Unsolved);
        } else {
            inner.transition(ResultState::Unsat);
        }
        Ok(self)
    }

    /// Same as `add_clause`, taking anything convertible to a `Clause`. Also
    /// available as `&session << clause`.
    pub fn append<'s>(&'s self, clause: impl Into<Clause<'s, E>>) -> Result<&'s Self> {
        self.add_clause(clause.into())
    }

    pub fn solve(&self) -> Result<bool> {
        self.solve_with(std::iter::empty::<Term<'_, E>>())
    }

    /// Search for a model in which every assumption holds. Assumptions only
    /// last for this call.
    pub fn solve_with<'s, T: Into<Term<'s, E>>>(
        &'s self,
        assumptions: impl IntoIterator<Item = T>,
    ) -> Result<bool> {
        self.ensure_not_unsat()?;
        let lits = self.encode(assumptions)?;
        trace!("solve under {:?}", lits);

        let mut inner = self.inner.borrow_mut();
        let satisfied = inner.engine.solve(&lits);
        inner.transition(if satisfied {
            ResultState::Satisfied
        } else if lits.is_empty() {
            ResultState::Unsat
        } else {
            ResultState::UnsatUnderAssumptions
        });
        Ok(satisfied)
    }

    /// Look for conflicts that hold independently of any assumptions.
    /// Returns false, and makes the session `Unsat`, if there are any.
    pub fn simplify(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.engine.simplify() {
            true
        } else {
            inner.transition(ResultState::Unsat);
            false
        }
    }

    #[deprecated(note = "use `simplify`")]
    pub fn simplify_db(&self) -> bool {
        self.simplify()
    }

    /// Value of a variable in the model of the last successful search.
    pub fn value_of<'s>(&'s self, term: impl Into<Term<'s, E>>) -> Result<bool> {
        let var = match term.into() {
            Term::Variable(v) => v,
            other => {
                return Err(UsageError::WrongKind {
                    found: other.kind(),
                    expected: "Variable",
                }
                .into())
            }
        };

        let inner = self.inner.borrow();
        match inner.state {
            ResultState::Satisfied => {}
            ResultState::Unsolved => return Err(StateError::NotSolved.into()),
            ResultState::Unsat => return Err(StateError::Unsatisfiable.into()),
            ResultState::UnsatUnderAssumptions => {
                return Err(StateError::UnsatisfiableUnderAssumptions.into())
            }
        }
        self.ensure_owner(var.session())?;
        inner
            .engine
            .value(var.index())
            .ok_or_else(|| StateError::NotSolved.into())
    }
}

impl<'s, E: SearchEngine, C: Into<Clause<'s, E>>> std::ops::Shl<C> for &'s Session<E> {
    type Output = Result<&'s Session<E>>;
    fn shl(self, clause: C) -> Self::Output {
        self.append(clause)
    }
}

impl<E: SearchEngine> fmt::Display for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state(), f)
    }
}

impl<E: SearchEngine> fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Session")
            .field("state", &inner.state)
            .field("num_vars", &inner.engine.num_vars())
            .field("num_clauses", &inner.clause_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn display_names_every_state() {
        let names = [
            ResultState::Unsolved,
            ResultState::Satisfied,
            ResultState::Unsat,
            ResultState::UnsatUnderAssumptions,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "not solved yet",
                "satisfied",
                "unsatisfiable",
                "unsatisfiable under assumptions"
            ]
        );
    }

    #[test]
    fn new_var_reopens_the_session() {
        let s = Session::new();
        let v = s.new_var().unwrap();
        s.solve().unwrap();
        assert_eq!(s.state(), ResultState::Satisfied);
        assert!(s.value_of(v).is_ok());

        s.new_var().unwrap();
        assert_eq!(s.state(), ResultState::Unsolved);
        assert_eq!(s.value_of(v), Err(Error::State(StateError::NotSolved)));
    }

    #[test]
    fn simplify_reports_contradiction() {
        let s = Session::new();
        let v = s.new_var().unwrap();
        s.add_clause([v]).unwrap();
        assert!(s.simplify());
        assert_eq!(s.state(), ResultState::Unsolved);

        s.add_clause([-v]).unwrap();
        assert_eq!(s.state(), ResultState::Unsat);
        assert!(!s.simplify());
        assert_eq!(s.state(), ResultState::Unsat);
    }

    /// Claims every search succeeds but never has a model.
    #[derive(Default)]
    struct NoModel {
        vars: u32,
    }

    impl SearchEngine for NoModel {
        fn new_var(&mut self) -> sattrait::VarIndex {
            self.vars += 1;
            self.vars - 1
        }
        fn add_clause(&mut self, lits: &[LitCode]) -> bool {
            !lits.is_empty()
        }
        fn solve(&mut self, _: &[LitCode]) -> bool {
            true
        }
        fn simplify(&mut self) -> bool {
            true
        }
        fn value(&self, _: sattrait::VarIndex) -> Option<bool> {
            None
        }
        fn num_vars(&self) -> usize {
            self.vars as usize
        }
    }

    #[test]
    fn engine_without_model() {
        let s = Session::with_engine(NoModel::default());
        let v = s.new_var().unwrap();
        assert_eq!(s.solve(), Ok(true));
        assert_eq!(s.value_of(v), Err(Error::State(StateError::NotSolved)));

        s.add_clause(std::iter::empty::<Variable<NoModel>>()).unwrap();
        assert_eq!(s.state(), ResultState::Unsat);
        assert_eq!(s.num_clauses(), 0);
    }

    #[test]
    fn debug_shows_counts() {
        let s = Session::new();
        let a = s.new_var().unwrap();
        s.add_clause([a]).unwrap();
        assert_eq!(
            format!("{:?}", s),
            "Session { state: Unsolved, num_vars: 1, num_clauses: 1 }"
        );
        assert_eq!(format!("{:?}", -a), "Literal(-0)");
    }
}
