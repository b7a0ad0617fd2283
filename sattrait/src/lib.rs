//! The contract between a solving session and the search engine it drives.

/// Index of a variable inside an engine. Engines hand them out in order, starting at zero.
/// Indices above `i32::MAX >> 1` have no `LitCode`.
pub type VarIndex = u32;

/// A literal in the engine's wire encoding: `2 * var + sign`, where `sign` is
/// set for the negated literal.
pub type LitCode = i32;

/// A SAT search engine with an incrementally growing clause database.
///
/// Clauses added to the engine are permanent. Assumptions passed to `solve`
/// only hold for that call.
pub trait SearchEngine {
    fn new_var(&mut self) -> VarIndex;

    /// Add a clause at the top level. Returns `false` if the clause database
    /// is now known to be contradictory. Once that happens, it stays so.
    fn add_clause(&mut self, lits: &[LitCode]) -> bool;

    /// Search for a model of the clause database extended with the given
    /// unit assumptions.
    fn solve(&mut self, assumptions: &[LitCode]) -> bool;

    /// Top-level simplification. Returns `false` if the clause database is
    /// contradictory, independently of any assumptions.
    fn simplify(&mut self) -> bool;

    /// Value of a variable in the model found by the last successful `solve`.
    fn value(&self, var: VarIndex) -> Option<bool>;

    fn num_vars(&self) -> usize;
}

impl<S: SearchEngine + ?Sized> SearchEngine for Box<S> {
    fn new_var(&mut self) -> VarIndex {
        (**self).new_var()
    }
    fn add_clause(&mut self, lits: &[LitCode]) -> bool {
        (**self).add_clause(lits)
    }
    fn solve(&mut self, assumptions: &[LitCode]) -> bool {
        (**self).solve(assumptions)
    }
    fn simplify(&mut self) -> bool {
        (**self).simplify()
    }
    fn value(&self, var: VarIndex) -> Option<bool> {
        (**self).value(var)
    }
    fn num_vars(&self) -> usize {
        (**self).num_vars()
    }
}
