use crate::codec;
use crate::error::Result;
use crate::session::Session;
use cdcl::Solver;
use sattrait::{LitCode, SearchEngine, VarIndex};
use smallvec::SmallVec;
use std::fmt;

/// A variable of a `Session`, created by `Session::new_var`.
pub struct Variable<'s, E: SearchEngine = Solver> {
    session: &'s Session<E>,
    index: VarIndex,
}

/// A variable asserted true (positive) or false (negative).
pub struct Literal<'s, E: SearchEngine = Solver> {
    session: &'s Session<E>,
    code: LitCode,
}

/// Anything that can appear in a clause or an assumption list. A variable
/// stands for its positive literal.
pub enum Term<'s, E: SearchEngine = Solver> {
    Variable(Variable<'s, E>),
    Literal(Literal<'s, E>),
}

impl<'s, E: SearchEngine> Variable<'s, E> {
    pub(crate) fn new(session: &'s Session<E>, index: VarIndex) -> Self {
        Variable { session, index }
    }

    pub fn index(&self) -> VarIndex {
        self.index
    }

    pub fn session(&self) -> &'s Session<E> {
        self.session
    }

    pub fn positive(&self) -> Literal<'s, E> {
        Literal {
            session: self.session,
            code: codec::positive(self.index),
        }
    }

    pub fn negative(&self) -> Literal<'s, E> {
        Literal {
            session: self.session,
            code: codec::negative(self.index),
        }
    }

    /// Value in the current model. Same as `Session::value_of`.
    pub fn value(&self) -> Result<bool> {
        self.session.value_of(*self)
    }
}

impl<'s, E: SearchEngine> Literal<'s, E> {
    pub fn code(&self) -> LitCode {
        self.code
    }

    pub fn session(&self) -> &'s Session<E> {
        self.session
    }

    pub fn variable(&self) -> Variable<'s, E> {
        Variable::new(self.session, codec::decode(self.code).0)
    }

    pub fn is_negative(&self) -> bool {
        codec::decode(self.code).1
    }
}

impl<'s, E: SearchEngine> Term<'s, E> {
    pub fn session(&self) -> &'s Session<E> {
        match self {
            Term::Variable(v) => v.session,
            Term::Literal(l) => l.session,
        }
    }

    /// The literal this term contributes to a clause.
    pub fn code(&self) -> LitCode {
        match self {
            Term::Variable(v) => codec::positive(v.index),
            Term::Literal(l) => l.code,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Term::Variable(_) => "Variable",
            Term::Literal(_) => "Literal",
        }
    }
}

impl<'s, E: SearchEngine> std::ops::Neg for Variable<'s, E> {
    type Output = Literal<'s, E>;
    fn neg(self) -> Literal<'s, E> {
        self.negative()
    }
}

impl<'s, E: SearchEngine> std::ops::Neg for Literal<'s, E> {
    type Output = Literal<'s, E>;
    fn neg(self) -> Literal<'s, E> {
        let (var, negative) = codec::decode(self.code);
        Literal {
            session: self.session,
            code: if negative {
                codec::positive(var)
            } else {
                codec::negative(var)
            },
        }
    }
}

impl<'s, E: SearchEngine> Clone for Variable<'s, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'s, E: SearchEngine> Copy for Variable<'s, E> {}

impl<'s, E: SearchEngine> Clone for Literal<'s, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'s, E: SearchEngine> Copy for Literal<'s, E> {}

impl<'s, E: SearchEngine> Clone for Term<'s, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'s, E: SearchEngine> Copy for Term<'s, E> {}

impl<'s, E: SearchEngine> PartialEq for Variable<'s, E> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.session, other.session) && self.index == other.index
    }
}
impl<'s, E: SearchEngine> Eq for Variable<'s, E> {}

impl<'s, E: SearchEngine> PartialEq for Literal<'s, E> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.session, other.session) && self.code == other.code
    }
}
impl<'s, E: SearchEngine> Eq for Literal<'s, E> {}

impl<'s, E: SearchEngine> fmt::Debug for Variable<'s, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({})", self.index)
    }
}

impl<'s, E: SearchEngine> fmt::Debug for Literal<'s, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (var, negative) = codec::decode(self.code);
        write!(f, "Literal({}{})", if negative { "-" } else { "+" }, var)
    }
}

impl<'s, E: SearchEngine> fmt::Debug for Term<'s, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => fmt::Debug::fmt(v, f),
            Term::Literal(l) => fmt::Debug::fmt(l, f),
        }
    }
}

impl<'s, E: SearchEngine> From<Variable<'s, E>> for Term<'s, E> {
    fn from(v: Variable<'s, E>) -> Self {
        Term::Variable(v)
    }
}

impl<'s, E: SearchEngine> From<Literal<'s, E>> for Term<'s, E> {
    fn from(l: Literal<'s, E>) -> Self {
        Term::Literal(l)
    }
}

/// A disjunction of terms, as accepted by `Session::append` and `<<`.
pub struct Clause<'s, E: SearchEngine = Solver>(SmallVec<[Term<'s, E>; 4]>);

impl<'s, E: SearchEngine> Clause<'s, E> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'s, E: SearchEngine> fmt::Debug for Clause<'s, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'s, E: SearchEngine> IntoIterator for Clause<'s, E> {
    type Item = Term<'s, E>;
    type IntoIter = smallvec::IntoIter<[Term<'s, E>; 4]>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'s, E: SearchEngine, T: Into<Term<'s, E>>> FromIterator<T> for Clause<'s, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Clause(iter.into_iter().map(Into::into).collect())
    }
}

impl<'s, E: SearchEngine> From<Variable<'s, E>> for Clause<'s, E> {
    fn from(v: Variable<'s, E>) -> Self {
        std::iter::once(v).collect()
    }
}

impl<'s, E: SearchEngine> From<Literal<'s, E>> for Clause<'s, E> {
    fn from(l: Literal<'s, E>) -> Self {
        std::iter::once(l).collect()
    }
}

impl<'s, E: SearchEngine> From<Term<'s, E>> for Clause<'s, E> {
    fn from(t: Term<'s, E>) -> Self {
        std::iter::once(t).collect()
    }
}

impl<'s, E: SearchEngine, T: Into<Term<'s, E>>, const N: usize> From<[T; N]> for Clause<'s, E> {
    fn from(terms: [T; N]) -> Self {
        terms.into_iter().collect()
    }
}

impl<'s, E: SearchEngine, T: Into<Term<'s, E>>> From<Vec<T>> for Clause<'s, E> {
    fn from(terms: Vec<T>) -> Self {
        terms.into_iter().collect()
    }
}

impl<'s, 'a, E: SearchEngine, T: Into<Term<'s, E>> + Copy> From<&'a [T]> for Clause<'s, E> {
    fn from(terms: &'a [T]) -> Self {
        terms.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_parts() {
        let s = Session::new();
        let _ = s.new_var().unwrap();
        let v = s.new_var().unwrap();
        assert_eq!(v.positive().code(), 2);
        assert_eq!(v.negative().code(), 3);
        assert_eq!((-v.negative()).code(), 2);
        assert!(std::ptr::eq(v.negative().session(), &s));
        assert_eq!(v.negative().variable(), v);
        assert!(v.negative().is_negative());
        assert!(!v.positive().is_negative());
    }

    #[test]
    fn clause_lengths() {
        let s = Session::new();
        let a = s.new_var().unwrap();
        let b = s.new_var().unwrap();
        assert_eq!(Clause::from(a).len(), 1);
        assert_eq!(Clause::from([a, b, a]).len(), 3);
        assert_eq!(Clause::from(vec![-a]).len(), 1);

        let empty = Clause::from(Vec::<Variable>::new());
        assert!(empty.is_empty());
        assert!(!Clause::from(-b).is_empty());
        assert_eq!(
            format!("{:?}", Clause::from([Term::from(a), Term::from(-b)])),
            "[Variable(0), Literal(-1)]"
        );
    }
}
