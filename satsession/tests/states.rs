use satsession::*;

fn session() -> Session {
    let mut params = SolverParams::default();
    params.verbosity = 0;
    Session::with_params(params)
}

const NOT_SOLVED: Error = Error::State(StateError::NotSolved);
const UNSAT: Error = Error::State(StateError::Unsatisfiable);
const UNSAT_ASSUMING: Error = Error::State(StateError::UnsatisfiableUnderAssumptions);

#[test]
fn exclusive_or() {
    let s = session();
    let v1 = s.new_var().unwrap();
    let v2 = s.new_var().unwrap();
    s.add_clause([v1, v2]).unwrap();
    s.add_clause([-v1, -v2]).unwrap();
    assert_eq!(s.solve(), Ok(true));
    assert_ne!(s.value_of(v1).unwrap(), s.value_of(v2).unwrap());
}

#[test]
fn early_unsat_is_terminal() {
    let s = session();
    let v1 = s.new_var().unwrap();
    s.add_clause([v1]).unwrap();
    assert_eq!(s.state(), ResultState::Unsolved);
    s.add_clause([-v1]).unwrap();
    assert_eq!(s.state(), ResultState::Unsat);
    assert_eq!(s.num_clauses(), 1);

    assert_eq!(s.new_var().map(|v| v.index()), Err(UNSAT));
    assert_eq!(s.add_clause([v1]).map(|_| ()), Err(UNSAT));
    assert_eq!((&s << v1).map(|_| ()), Err(UNSAT));
    assert_eq!(s.solve(), Err(UNSAT));
    assert_eq!(s.solve_with([v1]), Err(UNSAT));
    assert_eq!(s.value_of(v1), Err(UNSAT));
    assert!(!s.simplify());

    assert_eq!(s.state(), ResultState::Unsat);
    assert_eq!(s.num_clauses(), 1);
    assert_eq!(s.num_vars(), 1);
    assert_eq!(s.to_string(), "unsatisfiable");
}

#[test]
fn unsat_after_search_is_terminal() {
    let s = session();
    let a = s.new_var().unwrap();
    let b = s.new_var().unwrap();
    for clause in [[a.positive(), b.positive()], [a.positive(), -b], [-a, b.positive()], [-a, -b]] {
        s.add_clause(clause).unwrap();
    }
    assert_eq!(s.state(), ResultState::Unsolved);
    assert_eq!(s.solve(), Ok(false));
    assert_eq!(s.state(), ResultState::Unsat);
    assert_eq!(s.value_of(a), Err(UNSAT));
    assert_eq!(s.new_var().map(|_| ()), Err(UNSAT));
    assert_eq!(s.solve(), Err(UNSAT));
}

#[test]
fn unsat_under_assumptions_is_recoverable() {
    let s = session();
    let v1 = s.new_var().unwrap();
    s.add_clause([v1]).unwrap();
    assert_eq!(s.solve_with([-v1]), Ok(false));
    assert_eq!(s.state(), ResultState::UnsatUnderAssumptions);
    assert_eq!(s.value_of(v1), Err(UNSAT_ASSUMING));
    assert_eq!(s.to_string(), "unsatisfiable under assumptions");

    assert_eq!(s.solve(), Ok(true));
    assert_eq!(s.state(), ResultState::Satisfied);
    assert_eq!(s.value_of(v1), Ok(true));
}

#[test]
fn mutation_after_failed_assumptions_reopens_the_session() {
    let s = session();
    let a = s.new_var().unwrap();
    s.add_clause([a]).unwrap();
    assert_eq!(s.solve_with([-a]), Ok(false));
    assert_eq!(s.state(), ResultState::UnsatUnderAssumptions);

    let b = s.new_var().unwrap();
    assert_eq!(b.index(), 1);
    assert_eq!(s.state(), ResultState::Unsolved);

    assert_eq!(s.solve_with([-a]), Ok(false));
    assert_eq!(s.state(), ResultState::UnsatUnderAssumptions);
    s.add_clause([-a, b.positive()]).unwrap();
    assert_eq!(s.state(), ResultState::Unsolved);
    assert_eq!(s.num_clauses(), 2);

    assert_eq!(s.solve(), Ok(true));
    assert_eq!(s.value_of(b), Ok(true));
}

/// Four clauses over `a` and `b` that only a search refutes.
fn hidden_contradiction(s: &Session) -> Variable<'_> {
    let a = s.new_var().unwrap();
    let b = s.new_var().unwrap();
    let c = s.new_var().unwrap();
    for clause in [[a.positive(), b.positive()], [a.positive(), -b], [-a, b.positive()], [-a, -b]] {
        s.add_clause(clause).unwrap();
    }
    assert_eq!(s.state(), ResultState::Unsolved);
    assert_eq!(s.solve_with([c]), Ok(false));
    assert_eq!(s.state(), ResultState::UnsatUnderAssumptions);
    c
}

#[test]
fn simplify_exposes_contradiction_found_under_assumptions() {
    let s = session();
    let c = hidden_contradiction(&s);

    assert!(!s.simplify());
    assert_eq!(s.state(), ResultState::Unsat);
    assert_eq!(s.add_clause([c]).map(|_| ()), Err(UNSAT));
    assert_eq!(s.num_clauses(), 4);
}

#[test]
fn clause_after_contradiction_found_under_assumptions_is_not_counted() {
    let s = session();
    let c = hidden_contradiction(&s);

    s.add_clause([c]).unwrap();
    assert_eq!(s.state(), ResultState::Unsat);
    assert_eq!(s.num_clauses(), 4);
    assert_eq!(s.solve(), Err(UNSAT));
}

#[test]
fn empty_assumption_list_counts_as_none() {
    let s = session();
    let a = s.new_var().unwrap();
    let b = s.new_var().unwrap();
    s.add_clause([-a, -b]).unwrap();
    s.add_clause([a.positive(), -b]).unwrap();
    s.add_clause([-a, b.positive()]).unwrap();
    s.add_clause([a, b]).unwrap();
    assert_eq!(s.solve_with(Vec::<Literal>::new()), Ok(false));
    assert_eq!(s.state(), ResultState::Unsat);
}

#[test]
fn model_reads_are_gated() {
    let s = session();
    let v = s.new_var().unwrap();
    assert_eq!(s.value_of(v), Err(NOT_SOLVED));
    assert_eq!(v.value(), Err(NOT_SOLVED));
    assert_eq!(s.to_string(), "not solved yet");

    assert_eq!(s.solve_with([v]), Ok(true));
    assert_eq!(s.value_of(v), Ok(true));
    assert_eq!(s.to_string(), "satisfied");

    // any mutation invalidates the model
    s.add_clause([-v]).unwrap();
    assert_eq!(s.value_of(v), Err(NOT_SOLVED));
    assert_eq!(s.solve(), Ok(true));
    assert_eq!(s.value_of(v), Ok(false));
}

#[test]
fn queries_are_idempotent() {
    let s = session();
    let v = s.new_var().unwrap();
    s.add_clause([v]).unwrap();
    s.solve().unwrap();
    for _ in 0..3 {
        assert!(s.is_solved());
        assert!(s.is_satisfied());
        assert_eq!(s.state(), ResultState::Satisfied);
        assert_eq!(s.value_of(v), Ok(true));
    }
}

#[test]
fn literal_is_not_a_model_key() {
    let s = session();
    let v = s.new_var().unwrap();
    s.solve().unwrap();
    let err = s.value_of(-v).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::WrongKind {
            found: "Literal",
            expected: "Variable"
        })
    );
    assert_eq!(err.to_string(), "wrong argument type Literal (expected Variable)");
    // the wrong kind is reported regardless of state
    let fresh = session();
    let w = fresh.new_var().unwrap();
    assert!(matches!(fresh.value_of(w.negative()), Err(Error::Usage(_))));
}

#[test]
fn handles_of_another_session_are_rejected() {
    let s1 = session();
    let s2 = session();
    let a = s1.new_var().unwrap();
    let b = s2.new_var().unwrap();
    let foreign = Error::Usage(UsageError::ForeignHandle);

    assert_eq!(s1.add_clause([a, b]).map(|_| ()), Err(foreign));
    assert_eq!((&s1 << -b).map(|_| ()), Err(foreign));
    assert_eq!(s1.solve_with([b]), Err(foreign));
    // nothing was recorded
    assert_eq!(s1.num_clauses(), 0);
    assert_eq!(s1.state(), ResultState::Unsolved);

    s1.solve().unwrap();
    s2.solve().unwrap();
    assert_eq!(s1.value_of(b), Err(foreign));
    assert!(s2.value_of(b).is_ok());
    assert_ne!(a, b);
}

#[test]
fn errors_have_distinct_messages() {
    let messages = [
        Error::Usage(UsageError::WrongKind {
            found: "Literal",
            expected: "Variable",
        }),
        Error::Usage(UsageError::ForeignHandle),
        NOT_SOLVED,
        UNSAT,
        UNSAT_ASSUMING,
    ]
    .iter()
    .map(|e| e.to_string())
    .collect::<Vec<_>>();
    for (i, m) in messages.iter().enumerate() {
        assert!(!m.is_empty());
        assert!(messages[i + 1..].iter().all(|other| other != m));
    }
}

#[test]
fn clause_forms() {
    let s = session();
    let vars = (0..4).map(|_| s.new_var().unwrap()).collect::<Vec<_>>();
    s.append(vars[0]).unwrap();
    s.append(-vars[1]).unwrap();
    s.append(Term::from(vars[2])).unwrap();
    s.append(vars.clone()).unwrap();
    s.append(&vars[1..]).unwrap();
    s.append([Term::from(vars[3]), Term::from(-vars[0])]).unwrap();
    // duplicates and both polarities are accepted
    s.append([vars[2], vars[2]]).unwrap();
    s.append([-vars[3], vars[3].positive()]).unwrap();
    assert_eq!(s.num_clauses(), 8);

    assert_eq!(s.solve(), Ok(true));
    assert_eq!(s.value_of(vars[0]), Ok(true));
    assert_eq!(s.value_of(vars[1]), Ok(false));
    assert_eq!(s.value_of(vars[2]), Ok(true));
    assert_eq!(s.value_of(vars[3]), Ok(true));
}

#[test]
fn boxed_engine() {
    let engine: Box<dyn SearchEngine> = Box::new(cdcl::Solver::new());
    let s = Session::with_engine(engine);
    let a = s.new_var().unwrap();
    let b = s.new_var().unwrap();
    (&s << [a, b]).unwrap();
    (&s << -a).unwrap();
    assert_eq!(s.solve(), Ok(true));
    assert_eq!(b.value(), Ok(true));
    assert_eq!(format!("{}", s), "satisfied");
}
