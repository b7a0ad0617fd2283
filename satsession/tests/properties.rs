use quickcheck::{quickcheck, TestResult};
use satsession::*;

fn session() -> Session {
    let mut params = SolverParams::default();
    params.verbosity = 0;
    Session::with_params(params)
}

quickcheck! {
    fn codec_round_trip(var: u32) -> TestResult {
        if var > codec::MAX_VAR {
            return TestResult::discard();
        }
        let pos = codec::positive(var);
        let neg = codec::negative(var);
        TestResult::from_bool(
            codec::decode(pos) == (var, false) && codec::decode(neg) == (var, true) && pos != neg,
        )
    }

    fn variable_ids_are_consecutive(n: u8) -> bool {
        let s = session();
        let ids = (0..n).map(|_| s.new_var().unwrap().index()).collect::<Vec<_>>();
        ids == (0..n as u32).collect::<Vec<_>>() && s.num_vars() == n as usize
    }

    fn clause_count_skips_the_contradicting_clause(clauses: Vec<Vec<(u8, bool)>>) -> bool {
        let s = session();
        let vars = (0..6).map(|_| s.new_var().unwrap()).collect::<Vec<_>>();
        let mut accepted = 0;
        for clause in clauses.iter() {
            let lits = clause
                .iter()
                .map(|&(v, neg)| {
                    let var = vars[v as usize % vars.len()];
                    if neg { -var } else { var.positive() }
                })
                .collect::<Vec<_>>();
            match s.add_clause(lits) {
                Ok(_) if s.state() == ResultState::Unsat => break,
                Ok(_) => accepted += 1,
                Err(_) => return false,
            }
        }
        s.num_clauses() == accepted
    }

    fn literal_handles_decode_to_their_variable(n: u8, negate: Vec<bool>) -> bool {
        let s = session();
        let vars = (0..=n).map(|_| s.new_var().unwrap()).collect::<Vec<_>>();
        vars.iter().zip(negate.iter()).all(|(v, &neg)| {
            let lit = if neg { v.negative() } else { v.positive() };
            lit.variable() == *v && lit.is_negative() == neg && (-lit).is_negative() != neg
        })
    }

    fn status_queries_do_not_change_state(units: Vec<bool>) -> bool {
        let s = session();
        let v = s.new_var().unwrap();
        for &u in units.iter() {
            if s.add_clause([if u { v.positive() } else { -v }]).is_err() {
                break;
            }
        }
        let _ = s.solve();
        let before = (s.state(), s.is_solved(), s.is_satisfied());
        (0..3).all(|_| (s.state(), s.is_solved(), s.is_satisfied()) == before)
    }
}

#[test]
fn models_satisfy_random_formulas() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..30 {
        let s = session();
        let vars = (0..30).map(|_| s.new_var().unwrap()).collect::<Vec<_>>();
        let clauses = (0..120)
            .map(|_| {
                (0..3)
                    .map(|_| {
                        let var = vars[rng.gen_range(0, vars.len())];
                        if rng.gen::<bool>() { -var } else { var.positive() }
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        for c in clauses.iter() {
            if s.state() == ResultState::Unsat {
                break;
            }
            s.add_clause(c.iter().copied()).unwrap();
        }
        if s.state() == ResultState::Unsat {
            continue;
        }
        if s.solve().unwrap() {
            for c in clauses.iter() {
                assert!(c
                    .iter()
                    .any(|l| s.value_of(l.variable()).unwrap() != l.is_negative()));
            }
        } else {
            assert!(s.value_of(vars[0]).is_err());
        }
    }
}
