use crate::backtrack::backtrack;
use crate::formula::{Assignment, Formula, Model, Variable};
use log::{debug, trace};

/// Backtracking search with a one-shot unit-propagation pre-pass: a single
/// scan of the clause list (not iterated to a fixed point) commits every
/// variable forced by a unit clause and discharges those clauses from the
/// working sequence before delegating to [`backtrack`].
pub fn dpll(f: &mut Formula) -> Option<Model> {
    let mut forced: Vec<Variable> = vec![];
    let mut discharged: Vec<usize> = vec![];

    for idx in 0..f.clause_count() {
        let literal = match f.clause(idx).unit_literal() {
            Some(l) => l.clone(),
            None => continue,
        };

        match f.literal_value(&literal) {
            // An earlier unit clause pinned this variable to the opposite
            // value; the formula cannot be satisfied.
            Assignment::False => {
                trace!("unit conflict on {}", literal.variable());
                undo(f, &forced);
                return None;
            }
            // Already forced to the required value by a duplicate unit.
            Assignment::True => {}
            Assignment::Unassigned => {
                trace!("unit clause forces {}", literal);
                f.assign(*literal.variable(), literal.is_positive());
                forced.push(*literal.variable());
            }
        }
        discharged.push(idx);
    }

    debug!(
        "unit propagation forced {} variables, discharged {} clauses",
        forced.len(),
        discharged.len()
    );
    f.remove_clauses(&discharged);

    match backtrack(f) {
        Some(model) => Some(model),
        None => {
            undo(f, &forced);
            None
        }
    }
}

// The delegated search restores its own trial assignments on failure; the
// pre-pass is responsible for the variables it forced.
fn undo(f: &mut Formula, forced: &[Variable]) {
    for &v in forced {
        f.unassign(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Clause};
    use crate::formula::dimacs::parse;
    use test_env_log::test;

    #[test]
    fn single_positive_unit() {
        let mut f = Formula::new(1, vec![Clause::new(vec![p(1)])]);
        let model = dpll(&mut f).expect("satisfiable");
        assert!(model.value(Variable(1)));
        // The unit clause was discharged before the search ran.
        assert_eq!(f.clause_count(), 0);
    }

    #[test]
    fn contradictory_units_unsat() {
        let mut f = Formula::new(1, vec![Clause::new(vec![p(1)]), Clause::new(vec![n(1)])]);
        assert!(dpll(&mut f).is_none());
        assert_eq!(f.assignment(Variable(1)), Assignment::Unassigned);
    }

    #[test]
    fn conflict_detected_in_pre_pass() {
        // The conflicting units are decided before any branching; the other
        // clause never constrains anything because the search is not reached.
        let mut f = Formula::new(
            3,
            vec![
                Clause::new(vec![p(1)]),
                Clause::new(vec![n(1)]),
                Clause::new(vec![p(2), p(3)]),
            ],
        );
        assert!(dpll(&mut f).is_none());
        // The pre-pass bailed out before discharging anything.
        assert_eq!(f.clause_count(), 3);
        for v in f.variables() {
            assert_eq!(f.assignment(v), Assignment::Unassigned);
        }
    }

    #[test]
    fn forced_value_respected_by_search() {
        // {1} forces 1 = true, so (-1 | 2) can only be satisfied by 2 = true.
        let mut f = Formula::new(
            2,
            vec![Clause::new(vec![p(1)]), Clause::new(vec![n(1), p(2)])],
        );
        let model = dpll(&mut f).expect("satisfiable");
        assert!(model.value(Variable(1)));
        assert!(model.value(Variable(2)));
        assert_eq!(f.clause_count(), 1);
    }

    #[test]
    fn duplicate_units_both_discharged() {
        let mut f = Formula::new(1, vec![Clause::new(vec![p(1)]), Clause::new(vec![p(1)])]);
        let model = dpll(&mut f).expect("satisfiable");
        assert!(model.value(Variable(1)));
        assert_eq!(f.clause_count(), 0);
    }

    #[test]
    fn negative_unit_forces_false() {
        let mut f = Formula::new(2, vec![Clause::new(vec![n(2)]), Clause::new(vec![p(1), p(2)])]);
        let model = dpll(&mut f).expect("satisfiable");
        assert!(!model.value(Variable(2)));
        assert!(model.value(Variable(1)));
    }

    #[test]
    fn single_pass_does_not_chase_new_units() {
        // Nothing here is unit, so the pre-pass must leave the clause list
        // untouched even though branching will create unit-like situations.
        let mut f = Formula::new(
            2,
            vec![Clause::new(vec![p(1), p(2)]), Clause::new(vec![n(1), n(2)])],
        );
        let model = dpll(&mut f).expect("satisfiable");
        assert_eq!(f.clause_count(), 2);
        assert!(model.value(Variable(1)));
        assert!(!model.value(Variable(2)));
    }

    #[test]
    fn exhaustion_after_forcing_leaves_no_assignments_behind() {
        // {1} forces 1 = true; the remaining clauses demand 2 and !2, so the
        // delegated search exhausts. The forced assignment must be undone too.
        let cnf = "p cnf 2 3
1 0
-1 2 0
-1 -2 0
";
        let mut f = parse(cnf.as_bytes()).expect("failed to parse");
        assert!(dpll(&mut f).is_none());
        for v in f.variables() {
            assert_eq!(f.assignment(v), Assignment::Unassigned);
        }
    }

    #[test]
    fn scenarios_agree_with_backtrack() {
        let scenarios = &[
            ("p cnf 1 1\n1 0\n", true),
            ("p cnf 1 2\n1 0\n-1 0\n", false),
            ("p cnf 3 1\n1 2 3 0\n", true),
            ("p cnf 2 2\n1 2 0\n-1 -2 0\n", true),
        ];
        for (cnf, satisfiable) in scenarios {
            let f = parse(cnf.as_bytes()).expect("failed to parse");
            let r1 = crate::backtrack(&mut f.clone());
            let r2 = dpll(&mut f.clone());
            assert_eq!(r1.is_some(), *satisfiable, "{}", cnf);
            assert_eq!(r2.is_some(), *satisfiable, "{}", cnf);
        }
    }
}
