mod backtrack;
mod dpll;
pub mod formula;

pub use backtrack::backtrack;
pub use dpll::dpll;
pub use formula::{Assignment, Clause, Formula, Literal, Model, Variable};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::formula_strategy;
    use proptest::prelude::*;

    fn satisfies(f: &Formula, model: &Model) -> bool {
        f.clauses()
            .all(|clause| clause.literals().any(|l| model.value(*l.variable()) == l.is_positive()))
    }

    fn all_unassigned(f: &Formula) -> bool {
        f.variables().all(|v| f.assignment(v) == Assignment::Unassigned)
    }

    proptest! {
        // The two strategies explore different trees but decide the same
        // language: they must agree on satisfiability for every formula.
        #[test]
        fn backtrack_and_dpll_agree(f in formula_strategy()) {
            let r1 = backtrack(&mut f.clone());
            let r2 = dpll(&mut f.clone());
            prop_assert_eq!(r1.is_some(), r2.is_some());
        }

        #[test]
        fn models_satisfy_the_original_formula(f in formula_strategy()) {
            if let Some(model) = backtrack(&mut f.clone()) {
                prop_assert!(satisfies(&f, &model));
            }
            // Check dpll's model against the original clause list, not the
            // trimmed one its pre-pass leaves behind.
            if let Some(model) = dpll(&mut f.clone()) {
                prop_assert!(satisfies(&f, &model));
            }
        }

        #[test]
        fn unsat_outcomes_leak_no_state(f in formula_strategy()) {
            let mut f1 = f.clone();
            if backtrack(&mut f1).is_none() {
                prop_assert!(all_unassigned(&f1));
            }
            let mut f2 = f.clone();
            if dpll(&mut f2).is_none() {
                prop_assert!(all_unassigned(&f2));
            }
        }

        // Same input, same answer: the fixed variable order and value order
        // make both searches deterministic.
        #[test]
        fn repeated_runs_are_deterministic(f in formula_strategy()) {
            let first = backtrack(&mut f.clone());
            let second = backtrack(&mut f.clone());
            prop_assert_eq!(first, second);

            let first = dpll(&mut f.clone());
            let second = dpll(&mut f.clone());
            prop_assert_eq!(first, second);
        }
    }
}
