pub mod dimacs;

use std::fmt::{self, Display, Formatter};

/// A 1-based, densely numbered variable index, as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Debug)]
pub struct Variable(pub usize);

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current value of a variable. `Unassigned` is distinct from `False`;
/// the satisfaction predicates below depend on keeping the three states apart.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assignment {
    True,
    False,
    Unassigned,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "{}", x),
            Literal::Negative(Variable(x)) => write!(f, "-{}", x),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn unit_literal(&self) -> Option<&Literal> {
        if self.literals.len() == 1 {
            self.literals.first()
        } else {
            None
        }
    }
}

/// A CNF formula: an owned assignment per variable plus the clause list.
/// Literals refer to variables by index, so all mutable state lives in one
/// place and undoing a trial assignment is a single slot write.
#[derive(Clone, Debug)]
pub struct Formula {
    // Slot 0 is unused so 1-based variable indices map directly.
    assignments: Vec<Assignment>,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_variables: usize, conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        debug_assert!(clauses
            .iter()
            .flat_map(|c| c.literals())
            .all(|l| l.idx() >= 1 && l.idx() <= num_variables));
        Self {
            assignments: vec![Assignment::Unassigned; num_variables + 1],
            clauses,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.assignments.len() - 1
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (1..=self.num_variables()).map(Variable)
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub(crate) fn clause(&self, idx: usize) -> &Clause {
        &self.clauses[idx]
    }

    /// Drops the clauses at the given (ascending) indices from the working
    /// clause sequence. Used by unit propagation to discharge unit clauses.
    pub(crate) fn remove_clauses(&mut self, indices: &[usize]) {
        let mut pending = indices.iter().peekable();
        let mut idx = 0;
        self.clauses.retain(|_| {
            let drop = pending.peek() == Some(&&idx);
            if drop {
                pending.next();
            }
            idx += 1;
            !drop
        });
    }

    pub fn assignment(&self, v: Variable) -> Assignment {
        self.assignments[v.0]
    }

    pub fn assign(&mut self, v: Variable, value: bool) {
        self.assignments[v.0] = if value { Assignment::True } else { Assignment::False };
    }

    pub fn unassign(&mut self, v: Variable) {
        self.assignments[v.0] = Assignment::Unassigned;
    }

    /// The lowest-numbered unassigned variable. The fixed index order is the
    /// search's tie-break, so results are reproducible across runs.
    pub fn first_unassigned(&self) -> Option<Variable> {
        self.assignments
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, a)| **a == Assignment::Unassigned)
            .map(|(i, _)| Variable(i))
    }

    pub fn literal_value(&self, literal: &Literal) -> Assignment {
        match self.assignments[literal.idx()] {
            Assignment::True => {
                if literal.is_positive() {
                    Assignment::True
                } else {
                    Assignment::False
                }
            }
            Assignment::False => {
                if literal.is_positive() {
                    Assignment::False
                } else {
                    Assignment::True
                }
            }
            Assignment::Unassigned => Assignment::Unassigned,
        }
    }

    fn clause_sat(&self, clause: &Clause) -> bool {
        clause
            .literals()
            .any(|l| self.literal_value(l) == Assignment::True)
    }

    // A clause counts as falsified only once every literal is assigned and
    // contrary to its polarity. A clause with an unassigned literal is still
    // pending, never unsat.
    fn clause_unsat(&self, clause: &Clause) -> bool {
        clause
            .literals()
            .all(|l| self.literal_value(l) == Assignment::False)
    }

    /// True iff every clause is satisfied under the current assignment.
    pub fn sat(&self) -> bool {
        self.clauses.iter().all(|c| self.clause_sat(c))
    }

    /// True iff some clause is falsified under the current assignment.
    pub fn unsat(&self) -> bool {
        self.clauses.iter().any(|c| self.clause_unsat(c))
    }

    /// Snapshot of a complete assignment; `None` while any variable is
    /// still unassigned.
    pub fn model(&self) -> Option<Model> {
        let mut values = Vec::with_capacity(self.assignments.len());
        values.push(false); // slot 0, unused
        for assignment in &self.assignments[1..] {
            match assignment {
                Assignment::True => values.push(true),
                Assignment::False => values.push(false),
                Assignment::Unassigned => return None,
            }
        }
        Some(Model { values })
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_variables(), self.clauses.len())?;
        for clause in &self.clauses {
            for literal in clause.literals() {
                write!(f, "{} ", literal)?;
            }
            writeln!(f, "0")?;
        }
        Ok(())
    }
}

/// A complete satisfying assignment, detached from the formula it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Model {
    // Slot 0 unused, mirroring Formula's assignment vector.
    values: Vec<bool>,
}

impl Model {
    pub fn num_variables(&self) -> usize {
        self.values.len() - 1
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (1..=self.num_variables()).map(Variable)
    }

    pub fn value(&self, v: Variable) -> bool {
        self.values[v.0]
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn formula_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1usize..=6).prop_flat_map(|num_vars| {
        let literal = (1..=num_vars, any::<bool>()).prop_map(|(v, positive)| {
            if positive {
                Literal::Positive(Variable(v))
            } else {
                Literal::Negative(Variable(v))
            }
        });
        let clause = proptest::collection::vec(literal, 1..=3).prop_map(Clause::new);
        proptest::collection::vec(clause, 0..=10)
            .prop_map(move |clauses| Formula::new(num_vars, clauses))
    })
}
