use crate::formula::{Clause, Formula, Literal, Model, Variable};
use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, BufReader, Read, Write};

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut header = None;
    let mut clauses = vec![];

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = tokens.next();

                if tokens.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf' in header".into()));
                }

                let num_variables = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid variable count".into()))?;

                let num_clauses = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid clause count".into()))?;

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                let (num_variables, num_clauses) = header
                    .ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

                let mut literals = vec![];
                let mut terminated = false;
                for token in tokens {
                    if terminated {
                        return Err(DimacsParseError::Format(
                            "literal after clause terminator".into(),
                        ));
                    }
                    match parse_literal(token, num_variables)? {
                        Some(l) => literals.push(l),
                        None => terminated = true,
                    }
                }
                if !terminated {
                    return Err(DimacsParseError::Format("clause not terminated by 0".into()));
                }
                clauses.push(Clause::new(literals));

                if clauses.len() >= num_clauses {
                    break;
                }
            }
        }
    }

    let (num_variables, _) =
        header.ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;
    Ok(Formula::new(num_variables, clauses))
}

// A literal token is a signed nonzero integer; 0 is the clause terminator.
fn parse_literal(s: &str, num_variables: usize) -> Result<Option<Literal>, DimacsParseError> {
    let value = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    if value == 0 {
        return Ok(None);
    }
    let index = value.unsigned_abs();
    if index > num_variables {
        return Err(DimacsParseError::Format(format!(
            "variable {} out of range 1..={}",
            index, num_variables
        )));
    }
    if value > 0 {
        Ok(Some(Literal::Positive(Variable(index))))
    } else {
        Ok(Some(Literal::Negative(Variable(index))))
    }
}

/// Renders a search outcome in DIMACS solution format: an `s` status line,
/// plus a `v` line of signed variable indices on success.
pub fn write_solution<W: Write>(w: &mut W, model: Option<&Model>) -> io::Result<()> {
    match model {
        None => writeln!(w, "s UNSATISFIABLE"),
        Some(model) => {
            writeln!(w, "s SATISFIABLE")?;
            write!(w, "v")?;
            for v in model.variables() {
                if model.value(v) {
                    write!(w, " {}", v)?;
                } else {
                    write!(w, " -{}", v)?;
                }
            }
            writeln!(w, " 0")
        }
    }
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "io error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "format error: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {}
