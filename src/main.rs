use clap::{App, Arg};
use std::fs::File;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tinysat::formula::dimacs::{parse, write_solution, DimacsParseError};
use tinysat::{backtrack, dpll, Formula};

fn main() {
    env_logger::init();

    let matches = App::new("tinysat")
        .about("decides satisfiability of a CNF formula with and without unit propagation")
        .arg(Arg::with_name("INPUT").help("input file (in DIMACS CNF)").index(1))
        .get_matches();

    let path = match matches.value_of("INPUT") {
        Some(path) => path,
        None => {
            eprintln!("{}", matches.usage());
            std::process::exit(2);
        }
    };

    let formula = match parse_from_file(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            std::process::exit(2);
        }
    };

    let stdout = io::stdout();
    if let Err(e) = run(&formula, &mut stdout.lock()) {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}

// Each strategy gets its own instance; assignments are not guaranteed to be
// reset between runs that share one.
fn run<W: Write>(formula: &Formula, out: &mut W) -> io::Result<()> {
    let mut f1 = formula.clone();
    let (r1, t1) = timed(|| backtrack(&mut f1));

    let mut f2 = formula.clone();
    let (r2, t2) = timed(|| dpll(&mut f2));

    write_solution(out, r1.as_ref())?;
    write_solution(out, r2.as_ref())?;

    writeln!(out)?;
    writeln!(out, "backtrack time:\t{:.6}s", t1.as_secs_f64())?;
    writeln!(out, "dpll time:\t{:.6}s", t2.as_secs_f64())?;
    Ok(())
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn parse_from_file(path: &str) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}
