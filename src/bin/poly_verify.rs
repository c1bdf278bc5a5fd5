use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use polyarith::math::polynomial::verify::{self, CaseOutcome, VerifyConfig};

const DEFAULT_FIXTURE: &str = "Polynomials.dat";

fn parse_args() -> Result<(String, VerifyConfig), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_FIXTURE.to_string());

    let mut config = VerifyConfig::default();
    if let Some(cases) = args.next() {
        let cases: usize = cases
            .parse()
            .map_err(|e| polyarith::Error::invalid_input(format!("bad case count {:?}: {}", cases, e)))?;
        config = config.with_num_test_cases(cases);
    }

    Ok((path, config))
}

fn run() -> Result<usize, Box<dyn Error>> {
    let (path, config) = parse_args()?;
    let file = File::open(&path).map_err(|e| format!("could not open {}: {}", path, e))?;

    let report = verify::run(BufReader::new(file), &config)?;

    for case in &report.cases {
        for (label, p) in [("dividend", &case.dividend), (" divisor", &case.divisor)] {
            match p {
                Some(p) => println!("{}:  {}", label, p),
                None => println!("{}:  <unreadable>", label),
            }
        }
        match &case.outcome {
            CaseOutcome::DivisionFailed(reason) => println!("division failed: {}", reason),
            CaseOutcome::InvalidRecord(reason) => println!("invalid record: {}", reason),
            outcome => {
                if let Some(quotient) = outcome.quotient() {
                    println!("quotient:  {}", quotient);
                }
            }
        }
        println!();
    }

    println!("There are {} errors!", report.errors);
    Ok(report.errors)
}

fn main() -> ExitCode {
    match run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}
