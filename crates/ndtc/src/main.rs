//! ndt CLI
//!
//! Inspect and index dtypes written in dtype notation.

use ndtc::commands::{run, CliError};

fn main() {
    ndtc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(output) => print!("{output}"),
        Err(CliError::Usage(message)) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
