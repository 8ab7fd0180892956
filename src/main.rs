//! tally binary: evaluates the expression given on the command line.

use clap::{crate_version, App, AppSettings, Arg};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("tally")
        .version(crate_version!())
        .about("Evaluate an arithmetic expression")
        .setting(AppSettings::AllowLeadingHyphen)
        .setting(AppSettings::ArgRequiredElseHelp)
        .after_help(
            "EXAMPLES:\n    tally '1+ 2 - (1-4)*3'\n    tally debug '1+ 2 - (1-4)*3'",
        )
        .arg(
            Arg::with_name("EXPRESSION")
                .help("The expression, prefixed with `debug` to print its tree instead")
                .multiple(true)
                .required(true),
        )
        .get_matches();

    let mut words: Vec<&str> = matches
        .values_of("EXPRESSION")
        .map(Iterator::collect)
        .unwrap_or_default();

    let debug_mode = words.first() == Some(&"debug");
    if debug_mode {
        words.remove(0);
    }
    let input = words.concat();
    tracing::debug!(%input, debug_mode, "read expression");

    let result = if debug_mode {
        tally::compile(&input)
    } else {
        tally::run(&input).map(|value| value.to_string())
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprint!("{}", err.report(&input));
            process::exit(1);
        }
    }
}
