//! Parsing Options.
//! Read from the `FIXTURE_FLAGS` environment variable; process arguments are ignored.

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command, value_parser};
use std::error::Error;

fn make_options_parser() -> clap::Command {
    Command::new("lock-fixture")
        .no_binary_name(true)
        .version("v0.1.0")
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Total number of worker threads, the last one touches the array")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("iterations")
                .short('i')
                .long("iterations")
                .help("Iterations per counter worker")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("no-delay")
                .long("no-delay")
                .help("Skip all artificial sleeps")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path to file where the run report will be stored as JSON"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML file with the fixture workload"),
        )
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    pub threads: Option<usize>,
    pub iterations: Option<usize>,
    pub no_delay: bool,
    pub output: Option<String>,
    pub config: Option<String>,
}

impl Options {
    pub fn parse_from_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let flags = shellwords::split(s)?;
        Self::parse_from_args(&flags)
    }

    pub fn parse_from_args(flags: &[String]) -> Result<Self, Box<dyn Error>> {
        let app = make_options_parser();
        let matches = app.try_get_matches_from(flags.iter())?;
        Ok(Options {
            threads: matches.get_one::<usize>("threads").copied(),
            iterations: matches.get_one::<usize>("iterations").copied(),
            no_delay: matches.get_flag("no-delay"),
            output: matches.get_one::<String>("output").cloned(),
            config: matches.get_one::<String>("config").cloned(),
        })
    }
}

/// `--help` and `--version` surface as clap errors but are not failures.
pub fn informational<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a clap::Error> {
    err.downcast_ref::<clap::Error>()
        .filter(|e| matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion))
}
