use anyhow::{Context, anyhow};
use log::debug;

use lock_fixture::options::{Options, informational};
use lock_fixture::{FixtureConfig, NoDelay, SleepDelay, StdoutSink, run};

fn main() {
    if std::env::var("FIXTURE_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("FIXTURE_LOG")
            .write_style("FIXTURE_LOG_STYLE");
        env_logger::init_from_env(e);
    }

    if let Err(err) = run_fixture() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run_fixture() -> anyhow::Result<()> {
    // Process arguments are deliberately ignored.
    let flags = std::env::var("FIXTURE_FLAGS").unwrap_or_default();
    let options = match Options::parse_from_str(&flags) {
        Ok(options) => options,
        Err(err) => {
            if let Some(info) = informational(&*err) {
                info.print()?;
                return Ok(());
            }
            return Err(anyhow!("invalid FIXTURE_FLAGS: {err}"));
        }
    };
    debug!("options from environment: {:?}", options);

    let config_path = options
        .config
        .clone()
        .or_else(|| std::env::var("FIXTURE_CONFIG").ok());
    let mut config = match config_path {
        Some(path) => FixtureConfig::load_from_file(&path)?,
        None => FixtureConfig::default(),
    };
    config.apply_options(&options);
    debug!("fixture config: {:?}", config);

    println!("Starting sample program...");

    let sink = StdoutSink;
    let report = if options.no_delay {
        run(&config, &NoDelay, &sink)?
    } else {
        run(&config, &SleepDelay::from(&config), &sink)?
    };

    print!("{report}");
    if let Some(output) = &options.output {
        report
            .write_json(output)
            .with_context(|| format!("Failed to write report to {output}"))?;
    }

    println!("Program completed successfully");
    Ok(())
}
