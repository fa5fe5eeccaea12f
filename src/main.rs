use clap::Parser;
use pokedex::cli::commands::{execute_command, load_settings};
use pokedex::cli::output;
use pokedex::cli::{Cli, CliResult};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    if let Err(e) = run(&cli) {
        let _ = output::error(&mut std::io::stderr(), &e);
        std::process::exit(e.exit_code());
    }
    std::process::exit(pokedex::exitcode::OK);
}

fn run(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    if !settings.color {
        colored::control::set_override(false);
    }
    execute_command(cli, &settings)
}

fn verbosity_level(count: u8) -> LevelFilter {
    match count {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Stderr logging for this crate only; `RUST_LOG` wins when set.
fn init_tracing(debug: u8) {
    let level = verbosity_level(debug);
    if debug > 3 {
        eprintln!("-ddd is already the most verbose, ignoring the rest");
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,pokedex={}", level)));

    // menu prompts go to stdout, so logs must stay on stderr
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();
    tracing::debug!("Log level: {}", level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_debug_count_when_mapping_then_capped_at_trace() {
        assert_eq!(verbosity_level(0), LevelFilter::WARN);
        assert_eq!(verbosity_level(2), LevelFilter::DEBUG);
        assert_eq!(verbosity_level(9), LevelFilter::TRACE);
    }
}
