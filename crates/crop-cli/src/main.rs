use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("cropcast error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = bootstrap::load_config(&flags)?;
    init_tracing(flags.quiet, flags.verbose, &config.general.log_level)?;
    context::warn_unconfigured(&config);

    let ctx = context::AppContext::init(config)?;
    commands::dispatch::dispatch(&cli.command, &ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool, configured: &str) -> anyhow::Result<()> {
    let level = tracing_level(quiet, verbose, configured);

    let filter = tracing_subscriber::EnvFilter::try_from_env("CROPCAST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

const fn tracing_level(quiet: bool, verbose: bool, configured: &str) -> &str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    }
}
