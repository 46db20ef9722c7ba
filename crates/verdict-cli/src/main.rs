use clap::Parser;

mod cli;
mod commands;

fn main() {
    let cli = cli::Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();
    if let Err(err) = commands::run_command(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(2);
    }
}
