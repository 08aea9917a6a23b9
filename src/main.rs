mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use userjs::LoaderConfig;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(verbose = cli.verbose, "Logging initialized");

    let loader = LoaderConfig {
        comment_marker: cli.comment_marker,
    };

    match cli.command {
        Commands::Load {
            file,
            query,
            output,
        } => commands::load(&file, &query, output, &loader),
        Commands::Merge {
            files,
            continue_on_error,
            output,
        } => commands::merge(&files, continue_on_error, output, &loader),
        Commands::Diff { old, new, output } => commands::diff_files(&old, &new, output, &loader),
    }
}

/// `--verbose` forces debug output, otherwise `RUST_LOG` decides
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug_filter() {
        assert_eq!(log_filter(true).to_string(), "debug");
    }
}
