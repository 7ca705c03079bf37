//! Resource archive CLI entry point.

use archive::cli::commands;
use archive::cli::{Cli, Commands};
use archive::error::Error;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    let json = cli.wants_json();

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let archive = cli.archive.as_ref();

    match &cli.command {
        Commands::Store {
            id,
            file,
            content_type,
            label,
            attributes,
        } => {
            let args = commands::store::StoreArgs {
                id,
                file,
                content_type: content_type.as_deref(),
                label: label.as_deref(),
                attributes,
            };
            commands::store::execute(&args, archive, json)
        }
        Commands::Load { id, file } => commands::load::execute(id, file, archive, json),
        Commands::Delete { id } => commands::delete::execute(id, archive, json),
        Commands::List { prefix } => {
            commands::list::execute(prefix.as_deref(), archive, &cli.format, json)
        }
        Commands::Show {
            id,
            attributes_only,
        } => commands::show::execute(id, *attributes_only, archive, json),
        Commands::Revision => commands::revision::execute(archive, json),
        Commands::Completions { shell } => commands::completions::execute(*shell),
    }
}
