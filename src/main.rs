use clap::Parser;

use lurk::cli::{Cli, Command};
use lurk::config::{Config, SourceKind};
use lurk::fetch;
use lurk::report;
use lurk::run;
use lurk::store::StateStore;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let config = Config::from_run_args(&args).unwrap_or_else(|e| {
                eprintln!("configuration error: {e}");
                std::process::exit(1);
            });

            let source = fetch::source_for(&config).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });

            match run::run(&config, source.as_ref()) {
                Ok(summary) => report::print_summary(&summary, config.verbose),
                Err(e) => {
                    eprintln!("run failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Report(args) => {
            let config = Config::load().unwrap_or_else(|e| {
                eprintln!("configuration error: {e}");
                std::process::exit(1);
            });

            let state = StateStore::new(&config.state_file).load();

            if let Some(username) = &args.username {
                let username = username.strip_prefix('@').unwrap_or(username);
                match state.get(username) {
                    Some(record) => report::print_record(record, args.json),
                    None => {
                        eprintln!("'{username}' has no recorded state. Is it in the roster?");
                        std::process::exit(1);
                    }
                }
            } else {
                report::print_state(&state, args.json);
            }
        }
        Command::Check(args) => {
            let mut config = Config::load().unwrap_or_else(|e| {
                eprintln!("configuration error: {e}");
                std::process::exit(1);
            });

            if let Some(source) = &args.source {
                config.source = SourceKind::parse(source).unwrap_or_else(|| {
                    eprintln!("invalid source '{source}', expected 'page' or 'api'");
                    std::process::exit(1);
                });
            }

            let source = fetch::source_for(&config).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });

            let username = args.username.strip_prefix('@').unwrap_or(&args.username);
            match source.fetch(username) {
                Ok(record) => report::print_record(&record, args.json),
                Err(e) => {
                    eprintln!("fetch failed for {username}: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
