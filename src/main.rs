//! Forensiq CLI - terminal dashboard over mock device-forensics results.

use clap::Parser;
use std::process;

use forensiq::cli::{Cli, Commands, FixtureCommands, SessionCommands, SystemCommands};
use forensiq::commands::{self, Output};
use forensiq::config::{ForensiqConfig, OutputFormat, Settings};
use forensiq::fixtures::FixtureStore;

fn main() {
    let cli = Cli::parse();

    init_tracing();

    let config = match ForensiqConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let settings = Settings::resolve(&config, cli.human_readable);
    let human = settings.output_format == OutputFormat::Human;

    if let Err(e) = run_command(cli.command, settings, human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        }
        process::exit(1);
    }
}

/// Stderr subscriber gated by `FQ_LOG`. Only TUI-enabled builds carry
/// tracing-subscriber; headless builds log nothing, so JSON output stays
/// clean for scripting. The TUI itself swaps in a file-backed subscriber.
#[cfg(feature = "tui")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    if std::env::var("FQ_LOG").is_err() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("FQ_LOG"))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(not(feature = "tui"))]
fn init_tracing() {}

fn run_command(
    command: Option<Commands>,
    settings: Settings,
    human: bool,
) -> Result<(), forensiq::Error> {
    match command {
        Some(Commands::Tui { route }) => run_tui(settings, route)?,

        Some(Commands::Query { text }) => {
            let store = FixtureStore::load()?;
            let result = commands::query(&store, &text)?;
            output(&result, human);
        }

        Some(Commands::Fixtures { command }) => match command {
            FixtureCommands::Validate => {
                let result = commands::fixtures_validate()?;
                output(&result, human);
            }
            FixtureCommands::Stats => {
                let store = FixtureStore::load()?;
                let result = commands::fixtures_stats(&store);
                output(&result, human);
            }
        },

        Some(Commands::Session { command }) => match command {
            SessionCommands::Check { email, credential } => {
                let result = commands::session_check(&email, &credential);
                output(&result, human);
            }
        },

        Some(Commands::System { command }) => match command {
            SystemCommands::BuildInfo => {
                if human {
                    println!("Version: {}", forensiq::cli::package_version());
                    println!("Commit:  {}", forensiq::cli::git_commit());
                    println!("Built:   {}", forensiq::cli::build_timestamp());
                } else {
                    let result = serde_json::json!({
                        "version": forensiq::cli::package_version(),
                        "commit": forensiq::cli::git_commit(),
                        "built": forensiq::cli::build_timestamp(),
                    });
                    println!("{}", result);
                }
            }
        },

        None => {
            // Default: fixture overview, same as `fq fixtures stats`.
            let store = FixtureStore::load()?;
            let result = commands::fixtures_stats(&store);
            output(&result, human);
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_tui(settings: Settings, route: Option<String>) -> Result<(), forensiq::Error> {
    forensiq::tui::run_tui(settings, route.as_deref())
}

#[cfg(not(feature = "tui"))]
fn run_tui(_settings: Settings, _route: Option<String>) -> Result<(), forensiq::Error> {
    Err(forensiq::Error::Other(
        "this build has no TUI; rebuild with `--features tui`".to_string(),
    ))
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
