//! CLI argument definitions for Forensiq.

use clap::{Parser, Subcommand};

/// Forensiq - a terminal dashboard over mock device-forensics results.
///
/// Run `fq tui` (with the `tui` feature) for the full dashboard, or use
/// the headless subcommands to poke at the fixture data directly.
#[derive(Parser, Debug)]
#[command(name = "fq")]
#[command(author, version, about = "Terminal dashboard for mock forensic-analysis results", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive dashboard (requires the `tui` feature)
    Tui {
        /// Start at this route path after sign-in (e.g. "/dashboard/timeline");
        /// unknown paths land on the not-found surface
        #[arg(long)]
        route: Option<String>,
    },

    /// Run an investigative query against the fixture records
    Query {
        /// Free-text query, e.g. "find crypto wallet mentions"
        text: String,
    },

    /// Fixture data inspection commands
    Fixtures {
        #[command(subcommand)]
        command: FixtureCommands,
    },

    /// Session gate commands
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// System administration commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

/// Fixture inspection subcommands
#[derive(Subcommand, Debug)]
pub enum FixtureCommands {
    /// Parse and cross-check the embedded fixture documents
    Validate,

    /// Show document counts
    Stats,
}

/// Session gate subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Check a credential pair against the fixed directory
    Check {
        /// Analyst email
        email: String,

        /// Analyst credential
        credential: String,
    },
}

/// System administration subcommands
#[derive(Subcommand, Debug)]
pub enum SystemCommands {
    /// Show build version, commit, and timestamp
    BuildInfo,
}

/// Package version as baked in at compile time.
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Short git commit the binary was built from.
pub fn git_commit() -> &'static str {
    env!("FQ_GIT_COMMIT")
}

/// Build timestamp injected by the build script.
pub fn build_timestamp() -> &'static str {
    env!("FQ_BUILD_TIMESTAMP")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // This will panic if the CLI is misconfigured
        Cli::command().debug_assert();
    }
}
