//! # credledger CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use credledger_cli::commands::{
    run_disclose, run_disclosure, run_init, run_issue, run_register, run_revoke, run_show,
    run_verify, DiscloseArgs, DisclosureArgs, InitArgs, IssueArgs, RegisterArgs, RevokeArgs,
    ShowArgs, VerifyArgs,
};
use credledger_cli::replay::{run_replay, ReplayArgs};
use credledger_cli::store::DEFAULT_STATE_PATH;

/// Credential ledger CLI.
///
/// Registers issuing institutions, issues and revokes credentials, records
/// recipient-controlled selective disclosures, and verifies credentials
/// against a ledger snapshot on disk.
#[derive(Parser, Debug)]
#[command(name = "credledger", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the ledger snapshot.
    #[arg(long, global = true, default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,

    /// Path to a YAML ledger configuration (used by `init`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty ledger with a configured owner.
    Init(InitArgs),

    /// Register an issuing institution (owner only).
    Register(RegisterArgs),

    /// Issue a credential (registered institutions only).
    Issue(IssueArgs),

    /// Revoke a credential (issuer only).
    Revoke(RevokeArgs),

    /// Disclose a credential field (recipient only).
    Disclose(DiscloseArgs),

    /// Check a credential against a presented hash.
    Verify(VerifyArgs),

    /// Print a credential record.
    Show(ShowArgs),

    /// Print disclosed fields of a credential.
    Disclosure(DisclosureArgs),

    /// Apply a YAML transaction script in order.
    Replay(ReplayArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(state = %cli.state.display(), "credledger starting");

    let state = cli.state.as_path();
    let result = match &cli.command {
        Commands::Init(args) => run_init(args, state, cli.config.as_deref()),
        Commands::Register(args) => run_register(args, state),
        Commands::Issue(args) => run_issue(args, state),
        Commands::Revoke(args) => run_revoke(args, state),
        Commands::Disclose(args) => run_disclose(args, state),
        Commands::Verify(args) => run_verify(args, state),
        Commands::Show(args) => run_show(args, state),
        Commands::Disclosure(args) => run_disclosure(args, state),
        Commands::Replay(args) => run_replay(args, state),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
