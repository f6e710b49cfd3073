//! SPLPv1 conformance checker CLI.
//!
//! # Commands
//!
//! - `check` - validate a transcript of `<peer> <message>` lines
//! - `explain` - validate a single message from a chosen state

use std::io::{self, Read};
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use splp::{grammar::B64_PREFIX, Command, Peer, Session, SessionState, Transcript, VERSION};

#[derive(Parser)]
#[command(name = "splp")]
#[command(version = VERSION)]
#[command(about = "SPLPv1 protocol conformance checker", long_about = None)]
struct Cli {
    /// Verbose logging (debug-level transition traces)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a transcript of "<peer> <message>" lines
    Check {
        /// Transcript file (- or omitted for stdin)
        file: Option<PathBuf>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Show decoded content of accepted B64 payloads
        #[arg(long)]
        decode: bool,
    },

    /// Validate a single message from a chosen state
    Explain {
        /// Sending peer (A or B)
        sender: Peer,

        /// Message text (quote it when it contains spaces)
        message: String,

        /// Starting state
        #[arg(long, default_value = "init", value_parser = parse_state)]
        state: SessionState,

        /// Outstanding echo command (required with --state waiting-data)
        #[arg(long, value_parser = parse_command)]
        pending: Option<Command>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Check { file, json, decode } => cmd_check(file, json, decode),
        Commands::Explain {
            sender,
            message,
            state,
            pending,
        } => cmd_explain(sender, &message, state, pending),
    }
}

fn cmd_check(file: Option<PathBuf>, json: bool, decode: bool) -> anyhow::Result<()> {
    let content = read_input(file)?;
    let transcript = Transcript::parse(&content)?;

    let mut session = Session::new();
    let report = transcript.run(&mut session);

    if json {
        println!("{}", report.to_json()?);
    } else {
        for line in &report.lines {
            match line.violation {
                None => println!(
                    "{:>5}  {} {:<40} {}",
                    line.line, line.sender, line.text, line.verdict
                ),
                Some(violation) => println!(
                    "{:>5}  {} {:<40} {} ({violation}; reset to {})",
                    line.line, line.sender, line.text, line.verdict, line.state
                ),
            }

            if decode && line.verdict.is_valid() {
                if let Some(payload) = line.text.strip_prefix(B64_PREFIX) {
                    match STANDARD.decode(payload) {
                        Ok(bytes) => println!(
                            "       decoded {} byte(s): {}",
                            bytes.len(),
                            String::from_utf8_lossy(&bytes)
                        ),
                        // The grammar is structural; non-canonical padding
                        // bits can still fail a strict decoder.
                        Err(err) => tracing::warn!(
                            "line {}: payload passes the grammar but does not decode: {err}",
                            line.line
                        ),
                    }
                }
            }
        }

        println!();
        println!(
            "{} message(s): {} valid, {} invalid",
            report.lines.len(),
            report.lines.len() - report.invalid_count(),
            report.invalid_count()
        );
    }

    if !report.is_conformant() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_explain(
    sender: Peer,
    message: &str,
    state: SessionState,
    pending: Option<Command>,
) -> anyhow::Result<()> {
    let mut session = Session::resume(state, pending)?;
    match session.check(sender, message) {
        Ok(next) => println!("VALID: {state} -> {next}"),
        Err(violation) => println!("INVALID: {violation}; {state} -> {}", session.state()),
    }
    Ok(())
}

fn read_input(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        },
    }
}

fn parse_state(s: &str) -> Result<SessionState, String> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "init" => Ok(SessionState::Init),
        "connecting" => Ok(SessionState::Connecting),
        "connected" => Ok(SessionState::Connected),
        "waiting_version" => Ok(SessionState::WaitingVersion),
        "waiting_data" => Ok(SessionState::WaitingData),
        "waiting_b64" => Ok(SessionState::WaitingB64),
        "disconnecting" => Ok(SessionState::Disconnecting),
        other => Err(format!(
            "unknown state {other:?} (expected init, connecting, connected, \
             waiting-version, waiting-data, waiting-b64, disconnecting)"
        )),
    }
}

fn parse_command(s: &str) -> Result<Command, String> {
    match s.to_ascii_uppercase().replace('-', "_").as_str() {
        "GET_DATA" => Ok(Command::GetData),
        "GET_COMMAND" => Ok(Command::GetCommand),
        "GET_FILE" => Ok(Command::GetFile),
        other => Err(format!(
            "unknown command {other:?} (expected get-data, get-command, get-file)"
        )),
    }
}
