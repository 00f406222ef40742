use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use sshkey_audit::commands;
use sshkey_audit::output::OutputFormat;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sshkey-audit")]
#[command(about = "Audit SSH authorized_keys usage against system auth logs", long_about = None)]
#[command(version)]
struct Cli {
    /// Diagnostic verbosity on stderr (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "off")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List authorized keys with their last logged use
    ListKeys {
        /// Path to the authorized_keys file (default: ~/.ssh/authorized_keys)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Directory containing the auth log and its rotations
        #[arg(long, default_value = "/var/log")]
        log_dir: PathBuf,

        /// Base filename of the auth log
        #[arg(long, default_value = "auth.log")]
        log_prefix: String,

        /// Only report keys last used at least this many days ago
        /// (never-used keys always match)
        #[arg(long)]
        older_than_days: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::ListKeys {
            file,
            log_dir,
            log_prefix,
            older_than_days,
            format,
        } => {
            let file = match file {
                Some(path) => path,
                None => default_authorized_keys_path()?,
            };
            commands::list_keys::run(&file, &log_dir, &log_prefix, older_than_days, format)
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sshkey-audit", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Diagnostics go to stderr and stay off unless requested, so report output
/// on stdout remains machine-parseable.
fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Off);
    env_logger::Builder::new()
        .filter_level(filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn default_authorized_keys_path() -> Result<PathBuf> {
    let home = env::var_os("HOME").context("$HOME is not set; pass --file explicitly")?;
    Ok(Path::new(&home).join(".ssh").join("authorized_keys"))
}
