//! imds-dump — entry point.

use std::io::Write;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use imds_dump::{render_to, KeyFailurePolicy, MetadataConfig, MetadataFetcher};

#[derive(Parser)]
#[command(
    name = "imds-dump",
    about = "Print a cloud instance's metadata as JSON",
    version
)]
struct Cli {
    /// Metadata service host (host or host:port).
    /// Also reads from IMDS_HOST env var; defaults to 169.254.169.254.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Store error responses for individual keys instead of aborting.
    #[arg(long, global = true)]
    best_effort: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every top-level key and print the result as JSON (default).
    Fetch,

    /// Print the top-level key names, one per line.
    Keys,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   imds-dump completions bash > ~/.local/share/bash-completion/completions/imds-dump
    ///   imds-dump completions zsh > ~/.zfunc/_imds-dump
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let code = run(cli, &mut std::io::stdout(), &mut std::io::stderr()).await?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Execute the parsed command and return the process exit code.
///
/// Fetch failures are reported on `err` with exit code 1 and leave `out`
/// untouched. Only failures to write output are returned as errors.
async fn run<O: Write, E: Write>(cli: Cli, out: &mut O, err: &mut E) -> anyhow::Result<i32> {
    let config = MetadataConfig::resolve(cli.host.as_deref());
    let policy = if cli.best_effort {
        KeyFailurePolicy::Verbatim
    } else {
        KeyFailurePolicy::Abort
    };
    tracing::debug!(base_url = %config.base_url(), ?policy, "resolved metadata endpoint");

    match cli.command.unwrap_or(Commands::Fetch) {
        Commands::Fetch => {
            let fetcher = MetadataFetcher::new(config).with_policy(policy);
            match fetcher.fetch_all().await {
                Ok(metadata) => render_to(out, &metadata)?,
                Err(e) => {
                    writeln!(err, "Error fetching metadata: {e}")?;
                    return Ok(1);
                }
            }
        }

        Commands::Keys => {
            let fetcher = MetadataFetcher::new(config);
            match fetcher.keys().await {
                Ok(keys) => {
                    for key in keys {
                        writeln!(out, "{key}")?;
                    }
                }
                Err(e) => {
                    writeln!(err, "Error fetching metadata: {e}")?;
                    return Ok(1);
                }
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "imds-dump", out);
        }
    }

    out.flush()?;
    Ok(0)
}
