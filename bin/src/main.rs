//! elbas CLI - Nord Pool Elbas market price fetcher.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use commands::fetch::FetchArgs;

#[derive(Parser)]
#[command(name = "elbas")]
#[command(about = "Fetch Nord Pool Elbas intraday market prices", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress spinner and summary output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the hourly product table
    Hourly {
        /// Column to keep (repeatable). Defaults to the standard hourly columns.
        #[arg(short, long = "column")]
        columns: Vec<String>,

        #[command(flatten)]
        args: FetchArgs,
    },

    /// Fetch an arbitrary market data page
    Fetch {
        /// Market data page id (194 is the hourly table)
        page: u32,

        /// Column to keep (repeatable). Defaults to every column.
        #[arg(short, long = "column")]
        columns: Vec<String>,

        #[command(flatten)]
        args: FetchArgs,
    },

    /// List the default hourly columns
    Columns,
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Hourly { columns, args } => {
            commands::fetch::hourly(&columns, &args, cli.quiet).await
        }
        Commands::Fetch {
            page,
            columns,
            args,
        } => commands::fetch::fetch(page, &columns, &args, cli.quiet).await,
        Commands::Columns => {
            commands::columns::list_columns();
            Ok(())
        }
    }
}
