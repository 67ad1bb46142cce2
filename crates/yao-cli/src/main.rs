//! CLI frontend for the LiuYao divination engine.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "yao",
    about = "LiuYao (六爻) divination: cast, build and read a hexagram",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a hexagram.
#[derive(Args)]
pub struct ReadingArgs {
    /// The question asked
    #[arg(short, long, default_value = "")]
    pub question: String,

    /// Moment of the reading, e.g. 2024-03-15T09:30 (default: now)
    #[arg(long)]
    pub at: Option<String>,

    /// Use these four pillars instead of the built-in calendar, e.g. "甲子 丙寅 戊午 庚申"
    #[arg(long)]
    pub pillars: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast six lines without analysing them
    Cast {
        /// Casting mode: coin, number, time, random
        mode: String,

        /// Mode values: six coin throws (0-3 backs or e.g. HTT), or two numbers
        values: Vec<String>,

        /// RNG seed for the random mode
        #[arg(short, long)]
        seed: Option<u64>,

        /// Moment for the time mode, e.g. 2024-03-15T09:30 (default: now)
        #[arg(long)]
        at: Option<String>,

        /// Use these four pillars instead of the built-in calendar
        #[arg(long)]
        pillars: Option<String>,
    },

    /// Analyse six given lines written as 6/7/8/9 digits, bottom first
    Analyze {
        /// Lines, e.g. 887888
        lines: String,

        #[command(flatten)]
        reading: ReadingArgs,
    },

    /// Cast and analyse in one step
    Divine {
        /// Casting mode: coin, number, time, random
        mode: String,

        /// Mode values: six coin throws, or two numbers
        values: Vec<String>,

        /// RNG seed for the random mode
        #[arg(short, long)]
        seed: Option<u64>,

        #[command(flatten)]
        reading: ReadingArgs,
    },

    /// Serve a JSON request file and print the JSON report
    Request {
        /// Path to the request file
        file: PathBuf,

        /// Use these four pillars instead of the built-in calendar
        #[arg(long)]
        pillars: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Cast {
            mode,
            values,
            seed,
            at,
            pillars,
        } => commands::cast::run(&mode, &values, seed, at.as_deref(), pillars.as_deref()),
        Commands::Analyze { lines, reading } => commands::analyze::run(&lines, &reading),
        Commands::Divine {
            mode,
            values,
            seed,
            reading,
        } => commands::divine::run(&mode, &values, seed, &reading),
        Commands::Request { file, pillars } => commands::request::run(&file, pillars.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
