use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use triage_core::{
    constants::{DATA_DIR_ENV, MAX_LOAD_DEPTH_ENV},
    Patient, Session, TriageConfig, TriageResult,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Hospital triage desk CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive triage desk
    Shell {
        /// Command file to replay before prompting (optional)
        #[arg(long)]
        load: Option<PathBuf>,
    },
    /// Run every command in a file and print the transcript
    Replay {
        /// Command file, one desk command per line
        file: PathBuf,
    },
    /// Print the order in which the patients of a snapshot would be seen
    Order {
        /// Snapshot file of `add` commands
        file: PathBuf,
        /// Print a JSON array instead of text rows
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("triage=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = TriageConfig::from_env_values(
        std::env::var(DATA_DIR_ENV).ok(),
        std::env::var(MAX_LOAD_DEPTH_ENV).ok(),
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Shell { load }) => {
            let mut session = Session::new(cfg);
            if let Some(file) = load {
                session.replay(&file, &mut out)?;
            }
            session.run_interactive(io::stdin().lock(), &mut out)?;
        }
        Some(Commands::Replay { file }) => {
            let mut session = Session::new(cfg);
            session.replay(&file, &mut out)?;
        }
        Some(Commands::Order { file, json }) => {
            let seen = order_from_file(cfg, &file)?;
            write_order(&seen, json, &mut out)?;
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

/// Replay a snapshot into a fresh queue and return its patients in the order they would be seen.
fn order_from_file(cfg: TriageConfig, file: &Path) -> TriageResult<Vec<Patient>> {
    // The transcript of loading is not wanted here, only the resulting queue.
    let mut session = Session::new(cfg);
    session.replay(file, &mut io::sink())?;
    Ok(session.into_queue().drain_ordered().collect())
}

fn write_order<W: Write>(
    seen: &[Patient],
    json: bool,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        serde_json::to_writer_pretty(&mut *out, seen)?;
        writeln!(out)?;
    } else if seen.is_empty() {
        writeln!(out, "No patients found.")?;
    } else {
        for patient in seen {
            writeln!(out, "{patient}")?;
        }
    }
    Ok(())
}
