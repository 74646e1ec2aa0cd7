use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use chrono::Local;
use clap::Parser;
use tracing::{info, warn, Level};
use coursedb::core::config::Config;
use coursedb::core::error::Result;
use coursedb::shell::help::{write_banner, write_goodbye};
use coursedb::shell::{Flow, Session};

/// Course Management System: an interactive student record store
#[derive(Debug, Parser)]
#[command(name = "coursedb", version)]
struct Cli {
    /// Database file used by OPEN and SAVE
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Delete without asking for confirmation
    #[arg(long)]
    yes: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(db) = cli.db {
        config = config.with_storage_path(db);
    }
    if cli.yes {
        config.confirm_delete = false;
    }

    let level = if cli.verbose { Level::DEBUG } else { config.level()? };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    info!(path = %config.storage_path.display(), "starting session");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    write_banner(&mut out, &config, Local::now().date_naive())?;

    let prompt = config.prompt.clone();
    let mut session = Session::new(config);
    let mut line = String::new();

    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                writeln!(out)?;
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "stdin unreadable, ending session");
                break;
            }
        }

        if session.process_line(&line, &mut input, &mut out)? == Flow::Exit {
            break;
        }
    }

    write_goodbye(&mut out)?;
    Ok(())
}
