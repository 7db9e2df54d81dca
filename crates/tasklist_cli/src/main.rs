//! Terminal shell for the task list.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the storage slot.
//! - Hand the controller to the interactive shell.

mod command;
mod shell;

use clap::Parser;
use shell::Shell;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tasklist_core::db::open_db;
use tasklist_core::{
    init_logging, AppConfig, ConfigOverrides, KeyValueStore, MemoryKeyValueStore,
    SqliteKeyValueStore, TaskListController,
};

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Keep a short list of tasks")]
struct Cli {
    /// SQLite file holding saved tasks
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    })?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    if cli.ephemeral {
        log::info!("event=shell_start module=cli status=ok storage=memory");
        return run(MemoryKeyValueStore::new());
    }

    let conn = open_db(&config.db_path)?;
    log::info!("event=shell_start module=cli status=ok storage=sqlite");
    run(SqliteKeyValueStore::new(&conn))
}

fn run<S: KeyValueStore>(store: S) -> Result<(), Box<dyn Error>> {
    let mut controller = TaskListController::load(store);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock()).run(&mut controller)?;
    Ok(())
}
