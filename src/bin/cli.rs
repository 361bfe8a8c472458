//! keystash CLI
//!
//! Command-line interface for inspecting and maintaining a keystash
//! directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use keystash::{RecordStore, StoreConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// keystash CLI
#[derive(Parser, Debug)]
#[command(name = "keystash-cli")]
#[command(about = "CLI for the keystash file-backed key-value store")]
#[command(version)]
struct Args {
    /// Base storage directory (default: platform app-data dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all stored keys
    List,

    /// Print the JSON record for a key
    Get {
        /// The key to read
        key: String,
    },

    /// Check whether a record exists for a key
    Exists {
        /// The key to check
        key: String,
    },

    /// Delete the record for a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// Copy all record files into a target directory
    Backup {
        /// Target directory (created if missing)
        target: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,keystash=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let mut builder = StoreConfig::builder();
    if let Some(dir) = args.dir {
        builder = builder.base_dir(dir);
    }

    let store = match RecordStore::open(builder.build()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&store, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &RecordStore, command: Commands) -> keystash::Result<()> {
    match command {
        Commands::List => {
            let mut keys: Vec<String> = store.list_keys()?.into_iter().collect();
            keys.sort();
            for key in keys {
                println!("{}", key);
            }
        }

        Commands::Get { key } => match store.load::<serde_json::Value>(&key)? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default()),
            None => println!("(no record for '{}')", key),
        },

        Commands::Exists { key } => {
            println!("{}", store.exists(&key));
        }

        Commands::Delete { key } => {
            store.delete(&key)?;
        }

        Commands::Backup { target } => {
            let count = store.backup_to(&target)?;
            println!("{} file(s) copied to {}", count, target.display());
        }
    }

    Ok(())
}
