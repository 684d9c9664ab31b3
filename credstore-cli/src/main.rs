use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use credstore_core::config::Config;
use credstore_core::crypto::CryptoProvider;
use credstore_core::identity::{CredentialStore, Identity};
use credstore_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "credstore")]
#[command(author, version, about = "Local credential store for blockchain-client identities", long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Property file backing the store (overrides CREDSTORE_STORE_FILE)
    #[arg(short, long)]
    store_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enroll an identity from key and certificate files
    Enroll {
        name: String,
        organization: String,
        /// Membership service provider id, e.g. Org1MSP
        msp_id: String,
        /// PEM private-key file
        key_file: PathBuf,
        /// PEM certificate file
        cert_file: PathBuf,
    },
    /// Show the persisted state of an identity
    Show {
        name: String,
        organization: String,
    },
    /// Read one raw value from the property file
    Get { key: String },
    /// Write one raw value into the property file
    Set { key: String, value: String },
    /// List all property keys
    List,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level: LogLevel = args.log_level.parse().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });
    init_logging_with_config(LogConfig::new(log_level).json_format(args.json_logs))?;

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(file) = args.store_file {
        config.store.file = file;
    }

    let provider = CryptoProvider::new();
    let mut store = CredentialStore::new(config.store.file.clone(), provider.clone());

    match args.command {
        Command::Enroll {
            name,
            organization,
            msp_id,
            key_file,
            cert_file,
        } => {
            let identity = store
                .get_or_create_from_files(&name, &organization, &msp_id, &key_file, &cert_file)
                .with_context(|| format!("enrolling {}.{}", name, organization))?;
            match identity.enrollment() {
                Some(enrollment) => println!(
                    "enrolled {}.{} ({} key)",
                    name,
                    organization,
                    enrollment.key().algorithm()
                ),
                None => println!("{}.{} was already cached without an enrollment", name, organization),
            }
        }
        Command::Show { name, organization } => {
            let mut identity =
                Identity::new(name.as_str(), organization.as_str(), Arc::clone(store.kv()));
            if identity.restore_state(&provider)? {
                println!("{}.{}", name, organization);
                println!("  msp id: {}", identity.msp_id().unwrap_or("<none>"));
                match identity.enrollment() {
                    Some(enrollment) => println!(
                        "  enrollment: {} key, certificate of {} bytes",
                        enrollment.key().algorithm(),
                        enrollment.cert().len()
                    ),
                    None => println!("  enrollment: <none>"),
                }
            } else {
                println!("no saved state for {}.{}", name, organization);
            }
        }
        Command::Get { key } => match store.get_value(&key) {
            Some(value) => println!("{}", value),
            None => bail!("no value stored under \"{}\"", key),
        },
        Command::Set { key, value } => {
            store.set_value(&key, &value);
            info!("stored {}", key);
        }
        Command::List => {
            for key in store.kv().keys() {
                println!("{}", key);
            }
        }
    }

    Ok(())
}
