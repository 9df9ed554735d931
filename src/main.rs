// ABOUTME: cloudkms binary entry point
// ABOUTME: Resolves config, builds the cloud clients, and runs one command to completion

use clap::Parser;
use cloudkms::cli::{Cli, Command};
use cloudkms::config::{self, Config};
use cloudkms::dispatcher::{self, Dispatcher};
use cloudkms::error::Error;
use cloudkms::kms::gcp::GcpKeyService;
use cloudkms::storage::gcs::GcsStore;
use dotenv::dotenv;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // Logs go to stderr so list output stays clean on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), Error> {
    let mut out = io::stdout();
    let download_dir = PathBuf::from(".");

    match command {
        Command::Version => dispatcher::write_version(io::stderr()),
        Command::List { bucket } => {
            let bucket = config::resolve_bucket(bucket)?;
            let store = GcsStore::new(bucket).await?;
            Dispatcher::new(store, (), &mut out, download_dir)
                .list()
                .await
        }
        Command::Get { path, opts } => {
            let config = Config::resolve(
                opts.bucket,
                opts.project_id,
                opts.location,
                opts.keyring,
                opts.keyname,
            )?;
            let store = GcsStore::new(config.bucket.clone()).await?;
            let keys = GcpKeyService::new(&config.key).await?;
            Dispatcher::new(store, keys, &mut out, download_dir)
                .get(&path)
                .await
        }
        Command::Put { path, opts } => {
            let config = Config::resolve(
                opts.bucket,
                opts.project_id,
                opts.location,
                opts.keyring,
                opts.keyname,
            )?;
            let store = GcsStore::new(config.bucket.clone()).await?;
            let keys = GcpKeyService::new(&config.key).await?;
            Dispatcher::new(store, keys, &mut out, download_dir)
                .put(&path)
                .await
        }
    }
}
