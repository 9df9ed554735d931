// ABOUTME: clap surface for the cloudkms binary
// ABOUTME: Subcommand style; every flag is optional and falls back to env defaults

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cloudkms", about = "Store and fetch key files in GCS, encrypted with Cloud KMS")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the key file list
    List {
        /// GCS bucket holding the key files (defaults to $BUCKET)
        #[arg(long)]
        bucket: Option<String>,
    },
    /// Download and decrypt one key file
    Get {
        /// Logical name of the key file
        path: String,
        #[command(flatten)]
        opts: KeyOpts,
    },
    /// Encrypt and upload a local file
    Put {
        /// Path to the local plaintext file
        path: String,
        #[command(flatten)]
        opts: KeyOpts,
    },
    /// Print version information and quit
    Version,
}

#[derive(Args)]
pub struct KeyOpts {
    /// GCS bucket holding the key files (defaults to $BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,
    /// GCP project ID (defaults to $PROJECT)
    #[arg(long)]
    pub project_id: Option<String>,
    /// KMS location (defaults to $LOCATION, then asia-northeast1)
    #[arg(long)]
    pub location: Option<String>,
    /// KMS key ring (defaults to $KEYRING)
    #[arg(long)]
    pub keyring: Option<String>,
    /// KMS key name (defaults to $KEYNAME)
    #[arg(long)]
    pub keyname: Option<String>,
}
