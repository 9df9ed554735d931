// ABOUTME: Command dispatcher mapping list/get/put/version onto the two capabilities
// ABOUTME: Each invocation is one linear sequence of calls; no retries, no session state

use crate::error::Error;
use crate::kms::KeyService;
use crate::storage::ObjectStore;
use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every key file lives under this prefix in the bucket.
pub const KEY_PREFIX: &str = "kms-keys/";
/// Fixed marker on every stored object holding encrypted content.
pub const ENCRYPTED_SUFFIX: &str = ".encrypted";

/// Runs one command against an object store and a key service.
///
/// `list` needs only the store, so the key service slot can stay `()` when no
/// KMS configuration is available.
pub struct Dispatcher<'a, S, K = ()> {
    store: S,
    keys: K,
    out: &'a mut (dyn Write + Send),
    download_dir: PathBuf,
}

impl<'a, S, K> Dispatcher<'a, S, K> {
    pub fn new(store: S, keys: K, out: &'a mut (dyn Write + Send), download_dir: PathBuf) -> Self {
        Self {
            store,
            keys,
            out,
            download_dir,
        }
    }

    /// Prints the logical name of every key file in the store, one per line.
    /// An empty listing is a user-visible error, not empty success.
    pub async fn list(&mut self) -> Result<(), Error>
    where
        S: ObjectStore,
    {
        let names = self.store.list(KEY_PREFIX).await?;

        let mut count = 0;
        for name in &names {
            let logical = logical_name(name);
            // Directory-placeholder objects strip down to nothing; skip them
            if logical.is_empty() {
                continue;
            }
            writeln!(self.out, "{}", logical)?;
            count += 1;
        }

        if count == 0 {
            return Err(Error::NotFound("The key does not exist".to_string()));
        }
        Ok(())
    }

    /// Downloads `kms-keys/<name>.encrypted`, decrypts it, and writes the
    /// plaintext to a local file named by the base name of `name`.
    pub async fn get(&mut self, name: &str) -> Result<(), Error>
    where
        S: ObjectStore,
        K: KeyService,
    {
        let object = format!("{}{}{}", KEY_PREFIX, name, ENCRYPTED_SUFFIX);
        let ciphertext = self.store.read(&object).await?;
        let plaintext = self.keys.decrypt(&ciphertext).await?;

        let filename = base_name(name)?;
        let path = self.download_dir.join(&filename);
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&path)?;
        file.write_all(&plaintext)?;

        debug!("Wrote {} bytes to {:?}", plaintext.len(), path);
        writeln!(self.out, "Download {}", filename)?;
        Ok(())
    }

    /// Encrypts the local file at `path` and uploads the ciphertext as
    /// `kms-keys/<basename>.encrypted`. The local read happens first, so a
    /// missing file never reaches the key service.
    pub async fn put(&mut self, path: &str) -> Result<(), Error>
    where
        S: ObjectStore,
        K: KeyService,
    {
        let plaintext = std::fs::read(path)?;
        let ciphertext = self.keys.encrypt(&plaintext).await?;

        let filename = base_name(path)?;
        let object = format!("{}{}{}", KEY_PREFIX, filename, ENCRYPTED_SUFFIX);
        self.store.write(&object, &ciphertext).await?;

        writeln!(self.out, "Upload {}", filename)?;
        Ok(())
    }
}

/// Prints the fixed version line to the given stream (the status stream, by
/// convention) without touching either capability.
pub fn write_version(mut out: impl Write) -> Result<(), Error> {
    writeln!(out, "cloudkms {}", VERSION)?;
    Ok(())
}

fn logical_name(object: &str) -> &str {
    let name = object.strip_prefix(KEY_PREFIX).unwrap_or(object);
    name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(name)
}

fn base_name(name: &str) -> Result<String, Error> {
    Path::new(name)
        .file_name()
        .and_then(|base| base.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::Configuration(format!("invalid path: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_name_strips_prefix_and_suffix() {
        assert_eq!(logical_name("kms-keys/hoge.txt.encrypted"), "hoge.txt");
        assert_eq!(logical_name("hoge.txt"), "hoge.txt");
        assert_eq!(logical_name("kms-keys/"), "");
    }

    #[test]
    fn base_name_takes_the_last_component() {
        assert_eq!(base_name("secrets/hoge.txt").unwrap(), "hoge.txt");
        assert_eq!(base_name("hoge.txt").unwrap(), "hoge.txt");
    }

    #[test]
    fn version_line_goes_to_the_given_stream() {
        let mut out = Vec::new();
        write_version(&mut out).unwrap();
        assert_eq!(out, format!("cloudkms {}\n", VERSION).into_bytes());
    }
}
