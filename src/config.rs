// ABOUTME: Invocation configuration resolved once at startup from flags and env vars
// ABOUTME: Explicit flags win over BUCKET/PROJECT/LOCATION/KEYRING/KEYNAME env defaults

use crate::error::Error;
use std::env;

const DEFAULT_LOCATION: &str = "asia-northeast1";

/// Identifies the managed KMS key used for every encrypt/decrypt call in a
/// session. Immutable once a command begins.
#[derive(Debug, Clone)]
pub struct KeyReference {
    pub project: String,
    pub location: String,
    pub keyring: String,
    pub key_name: String,
}

impl KeyReference {
    /// Full Cloud KMS resource name for this key.
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/keyRings/{}/cryptoKeys/{}",
            self.project, self.location, self.keyring, self.key_name
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bucket: String,
    pub key: KeyReference,
}

impl Config {
    pub fn resolve(
        bucket: Option<String>,
        project: Option<String>,
        location: Option<String>,
        keyring: Option<String>,
        keyname: Option<String>,
    ) -> Result<Self, Error> {
        Ok(Self {
            bucket: resolve_bucket(bucket)?,
            key: KeyReference {
                project: required(project, "PROJECT", "--project-id")?,
                location: location
                    .or_else(|| env_default("LOCATION"))
                    .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                keyring: required(keyring, "KEYRING", "--keyring")?,
                key_name: required(keyname, "KEYNAME", "--keyname")?,
            },
        })
    }
}

pub fn resolve_bucket(flag: Option<String>) -> Result<String, Error> {
    required(flag, "BUCKET", "--bucket")
}

fn required(flag: Option<String>, var: &str, flag_name: &str) -> Result<String, Error> {
    flag.or_else(|| env_default(var)).ok_or_else(|| {
        Error::Configuration(format!("missing {flag_name} (or the {var} env var)"))
    })
}

fn env_default(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_name_renders_full_key_path() {
        let key = KeyReference {
            project: "my-project".to_string(),
            location: "asia-northeast1".to_string(),
            keyring: "my-ring".to_string(),
            key_name: "my-key".to_string(),
        };
        assert_eq!(
            key.resource_name(),
            "projects/my-project/locations/asia-northeast1/keyRings/my-ring/cryptoKeys/my-key"
        );
    }

    #[test]
    fn flags_resolve_without_env() {
        let config = Config::resolve(
            Some("my-bucket".to_string()),
            Some("my-project".to_string()),
            Some("europe-west1".to_string()),
            Some("my-ring".to_string()),
            Some("my-key".to_string()),
        )
        .unwrap();
        assert_eq!(config.bucket, "my-bucket");
        assert_eq!(config.key.location, "europe-west1");
    }

    #[test]
    fn location_defaults_when_unset() {
        env::remove_var("LOCATION");
        let config = Config::resolve(
            Some("my-bucket".to_string()),
            Some("my-project".to_string()),
            None,
            Some("my-ring".to_string()),
            Some("my-key".to_string()),
        )
        .unwrap();
        assert_eq!(config.key.location, "asia-northeast1");
    }

    #[test]
    fn missing_bucket_is_a_configuration_error() {
        env::remove_var("BUCKET");
        let err = resolve_bucket(None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
