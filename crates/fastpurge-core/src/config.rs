use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// EdgeGrid credential bundle, loaded from an `.edgerc` section and
/// shared read-only by every delivery task.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub host: String,
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
    /// Cap on the request bytes hashed into the signature.
    pub max_body: usize,
}

/// CCU v3 invalidation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeMethod {
    Invalidate,
    Delete,
}

impl PurgeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PurgeMethod::Invalidate => "invalidate",
            PurgeMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for PurgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurgeMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalidate" => Ok(PurgeMethod::Invalidate),
            "delete" => Ok(PurgeMethod::Delete),
            other => Err(ConfigError::InvalidMethod(other.to_string())),
        }
    }
}

/// Target Akamai network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Staging,
    Production,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Staging => "staging",
            Network::Production => "production",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staging" => Ok(Network::Staging),
            "production" => Ok(Network::Production),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }
}

/// Shape of the invalidation list: one object per line, or a stream of
/// self-delimiting JSON request documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Json,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Text => "text",
            FileType::Json => "json",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FileType::Text),
            "json" => Ok(FileType::Json),
            other => Err(ConfigError::InvalidFileType(other.to_string())),
        }
    }
}

/// Raw configuration as assembled from CLI flags, before validation.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub method: String,
    pub network: String,
    pub file_type: String,
    pub credentials: Credentials,
}

impl Config {
    /// Validate the raw configuration into a [`PurgeConfig`].
    ///
    /// Rules are checked in a fixed order, short-circuiting on the first
    /// violation: missing host, client token, client secret, access
    /// token, then invalid method, network, and file type.
    pub fn validate(&self) -> Result<PurgeConfig, ConfigError> {
        if self.credentials.host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if self.credentials.client_token.is_empty() {
            return Err(ConfigError::MissingClientToken);
        }
        if self.credentials.client_secret.is_empty() {
            return Err(ConfigError::MissingClientSecret);
        }
        if self.credentials.access_token.is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }

        Ok(PurgeConfig {
            method: self.method.parse()?,
            network: self.network.parse()?,
            file_type: self.file_type.parse()?,
            credentials: self.credentials.clone(),
        })
    }
}

/// Validated configuration. Immutable after construction and safe to
/// share across all concurrent delivery tasks.
#[derive(Debug, Clone)]
pub struct PurgeConfig {
    pub method: PurgeMethod,
    pub network: Network,
    pub file_type: FileType,
    pub credentials: Credentials,
}

impl PurgeConfig {
    /// Full CCU v3 endpoint for this configuration:
    /// `https://{host}/ccu/v3/{method}/url/{network}`.
    pub fn endpoint_url(&self) -> String {
        format!(
            "https://{}/ccu/v3/{}/url/{}",
            self.credentials.host, self.method, self.network
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            host: "akab-xxxxxxxxxxxxxxxx-xxxxxxxxxxxxxxxx.purge.akamaiapis.net".into(),
            client_token: "akab-client-token-xxxxxxxxxxxxxxxx".into(),
            client_secret: "client-secret-xxxxxxxxxxxxxxxxxxxxxxxxxxxxx=".into(),
            access_token: "akab-access-token-xxxxxxxxxxxxxxxx".into(),
            max_body: 131_072,
        }
    }

    fn config(method: &str, network: &str, file_type: &str) -> Config {
        Config {
            method: method.into(),
            network: network.into(),
            file_type: file_type.into(),
            credentials: credentials(),
        }
    }

    #[test]
    fn accepts_every_valid_combination() {
        for method in ["invalidate", "delete"] {
            for network in ["staging", "production"] {
                for file_type in ["text", "json"] {
                    let validated = config(method, network, file_type).validate().unwrap();
                    assert_eq!(validated.method.as_str(), method);
                    assert_eq!(validated.network.as_str(), network);
                    assert_eq!(validated.file_type.as_str(), file_type);
                }
            }
        }
    }

    #[test]
    fn rejects_unknown_method() {
        let err = config("foo", "staging", "json").validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidMethod("foo".into()));
    }

    #[test]
    fn rejects_unknown_network() {
        let err = config("invalidate", "bar", "text").validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidNetwork("bar".into()));
    }

    #[test]
    fn rejects_unknown_file_type() {
        let err = config("invalidate", "production", "xml").validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidFileType("xml".into()));
    }

    #[test]
    fn rejects_missing_credential_fields() {
        let cases: [(fn(&mut Credentials), ConfigError); 4] = [
            (|c| c.host.clear(), ConfigError::MissingHost),
            (|c| c.client_token.clear(), ConfigError::MissingClientToken),
            (|c| c.client_secret.clear(), ConfigError::MissingClientSecret),
            (|c| c.access_token.clear(), ConfigError::MissingAccessToken),
        ];

        for (strip, expected) in cases {
            let mut cfg = config("invalidate", "staging", "text");
            strip(&mut cfg.credentials);
            assert_eq!(cfg.validate().unwrap_err(), expected);
        }
    }

    #[test]
    fn reports_first_violation_only() {
        // Both the host and the method are bad; the host check runs first.
        let mut cfg = config("bogus", "staging", "text");
        cfg.credentials.host.clear();
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::MissingHost);

        // With credentials intact, the method check fires before the
        // equally invalid network and file type.
        let cfg = config("bogus", "nowhere", "xml");
        assert_eq!(
            cfg.validate().unwrap_err(),
            ConfigError::InvalidMethod("bogus".into())
        );
    }

    #[test]
    fn endpoint_url_encodes_method_and_network() {
        let cfg = config("delete", "production", "text").validate().unwrap();
        assert_eq!(
            cfg.endpoint_url(),
            format!(
                "https://{}/ccu/v3/delete/url/production",
                cfg.credentials.host
            )
        );
    }
}
