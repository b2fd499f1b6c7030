//! Endpoint configuration and resolution.

/// Link-local address the instance metadata service listens on.
pub const DEFAULT_HOST: &str = "169.254.169.254";

/// Environment variable overriding the metadata host.
pub const HOST_ENV: &str = "IMDS_HOST";

const META_DATA_PATH: &str = "latest/meta-data/";

/// Where to find the metadata service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    /// `host` or `host:port`, without scheme.
    pub host: String,
}

impl MetadataConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Build a config from an explicit host, falling back to the environment
    /// and then to [`DEFAULT_HOST`].
    pub fn resolve(explicit: Option<&str>) -> Self {
        Self::new(resolve_host(explicit))
    }

    /// Base URL that lists top-level keys. Always ends in `/`.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        format!("http://{host}/{META_DATA_PATH}")
    }

    /// URL for a single key under the base URL.
    pub fn key_url(&self, key: &str) -> String {
        format!("{}{key}", self.base_url())
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

/// Resolve the metadata host.
pub fn resolve_host(explicit: Option<&str>) -> String {
    if let Some(host) = explicit {
        return host.to_string();
    }

    if let Ok(env_host) = std::env::var(HOST_ENV) {
        if !env_host.is_empty() {
            return env_host;
        }
    }

    DEFAULT_HOST.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let config = MetadataConfig::new("54.146.3.236");
        assert_eq!(config.base_url(), "http://54.146.3.236/latest/meta-data/");
    }

    #[test]
    fn test_base_url_with_port_and_trailing_slash() {
        let config = MetadataConfig::new("127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/latest/meta-data/");
    }

    #[test]
    fn test_key_url() {
        let config = MetadataConfig::default();
        assert_eq!(
            config.key_url("instance-id"),
            "http://169.254.169.254/latest/meta-data/instance-id"
        );
    }

    // Single test so the env var is never touched concurrently.
    #[test]
    fn test_resolve_host_precedence() {
        std::env::remove_var(HOST_ENV);
        assert_eq!(resolve_host(None), DEFAULT_HOST);

        std::env::set_var(HOST_ENV, "10.0.0.1");
        assert_eq!(resolve_host(None), "10.0.0.1");
        assert_eq!(resolve_host(Some("192.168.1.1")), "192.168.1.1");

        std::env::set_var(HOST_ENV, "");
        assert_eq!(resolve_host(None), DEFAULT_HOST);

        std::env::remove_var(HOST_ENV);
        assert_eq!(MetadataConfig::resolve(None), MetadataConfig::default());
    }
}
