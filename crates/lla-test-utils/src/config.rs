//! Configuration builders for tests.

use std::path::{Path, PathBuf};

use lla_config::ClientConfig;

/// Fluent builder for [`ClientConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let path = TestConfigBuilder::new()
///     .socket_path(daemon.socket_path())
///     .timeout_secs(2)
///     .write_to(tmp.path());
/// ```
pub struct TestConfigBuilder {
    config: ClientConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn socket_path(mut self, path: &Path) -> Self {
        self.config.daemon.socket_path = path.display().to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.daemon.timeout_secs = secs;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn strict_exit(mut self, strict: bool) -> Self {
        self.config.client.strict_exit = strict;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }

    /// Serialize the config as `lla.toml` inside `dir` and return its path.
    pub fn write_to(self, dir: &Path) -> PathBuf {
        let path = dir.join("lla.toml");
        let toml = toml::to_string_pretty(&self.config).expect("failed to serialize config");
        std::fs::write(&path, toml).expect("failed to write test config");
        path
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
