//! # Configuration
//!
//! YAML configuration for the streaming core and its testbench.
//!
//! ## Configuration Search Path
//!
//! [`AxisConfig::load`] reads the first file found:
//! 1. Path in the `CORDIC_AXIS_CONFIG` environment variable
//! 2. `./cordic-axis.yaml` (current directory)
//! 3. `~/.config/cordic-axis/config.yaml` (user config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! core:
//!   mode: sin_cos
//!   iterations: 16
//!
//! harness:
//!   idle:
//!     kind: cycle
//!     pattern: [true, true, true, false]
//!   backpressure:
//!     kind: random
//!     probability: 0.25
//!     seed: 1
//!   max_ticks: 2000000
//!
//! logging:
//!   level: info
//!   format: compact
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cordic_core::{CordicMode, DEFAULT_ITERATIONS, MAX_ITERATIONS, MIN_ITERATIONS};

use crate::error::{AxisError, AxisResult};
use crate::observe::LogConfig;
use crate::pause::PausePattern;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "CORDIC_AXIS_CONFIG";

/// Streaming core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Function computed by the core
    pub mode: CordicMode,
    /// Micro-rotations per beat; also the pipeline depth
    pub iterations: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            mode: CordicMode::SinCos,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl CoreConfig {
    /// Configuration for `mode` with the default iteration count.
    pub fn new(mode: CordicMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Builder: set iteration count
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder: set mode
    pub fn mode(mut self, mode: CordicMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate ranges.
    pub fn validate(&self) -> AxisResult<()> {
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(AxisError::ConfigError(format!(
                "iterations must be in {}..={}, got {}",
                MIN_ITERATIONS, MAX_ITERATIONS, self.iterations
            )));
        }
        Ok(())
    }
}

/// Testbench timing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Producer-side pause pattern (upstream idle gaps)
    pub idle: PausePattern,
    /// Consumer-side pause pattern (backpressure)
    pub backpressure: PausePattern,
    /// Tick budget for one run before giving up
    pub max_ticks: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            idle: PausePattern::None,
            backpressure: PausePattern::None,
            max_ticks: 10_000_000,
        }
    }
}

impl HarnessConfig {
    /// Builder: set idle pattern
    pub fn idle(mut self, pattern: PausePattern) -> Self {
        self.idle = pattern;
        self
    }

    /// Builder: set backpressure pattern
    pub fn backpressure(mut self, pattern: PausePattern) -> Self {
        self.backpressure = pattern;
        self
    }

    /// Builder: set tick budget
    pub fn max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// Validate patterns and budget.
    pub fn validate(&self) -> AxisResult<()> {
        self.idle.validate()?;
        self.backpressure.validate()?;
        if self.max_ticks == 0 {
            return Err(AxisError::ConfigError("max_ticks must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AxisConfig {
    /// Core settings
    pub core: CoreConfig,
    /// Testbench settings
    pub harness: HarnessConfig,
    /// Logging settings
    pub logging: LogConfig,
}

impl AxisConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns defaults if no file is found.
    pub fn load() -> AxisResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
            tracing::warn!("{} points to missing file {}", CONFIG_ENV_VAR, path.display());
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> AxisResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> AxisResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| AxisError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> AxisResult<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| AxisError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> AxisResult<()> {
        self.core.validate()?;
        self.harness.validate()
    }

    /// Files checked by [`AxisConfig::load`] after the environment variable.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("cordic-axis.yaml")];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("cordic-axis")
                    .join("config.yaml"),
            );
        }
        paths
    }

    /// Commented example configuration.
    pub fn example_yaml() -> String {
        r#"# cordic-axis configuration
core:
  # sin_cos: angle code -> (sin, cos)
  # angle_mag: (x, y) -> (angle, magnitude)
  mode: sin_cos
  # Micro-rotations per beat (1..=24); also the pipeline depth
  iterations: 16

harness:
  # Pause patterns: kind none | cycle (pattern) | random (probability, seed)
  idle:
    kind: cycle
    pattern: [true, true, true, false]
  backpressure:
    kind: none
  max_ticks: 10000000

logging:
  level: info
  format: compact
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::LogLevel;

    #[test]
    fn test_defaults_are_valid() {
        let config = AxisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.core.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.harness.idle, PausePattern::None);
    }

    #[test]
    fn test_example_yaml() {
        let config = AxisConfig::parse(&AxisConfig::example_yaml()).unwrap();
        assert_eq!(config.core.mode, CordicMode::SinCos);
        assert_eq!(config.harness.idle, PausePattern::cycle_pause());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AxisConfig::parse("core:\n  mode: angle_mag\n").unwrap();
        assert_eq!(config.core.mode, CordicMode::AngleMag);
        assert_eq!(config.core.iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.harness.max_ticks, HarnessConfig::default().max_ticks);
    }

    #[test]
    fn test_validation() {
        assert!(AxisConfig::parse("core:\n  iterations: 0\n").is_err());
        assert!(AxisConfig::parse("core:\n  iterations: 25\n").is_err());
        assert!(AxisConfig::parse("harness:\n  max_ticks: 0\n").is_err());
        assert!(AxisConfig::parse("harness:\n  idle:\n    kind: cycle\n    pattern: []\n").is_err());
        assert!(AxisConfig::parse("core: [").is_err());
    }

    #[test]
    fn test_builders() {
        let core = CoreConfig::new(CordicMode::AngleMag).iterations(20);
        assert_eq!(core.mode, CordicMode::AngleMag);
        assert_eq!(core.iterations, 20);

        let harness = HarnessConfig::default()
            .idle(PausePattern::cycle_pause())
            .backpressure(PausePattern::random(0.5, 9))
            .max_ticks(1000);
        assert!(harness.validate().is_ok());
        assert_eq!(harness.max_ticks, 1000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cordic-axis.yaml");

        let mut config = AxisConfig::default();
        config.core = CoreConfig::new(CordicMode::AngleMag).iterations(18);
        config.harness.backpressure = PausePattern::random(0.25, 11);
        config.save(&path).unwrap();

        let loaded = AxisConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AxisConfig::load_from(Path::new("/nonexistent/cordic-axis.yaml")).unwrap_err();
        assert!(matches!(err, AxisError::Io(_)));
    }

    #[test]
    fn test_search_paths() {
        let paths = AxisConfig::config_search_paths();
        assert!(paths[0].ends_with("cordic-axis.yaml"));
    }
}
