//! TOML configuration.
//!
//! Discovery order: the `AURUM_CONFIG` environment variable, then
//! `~/.aurum/config.toml`. `${VAR}` references in the file are expanded from
//! the environment before parsing, and a handful of `AURUM_*` variables
//! override the file afterwards so a deployment can flip providers without
//! editing it.
//!
//! ```toml
//! [brand]
//! name = "Aurum"
//! hotel = "Aurum Grand London"
//!
//! [agent]
//! provider = "mock"
//!
//! [pos]
//! provider = "oracle_micros"
//! oracle_micros_base = "${ORACLE_MICROS_BASE}"
//!
//! [simulator]
//! enabled = true
//! ordering_delay_ms = 900
//! confirming_delay_ms = 1800
//! ended_delay_ms = 3200
//! ```

use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

use aurum_providers::AgentKind;
use aurum_types::{EnumParseError, PosProvider};
use serde::Deserialize;
use thiserror::Error;

use crate::simulator::SimulatorTimings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config field '{field}': {source}")]
    Invalid {
        field: &'static str,
        source: EnumParseError,
    },
}

const fn default_true() -> bool {
    true
}

fn default_brand_name() -> String {
    "Aurum".to_owned()
}

fn default_hotel_name() -> String {
    "Aurum Grand London".to_owned()
}

fn default_provider() -> String {
    "mock".to_owned()
}

const fn default_ordering_delay_ms() -> u64 {
    900
}

const fn default_confirming_delay_ms() -> u64 {
    1800
}

const fn default_ended_delay_ms() -> u64 {
    3200
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    pub name: String,
    pub hotel: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: default_brand_name(),
            hotel: default_hotel_name(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Which dining agent to run; only "mock" ships.
    pub provider: String,
    /// Reserved for a hosted agent; the scripted agent ignores it.
    pub api_base: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_base: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PosConfig {
    /// "mock" or "oracle_micros".
    pub provider: String,
    pub oracle_micros_base: Option<String>,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            oracle_micros_base: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_ordering_delay_ms")]
    pub ordering_delay_ms: u64,
    #[serde(default = "default_confirming_delay_ms")]
    pub confirming_delay_ms: u64,
    #[serde(default = "default_ended_delay_ms")]
    pub ended_delay_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ordering_delay_ms: default_ordering_delay_ms(),
            confirming_delay_ms: default_confirming_delay_ms(),
            ended_delay_ms: default_ended_delay_ms(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AurumConfig {
    #[serde(default)]
    pub brand: BrandConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub pos: PosConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl AurumConfig {
    /// Load from the discovered path, or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(Self::with_env_overrides(Self::default()));
        };
        if !path.exists() {
            return Ok(Self::with_env_overrides(Self::default()));
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let expanded = expand_env_vars(&content);
        let config: AurumConfig =
            toml::from_str(&expanded).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        Ok(Self::with_env_overrides(config))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(provider) = env::var("AURUM_AGENT_PROVIDER") {
            self.agent.provider = provider;
        }
        if let Ok(provider) = env::var("AURUM_POS_PROVIDER") {
            self.pos.provider = provider;
        }
        if let Ok(base) = env::var("AURUM_ORACLE_MICROS_BASE") {
            self.pos.oracle_micros_base = Some(base);
        }
        self
    }

    pub fn agent_kind(&self) -> Result<AgentKind, ConfigError> {
        self.agent
            .provider
            .parse()
            .map_err(|source| ConfigError::Invalid {
                field: "agent.provider",
                source,
            })
    }

    pub fn pos_provider(&self) -> Result<PosProvider, ConfigError> {
        self.pos
            .provider
            .parse()
            .map_err(|source| ConfigError::Invalid {
                field: "pos.provider",
                source,
            })
    }

    #[must_use]
    pub fn simulator_timings(&self) -> SimulatorTimings {
        SimulatorTimings {
            to_ordering: Duration::from_millis(self.simulator.ordering_delay_ms),
            to_confirming: Duration::from_millis(self.simulator.confirming_delay_ms),
            to_ended: Duration::from_millis(self.simulator.ended_delay_ms),
        }
    }
}

/// `AURUM_CONFIG` wins; otherwise `~/.aurum/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AURUM_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".aurum").join("config.toml"))
}

/// Replace `${VAR}` references with the variable's value (empty when unset).
/// Unclosed or empty braces pass through untouched.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    let replacement = env::var(var).unwrap_or_default();
                    out.push_str(&replacement);
                }
                i = end + 1;
                continue;
            }
        }

        let ch = value[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe { env::set_var("AURUM_TEST_VAR", "value") };
        assert_eq!(
            expand_env_vars("prefix ${AURUM_TEST_VAR} suffix"),
            "prefix value suffix"
        );
        unsafe { env::remove_var("AURUM_TEST_VAR") };
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        assert_eq!(
            expand_env_vars("before ${AURUM_MISSING_VAR} after"),
            "before  after"
        );
    }

    #[test]
    fn expand_env_vars_unclosed_brace_preserved() {
        assert_eq!(expand_env_vars("test ${UNCLOSED"), "test ${UNCLOSED");
    }

    #[test]
    fn expand_env_vars_empty_name_preserved() {
        assert_eq!(expand_env_vars("test ${} more"), "test  more");
    }

    #[test]
    fn defaults_cover_everything() {
        let config = AurumConfig::default();
        assert_eq!(config.brand.name, "Aurum");
        assert_eq!(config.brand.hotel, "Aurum Grand London");
        assert_eq!(config.agent_kind().unwrap(), AgentKind::Mock);
        assert_eq!(config.pos_provider().unwrap(), PosProvider::Mock);
        assert!(config.simulator.enabled);
        let timings = config.simulator_timings();
        assert_eq!(timings.to_ordering, Duration::from_millis(900));
        assert_eq!(timings.to_ended, Duration::from_millis(3200));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AurumConfig = toml::from_str(
            r#"
            [pos]
            provider = "oracle_micros"
            oracle_micros_base = "https://micros.example"

            [simulator]
            ended_delay_ms = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.pos_provider().unwrap(), PosProvider::OracleMicros);
        assert_eq!(
            config.pos.oracle_micros_base.as_deref(),
            Some("https://micros.example")
        );
        assert_eq!(config.brand.name, "Aurum");
        assert_eq!(config.simulator.ordering_delay_ms, 900);
        assert_eq!(config.simulator.ended_delay_ms, 100);
    }

    #[test]
    fn unknown_provider_is_a_typed_error() {
        let config: AurumConfig = toml::from_str(
            r#"
            [pos]
            provider = "squarepos"
            "#,
        )
        .unwrap();
        let err = config.pos_provider().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pos.provider", .. }));
        assert!(err.to_string().contains("squarepos"));
    }

    #[test]
    fn load_from_reads_and_expands() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        unsafe { env::set_var("AURUM_TEST_MICROS", "https://micros.internal") };
        writeln!(
            file,
            "[pos]\nprovider = \"oracle_micros\"\noracle_micros_base = \"${{AURUM_TEST_MICROS}}\""
        )
        .unwrap();
        let config = AurumConfig::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(
            config.pos.oracle_micros_base.as_deref(),
            Some("https://micros.internal")
        );
        unsafe { env::remove_var("AURUM_TEST_MICROS") };
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pos\nprovider=").unwrap();
        let err = AurumConfig::load_from(&file.path().to_path_buf()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
