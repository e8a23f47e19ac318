//! Client configuration and gateway factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use interviewer_core::model::Difficulty;

use crate::http::{HttpGateway, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Candidate defaults so `start` can be run without flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub name: String,
    pub email: String,
}

/// Top-level interviewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewerConfig {
    /// Base URL of the interview service, including any path prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// How long feedback stays visible before advancing, in milliseconds.
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,
    /// Difficulty used when `start` is run without `--difficulty`.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Optional candidate defaults.
    #[serde(default)]
    pub candidate: Option<CandidateConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_advance_delay() -> u64 {
    3000
}

impl Default for InterviewerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            advance_delay_ms: default_advance_delay(),
            default_difficulty: Difficulty::default(),
            candidate: None,
        }
    }
}

impl InterviewerConfig {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as they are and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `interviewer.toml` in the current directory
/// 2. `~/.config/interviewer/config.toml`
///
/// `INTERVIEWER_API_URL` overrides `base_url`.
pub fn load_config_from(path: Option<&Path>) -> Result<InterviewerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("interviewer.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => InterviewerConfig::default(),
    };

    if let Ok(url) = std::env::var("INTERVIEWER_API_URL") {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }

    Ok(config)
}

/// Parse a TOML config and expand `${VAR}` references.
pub fn parse_config(content: &str) -> Result<InterviewerConfig> {
    let mut config: InterviewerConfig = toml::from_str(content)?;
    config.base_url = resolve_env_vars(&config.base_url);
    if let Some(candidate) = config.candidate.as_mut() {
        candidate.name = resolve_env_vars(&candidate.name);
        candidate.email = resolve_env_vars(&candidate.email);
    }
    anyhow::ensure!(config.timeout_secs > 0, "timeout_secs must be at least 1");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("interviewer"))
}

/// Create the HTTP gateway described by `config`.
pub fn create_gateway(config: &InterviewerConfig) -> Result<HttpGateway> {
    HttpGateway::new(&config.base_url, config.timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_INTERVIEWER_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_INTERVIEWER_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_INTERVIEWER_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_INTERVIEWER_TEST_VAR");
    }

    #[test]
    fn resolved_values_are_not_expanded_again() {
        std::env::set_var("_INTERVIEWER_SELF_REF", "${_INTERVIEWER_SELF_REF}");
        assert_eq!(
            resolve_env_vars("name = ${_INTERVIEWER_SELF_REF}!"),
            "name = ${_INTERVIEWER_SELF_REF}!"
        );
        std::env::remove_var("_INTERVIEWER_SELF_REF");

        assert_eq!(resolve_env_vars("${_INTERVIEWER_UNSET_VAR}x"), "x");
        assert_eq!(resolve_env_vars("open ${brace"), "open ${brace");
    }

    #[test]
    fn default_config() {
        let config = InterviewerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.advance_delay(), Duration::from_secs(3));
        assert_eq!(config.default_difficulty, Difficulty::Medium);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
base_url = "https://interviews.example.com/api"
timeout_secs = 10
advance_delay_ms = 1500
default_difficulty = "hard"

[candidate]
name = "Ada"
email = "ada@example.com"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.base_url, "https://interviews.example.com/api");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.advance_delay_ms, 1500);
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.candidate.unwrap().email, "ada@example.com");
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(parse_config("timeout_secs = 0").is_err());
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interviewer.toml");
        std::fs::write(&path, "advance_delay_ms = 10\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.advance_delay_ms, 10);
    }
}
