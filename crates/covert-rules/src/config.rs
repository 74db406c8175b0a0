//! Configuration loading and typed config structures for the traitor rule.
//!
//! Configuration is YAML. Every field has a default, so an empty document
//! yields a working rule: four codewords drawn from the built-in
//! `adjectives` and `verbs` lists, a starting balance of 20 and six-note
//! unlock codes.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level rule configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Traitor rule parameters.
    #[serde(default)]
    pub traitor: TraitorRuleConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RulesConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Parameters of one traitor rule instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TraitorRuleConfig {
    /// Dataset holding the adjective half of the codeword pool.
    #[serde(default = "default_codeword_adjectives")]
    pub codeword_adjectives: String,

    /// Dataset holding the verb half of the codeword pool.
    #[serde(default = "default_codeword_verbs")]
    pub codeword_verbs: String,

    /// Codewords drawn per allegiance. Clamped to the pool size.
    #[serde(default = "default_codeword_count")]
    pub codeword_count: usize,

    /// Uplink balance before the job penalty is applied.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u32,

    /// Notes in a freshly generated unlock code.
    #[serde(default = "default_uplink_code_length")]
    pub uplink_code_length: usize,

    /// Organizations a traitor can be briefed as working for.
    #[serde(default = "default_objective_issuers")]
    pub objective_issuers: Vec<String>,

    /// Faction every crew member starts in; removed on assignment.
    #[serde(default = "default_faction")]
    pub default_faction: String,

    /// Faction joined by Syndicate traitors.
    #[serde(default = "default_syndicate_faction")]
    pub syndicate_faction: String,

    /// Faction joined by Corporate traitors.
    #[serde(default = "default_corporate_faction")]
    pub corporate_faction: String,

    /// Sound played with the briefing (`null` for silence).
    #[serde(default = "default_greet_sound")]
    pub greet_sound: Option<String>,
}

impl Default for TraitorRuleConfig {
    fn default() -> Self {
        Self {
            codeword_adjectives: default_codeword_adjectives(),
            codeword_verbs: default_codeword_verbs(),
            codeword_count: default_codeword_count(),
            starting_balance: default_starting_balance(),
            uplink_code_length: default_uplink_code_length(),
            objective_issuers: default_objective_issuers(),
            default_faction: default_faction(),
            syndicate_faction: default_syndicate_faction(),
            corporate_faction: default_corporate_faction(),
            greet_sound: default_greet_sound(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_codeword_adjectives() -> String {
    String::from("adjectives")
}

fn default_codeword_verbs() -> String {
    String::from("verbs")
}

const fn default_codeword_count() -> usize {
    4
}

const fn default_starting_balance() -> u32 {
    20
}

const fn default_uplink_code_length() -> usize {
    6
}

fn default_objective_issuers() -> Vec<String> {
    vec![
        String::from("Cybersun Industries"),
        String::from("Donk Co."),
        String::from("Gorlex Marauders"),
        String::from("Interdyne Pharmaceutics"),
        String::from("Waffle Corporation"),
    ]
}

fn default_faction() -> String {
    String::from("NanoTrasen")
}

fn default_syndicate_faction() -> String {
    String::from("Syndicate")
}

fn default_corporate_faction() -> String {
    String::from("NanoTrasenTraitor")
}

#[allow(clippy::unnecessary_wraps)]
fn default_greet_sound() -> Option<String> {
    Some(String::from("/Audio/Ambience/Antag/traitor_start.ogg"))
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RulesConfig::parse("{}").ok();
        assert_eq!(config, Some(RulesConfig::default()));
    }

    #[test]
    fn default_values() {
        let cfg = TraitorRuleConfig::default();
        assert_eq!(cfg.codeword_count, 4);
        assert_eq!(cfg.starting_balance, 20);
        assert_eq!(cfg.uplink_code_length, 6);
        assert_eq!(cfg.default_faction, "NanoTrasen");
        assert_eq!(cfg.syndicate_faction, "Syndicate");
        assert_eq!(cfg.corporate_faction, "NanoTrasenTraitor");
        assert!(!cfg.objective_issuers.is_empty());
    }

    #[test]
    fn partial_override() {
        let yaml = "traitor:\n  codeword_count: 2\n  starting_balance: 35\n  greet_sound: null\nlogging:\n  level: debug\n";
        let config = RulesConfig::parse(yaml).unwrap();
        assert_eq!(config.traitor.codeword_count, 2);
        assert_eq!(config.traitor.starting_balance, 35);
        assert_eq!(config.traitor.greet_sound, None);
        assert_eq!(config.traitor.codeword_verbs, "verbs");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            RulesConfig::parse("traitor: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = RulesConfig::from_file(Path::new("/nonexistent/covert-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
