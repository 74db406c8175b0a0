//! Round configuration, loaded from `covert-config.yaml`.
//!
//! The document is the rule configuration ([`RulesConfig`]) plus a `round`
//! section describing the crew and how many traitors to pick. The
//! `COVERT_SEED` environment variable overrides `round.seed`.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use covert_rules::{ConfigError, RulesConfig};

/// Environment variable overriding the round seed.
pub const SEED_ENV: &str = "COVERT_SEED";

/// The full configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoundConfig {
    /// Traitor rule and logging sections.
    #[serde(flatten)]
    pub rules: RulesConfig,

    /// Round setup.
    #[serde(default)]
    pub round: RoundSection,
}

impl RoundConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Replace the seed with `value` when it parses as a `u64`.
    pub fn apply_seed_override(&mut self, value: Option<&str>) {
        let Some(raw) = value else {
            return;
        };
        match raw.trim().parse::<u64>() {
            Ok(seed) => self.round.seed = seed,
            Err(e) => warn!(value = raw, error = %e, "ignoring invalid {SEED_ENV}"),
        }
    }
}

/// The `round` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoundSection {
    /// Seed for every random draw in the round.
    #[serde(default)]
    pub seed: u64,

    /// How many crew members are selected as traitors.
    #[serde(default = "default_traitor_count")]
    pub traitor_count: usize,

    /// Whether selected traitors receive an uplink.
    #[serde(default = "default_grant_uplink")]
    pub grant_uplink: bool,

    /// The crew manifest.
    #[serde(default = "default_crew")]
    pub crew: Vec<CrewSpec>,
}

impl Default for RoundSection {
    fn default() -> Self {
        Self {
            seed: 0,
            traitor_count: default_traitor_count(),
            grant_uplink: default_grant_uplink(),
            crew: default_crew(),
        }
    }
}

/// One crew manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewSpec {
    /// Character name.
    pub name: String,

    /// Job name, if employed.
    #[serde(default)]
    pub job: Option<String>,

    /// Uplink balance withheld because of the job.
    #[serde(default)]
    pub antag_advantage: u32,

    /// Whether the character wears a PDA.
    #[serde(default = "default_true")]
    pub pda: bool,

    /// Whether the character wears a headset.
    #[serde(default = "default_true")]
    pub headset: bool,
}

const fn default_traitor_count() -> usize {
    2
}

const fn default_grant_uplink() -> bool {
    true
}

const fn default_true() -> bool {
    true
}

fn crew(name: &str, job: &str, antag_advantage: u32) -> CrewSpec {
    CrewSpec {
        name: name.to_owned(),
        job: Some(job.to_owned()),
        antag_advantage,
        pda: true,
        headset: true,
    }
}

fn default_crew() -> Vec<CrewSpec> {
    vec![
        crew("Ada Reyes", "Captain", 25),
        crew("Bram Okafor", "Head of Security", 10),
        crew("Cleo Marsh", "Chemist", 0),
        crew("Dmitri Vance", "Station Engineer", 0),
        crew("Esme Kato", "Botanist", 0),
        crew("Felix Dunn", "Quartermaster", 5),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RoundConfig::parse("{}").unwrap();
        assert_eq!(config, RoundConfig::default());
        assert_eq!(config.round.crew.len(), 6);
        assert_eq!(config.rules.traitor.codeword_count, 4);
    }

    #[test]
    fn rule_and_round_sections_parse_together() {
        let yaml = "\
traitor:
  codeword_count: 3
logging:
  level: debug
round:
  seed: 99
  traitor_count: 1
  crew:
    - name: Alice
      job: Clown
      headset: false
";
        let config = RoundConfig::parse(yaml).unwrap();
        assert_eq!(config.rules.traitor.codeword_count, 3);
        assert_eq!(config.rules.logging.level, "debug");
        assert_eq!(config.round.seed, 99);
        assert_eq!(config.round.traitor_count, 1);
        assert!(config.round.grant_uplink);
        let alice = config.round.crew.first().unwrap();
        assert_eq!(alice.job.as_deref(), Some("Clown"));
        assert!(alice.pda);
        assert!(!alice.headset);
    }

    #[test]
    fn seed_override_applies_valid_values_only() {
        let mut config = RoundConfig::default();
        config.apply_seed_override(Some(" 42 "));
        assert_eq!(config.round.seed, 42);
        config.apply_seed_override(Some("not-a-number"));
        assert_eq!(config.round.seed, 42);
        config.apply_seed_override(None);
        assert_eq!(config.round.seed, 42);
    }
}
