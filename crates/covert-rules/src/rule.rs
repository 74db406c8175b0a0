//! Traitor rule instances.
//!
//! A [`TraitorRule`] is created when the round adds the traitor game rule
//! and lives until teardown. It holds the resolved word lists, the tuning
//! parameters from [`TraitorRuleConfig`], and one [`PerVariantState`] per
//! [`Allegiance`].

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::debug;

use covert_types::{Allegiance, FactionTag, MindId, RosterEntry, RuleId};

use crate::codewords::generate_codewords;
use crate::config::TraitorRuleConfig;
use crate::datasets::DatasetCatalog;
use crate::error::CatalogError;

/// State kept separately for each allegiance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerVariantState {
    /// Codewords shared by every traitor of this allegiance. Empty until
    /// first generated.
    pub codewords: Vec<String>,
    /// Faction traitors of this allegiance join.
    pub faction: FactionTag,
    /// Traitors assigned under this allegiance, in assignment order.
    pub roster: Vec<RosterEntry>,
}

impl PerVariantState {
    const fn new(faction: FactionTag) -> Self {
        Self {
            codewords: Vec::new(),
            faction,
            roster: Vec::new(),
        }
    }
}

/// One active traitor game rule.
#[derive(Debug, Clone, Serialize)]
pub struct TraitorRule {
    id: RuleId,
    adjectives: Vec<String>,
    verbs: Vec<String>,
    codeword_count: usize,
    starting_balance: u32,
    uplink_code_length: usize,
    objective_issuers: Vec<String>,
    default_faction: FactionTag,
    greet_sound: Option<String>,
    syndicate: PerVariantState,
    corporate: PerVariantState,
    round_codewords: Vec<String>,
}

impl TraitorRule {
    /// Create a rule from its configuration.
    ///
    /// The Syndicate codewords are drawn immediately; the Corporate list is
    /// drawn the first time a Corporate traitor is assigned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDataset`] if either configured word
    /// list is missing from `datasets`.
    pub fn new<R: Rng + ?Sized>(
        config: &TraitorRuleConfig,
        datasets: &DatasetCatalog,
        rng: &mut R,
    ) -> Result<Self, CatalogError> {
        let adjectives = datasets.get(&config.codeword_adjectives)?.to_vec();
        let verbs = datasets.get(&config.codeword_verbs)?.to_vec();

        let mut rule = Self {
            id: RuleId::new(),
            adjectives,
            verbs,
            codeword_count: config.codeword_count,
            starting_balance: config.starting_balance,
            uplink_code_length: config.uplink_code_length,
            objective_issuers: config.objective_issuers.clone(),
            default_faction: FactionTag::new(config.default_faction.as_str()),
            greet_sound: config.greet_sound.clone(),
            syndicate: PerVariantState::new(FactionTag::new(config.syndicate_faction.as_str())),
            corporate: PerVariantState::new(FactionTag::new(config.corporate_faction.as_str())),
            round_codewords: Vec::new(),
        };
        rule.ensure_codewords(Allegiance::Syndicate, rng);
        Ok(rule)
    }

    /// The rule instance ID.
    pub const fn id(&self) -> RuleId {
        self.id
    }

    /// Uplink balance before the job penalty.
    pub const fn starting_balance(&self) -> u32 {
        self.starting_balance
    }

    /// Notes in a freshly generated unlock code.
    pub const fn uplink_code_length(&self) -> usize {
        self.uplink_code_length
    }

    /// The faction every crew member starts in.
    pub const fn default_faction(&self) -> &FactionTag {
        &self.default_faction
    }

    /// Sound played with the briefing.
    pub fn greet_sound(&self) -> Option<&str> {
        self.greet_sound.as_deref()
    }

    /// The per-allegiance state.
    pub const fn variant(&self, allegiance: Allegiance) -> &PerVariantState {
        match allegiance {
            Allegiance::Syndicate => &self.syndicate,
            Allegiance::Corporate => &self.corporate,
        }
    }

    const fn variant_mut(&mut self, allegiance: Allegiance) -> &mut PerVariantState {
        match allegiance {
            Allegiance::Syndicate => &mut self.syndicate,
            Allegiance::Corporate => &mut self.corporate,
        }
    }

    /// The allegiance's codewords, drawing them if the list is empty.
    pub fn ensure_codewords<R: Rng + ?Sized>(
        &mut self,
        allegiance: Allegiance,
        rng: &mut R,
    ) -> &[String] {
        if self.variant(allegiance).codewords.is_empty() {
            let drawn = generate_codewords(&self.adjectives, &self.verbs, self.codeword_count, rng);
            debug!(
                rule = %self.id,
                allegiance = %allegiance,
                count = drawn.len(),
                "allegiance codewords drawn"
            );
            self.variant_mut(allegiance).codewords = drawn;
        }
        &self.variant(allegiance).codewords
    }

    /// Pick a sponsoring organization uniformly at random.
    pub fn pick_sponsor<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.objective_issuers.choose(rng).map(String::as_str)
    }

    /// Whether `mind` already holds a traitor role under this rule.
    pub fn is_assigned(&self, mind: MindId) -> bool {
        self.entries().any(|e| e.mind == mind)
    }

    /// Traitors assigned under one allegiance.
    pub fn roster(&self, allegiance: Allegiance) -> &[RosterEntry] {
        &self.variant(allegiance).roster
    }

    /// Every roster entry, Syndicate first.
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.syndicate.roster.iter().chain(&self.corporate.roster)
    }

    /// Record a successful assignment.
    ///
    /// The first recorded assignment also fixes the round-end codewords to
    /// the assigned allegiance's list.
    pub fn record(&mut self, entry: RosterEntry) {
        let allegiance = entry.allegiance;
        if self.round_codewords.is_empty() {
            self.round_codewords = self.variant(allegiance).codewords.clone();
        }
        self.variant_mut(allegiance).roster.push(entry);
    }

    /// Codewords reported at round end. Empty until the first assignment.
    pub fn round_codewords(&self) -> &[String] {
        &self.round_codewords
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use covert_types::EntityId;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn rule(rng: &mut SmallRng) -> TraitorRule {
        TraitorRule::new(&TraitorRuleConfig::default(), &DatasetCatalog::builtin().unwrap(), rng)
            .unwrap()
    }

    fn entry(rule: &TraitorRule, allegiance: Allegiance) -> RosterEntry {
        RosterEntry {
            rule: rule.id(),
            entity: EntityId::new(),
            mind: MindId::new(),
            allegiance,
            assigned_at: Utc::now(),
        }
    }

    #[test]
    fn syndicate_codewords_drawn_at_creation() {
        let mut rng = SmallRng::seed_from_u64(1);
        let rule = rule(&mut rng);
        assert_eq!(rule.variant(Allegiance::Syndicate).codewords.len(), 4);
        assert!(rule.variant(Allegiance::Corporate).codewords.is_empty());
    }

    #[test]
    fn corporate_codewords_drawn_once() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut rule = rule(&mut rng);
        let first = rule.ensure_codewords(Allegiance::Corporate, &mut rng).to_vec();
        let second = rule.ensure_codewords(Allegiance::Corporate, &mut rng).to_vec();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_dataset_fails_creation() {
        let config = TraitorRuleConfig {
            codeword_verbs: String::from("nouns"),
            ..TraitorRuleConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(matches!(
            TraitorRule::new(&config, &DatasetCatalog::builtin().unwrap(), &mut rng),
            Err(CatalogError::UnknownDataset(id)) if id == "nouns"
        ));
    }

    #[test]
    fn first_record_fixes_round_codewords() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut rule = rule(&mut rng);
        rule.ensure_codewords(Allegiance::Corporate, &mut rng);
        let corporate = rule.variant(Allegiance::Corporate).codewords.clone();

        assert!(rule.round_codewords().is_empty());
        let e = entry(&rule, Allegiance::Corporate);
        rule.record(e);
        let e = entry(&rule, Allegiance::Syndicate);
        rule.record(e);

        assert_eq!(rule.round_codewords(), corporate.as_slice());
        assert_eq!(rule.entries().count(), 2);
    }

    #[test]
    fn recorded_minds_are_assigned() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut rule = rule(&mut rng);
        let e = entry(&rule, Allegiance::Syndicate);
        let mind = e.mind;
        rule.record(e);

        assert!(rule.is_assigned(mind));
        assert!(!rule.is_assigned(MindId::new()));
        assert_eq!(rule.roster(Allegiance::Syndicate).len(), 1);
        assert!(rule.roster(Allegiance::Corporate).is_empty());
    }

    #[test]
    fn no_sponsor_without_issuers() {
        let config = TraitorRuleConfig {
            objective_issuers: Vec::new(),
            ..TraitorRuleConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(6);
        let rule = TraitorRule::new(&config, &DatasetCatalog::builtin().unwrap(), &mut rng).unwrap();
        assert_eq!(rule.pick_sponsor(&mut rng), None);
    }
}
