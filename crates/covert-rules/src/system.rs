//! The traitor rule system: lifecycle and event handlers.
//!
//! [`TraitorRuleSystem`] owns the rule registry, the word lists, the string
//! table and the round's RNG. The round drives it through four entry points:
//! a rule is added, a participant is selected as an antagonist, the
//! round-end summary is built, and the rule is removed at teardown.

use rand::Rng;
use tracing::warn;

use covert_types::{Allegiance, EntityId, RuleId};

use crate::assignment::{assign, roll_allegiance};
use crate::config::TraitorRuleConfig;
use crate::datasets::DatasetCatalog;
use crate::error::SystemError;
use crate::localization::Localizer;
use crate::report::append_round_end_codewords;
use crate::roster::RuleRegistry;
use crate::rule::TraitorRule;
use crate::services::RoundServices;

/// Owns every traitor rule in the round.
#[derive(Debug)]
pub struct TraitorRuleSystem<L, R> {
    registry: RuleRegistry,
    datasets: DatasetCatalog,
    localizer: L,
    rng: R,
}

impl<L: Localizer, R: Rng> TraitorRuleSystem<L, R> {
    /// Create a system with no active rules.
    pub const fn new(datasets: DatasetCatalog, localizer: L, rng: R) -> Self {
        Self {
            registry: RuleRegistry::new(),
            datasets,
            localizer,
            rng,
        }
    }

    /// Start a traitor rule.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Catalog`] if a configured word list is missing.
    pub fn add_rule(&mut self, config: &TraitorRuleConfig) -> Result<RuleId, SystemError> {
        let rule = TraitorRule::new(config, &self.datasets, &mut self.rng)?;
        Ok(self.registry.register(rule))
    }

    /// Tear a rule down. Its traitors drop out of cohort queries.
    pub fn remove_rule(&mut self, id: RuleId) -> Option<TraitorRule> {
        self.registry.deregister(id)
    }

    /// A participant was selected as a traitor under `rule`.
    ///
    /// Flips a coin for the allegiance and assigns. Returns whether the
    /// participant became a traitor.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownRule`] if `rule` is not registered.
    pub fn on_antag_selected<S: RoundServices + ?Sized>(
        &mut self,
        rule: RuleId,
        services: &mut S,
        entity: EntityId,
        grant_uplink: bool,
    ) -> Result<bool, SystemError> {
        if self.registry.get(rule).is_none() {
            return Err(SystemError::UnknownRule(rule));
        }
        let allegiance = roll_allegiance(&mut self.rng);
        self.make_traitor(rule, services, entity, allegiance, grant_uplink)
    }

    /// Assign `entity` a specific allegiance under `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownRule`] if `rule` is not registered.
    pub fn make_traitor<S: RoundServices + ?Sized>(
        &mut self,
        rule: RuleId,
        services: &mut S,
        entity: EntityId,
        allegiance: Allegiance,
        grant_uplink: bool,
    ) -> Result<bool, SystemError> {
        let target = self
            .registry
            .get_mut(rule)
            .ok_or(SystemError::UnknownRule(rule))?;
        Ok(assign(
            target,
            services,
            &self.localizer,
            &mut self.rng,
            entity,
            allegiance,
            grant_uplink,
        ))
    }

    /// Append the rule's round-end codewords to the shared summary.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownRule`] if `rule` is not registered.
    pub fn on_objectives_text_prepend(
        &self,
        rule: RuleId,
        summary: &mut String,
    ) -> Result<(), SystemError> {
        let Some(target) = self.registry.get(rule) else {
            warn!(rule = %rule, "round-end report for unknown rule");
            return Err(SystemError::UnknownRule(rule));
        };
        append_round_end_codewords(summary, &self.localizer, target.round_codewords());
        Ok(())
    }

    /// The active rules.
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The string table used for briefings and reports.
    pub const fn localizer(&self) -> &L {
        &self.localizer
    }
}
