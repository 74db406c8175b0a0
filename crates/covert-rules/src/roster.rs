//! Registry of active traitor rules and cross-rule cohort queries.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use covert_types::{Allegiance, CohortMember, MindId, RosterEntry, RuleId};

use crate::rule::TraitorRule;
use crate::services::PresenceLookup;

/// Every traitor rule active in the round, keyed by rule ID.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleId, TraitorRule>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Add a rule. Returns its ID.
    pub fn register(&mut self, rule: TraitorRule) -> RuleId {
        let id = rule.id();
        self.rules.insert(id, rule);
        info!(rule = %id, "traitor rule registered");
        id
    }

    /// Remove a rule at teardown, returning it if it was registered.
    pub fn deregister(&mut self, id: RuleId) -> Option<TraitorRule> {
        let removed = self.rules.remove(&id);
        if removed.is_some() {
            info!(rule = %id, "traitor rule deregistered");
        }
        removed
    }

    /// Look up a rule.
    pub fn get(&self, id: RuleId) -> Option<&TraitorRule> {
        self.rules.get(&id)
    }

    /// Look up a rule for mutation.
    pub fn get_mut(&mut self, id: RuleId) -> Option<&mut TraitorRule> {
        self.rules.get_mut(&id)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rules in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &TraitorRule> {
        self.rules.values()
    }

    fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.rules.values().flat_map(TraitorRule::entries)
    }

    /// Every other traitor across all rules, without duplicates.
    ///
    /// `mind` itself is never included, whether or not it is a traitor.
    pub fn all_cohorts_of(&self, mind: MindId) -> Vec<CohortMember> {
        self.entries()
            .filter(|e| e.mind != mind)
            .map(CohortMember::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// [`all_cohorts_of`](Self::all_cohorts_of), keeping only traitors
    /// whose body is alive and whose player is connected.
    pub fn cohorts_alive_and_connected<P: PresenceLookup + ?Sized>(
        &self,
        mind: MindId,
        presence: &P,
    ) -> Vec<CohortMember> {
        self.all_cohorts_of(mind)
            .into_iter()
            .filter(|c| presence.is_alive_and_connected(c.mind))
            .collect()
    }

    /// The allegiance `mind` was assigned, if it is a traitor under any rule.
    pub fn allegiance_of(&self, mind: MindId) -> Option<Allegiance> {
        self.entries()
            .find(|e| e.mind == mind)
            .map(|e| e.allegiance)
    }
}
