//! Running one round: seed the station, select traitors, build the report.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use tracing::{info, warn};

use covert_rules::localization::{self, Localizer};
use covert_rules::{StringTable, SystemError, TraitorRuleConfig, TraitorRuleSystem};
use covert_station::Station;
use covert_types::{
    Allegiance, CarrierKind, CohortMember, EmploymentRole, EntityId, FactionTag, MindId, RuleId,
};

use crate::config::{CrewSpec, RoundSection};

/// Mixed into the round seed for traitor selection, which draws from its
/// own RNG rather than the rule system's.
const SELECTION_STREAM: u64 = 0x5EED_5E1E_C700_0001;

/// One traitor as seen at round end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitorSummary {
    /// Character name.
    pub name: String,
    /// The traitor's mind.
    pub mind: MindId,
    /// Which side they work for.
    pub allegiance: Allegiance,
    /// The briefing they received.
    pub briefing: String,
    /// Other traitors still alive and connected.
    pub cohorts: Vec<CohortMember>,
}

/// Everything the round produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Crew members the round selected.
    pub selected: usize,
    /// Traitors that were successfully assigned.
    pub traitors: Vec<TraitorSummary>,
    /// The round-end summary text.
    pub summary: String,
}

/// Spawn the crew manifest onto a fresh station.
pub fn seed_station(crew: &[CrewSpec], default_faction: &str) -> Station {
    let mut station = Station::new();
    for spec in crew {
        let job = spec.job.as_ref().map(|name| EmploymentRole {
            name: name.clone(),
            antag_advantage: spec.antag_advantage,
        });
        let (entity, _) =
            station.spawn_crew(spec.name.as_str(), job, [FactionTag::new(default_faction)]);
        let worn = [(spec.pda, CarrierKind::Pda), (spec.headset, CarrierKind::Headset)];
        for (_, kind) in worn.into_iter().filter(|(wears, _)| *wears) {
            if let Err(e) = station.equip(entity, kind) {
                warn!(entity = %entity, kind = %kind, error = %e, "could not equip crew member");
            }
        }
    }
    info!(crew = crew.len(), "station seeded");
    station
}

/// Pick `count` distinct crew members, clamped to the crew size.
pub fn select_traitors(station: &Station, count: usize, seed: u64) -> Vec<EntityId> {
    let mut rng = SmallRng::seed_from_u64(seed ^ SELECTION_STREAM);
    let crew = station.crew_ids();
    crew.choose_multiple(&mut rng, count).copied().collect()
}

/// Run a full round against `station`.
pub fn run_round(
    system: &mut TraitorRuleSystem<StringTable, SmallRng>,
    station: &mut Station,
    traitor: &TraitorRuleConfig,
    round: &RoundSection,
) -> Result<RoundOutcome, SystemError> {
    let rule = system.add_rule(traitor)?;
    let selected = select_traitors(station, round.traitor_count, round.seed);

    for &entity in &selected {
        let assigned = system.on_antag_selected(rule, &mut *station, entity, round.grant_uplink)?;
        if !assigned {
            warn!(entity = %entity, "selected crew member could not be made a traitor");
        }
    }

    let traitors = summarize(system, station, rule);
    let count = traitors.len().to_string();
    let mut summary = system
        .localizer()
        .get_string(localization::ROUND_END_COUNT, &[("count", count.as_str())]);
    system.on_objectives_text_prepend(rule, &mut summary)?;
    system.remove_rule(rule);

    Ok(RoundOutcome {
        selected: selected.len(),
        traitors,
        summary,
    })
}

fn summarize(
    system: &TraitorRuleSystem<StringTable, SmallRng>,
    station: &Station,
    rule: RuleId,
) -> Vec<TraitorSummary> {
    let Some(active) = system.registry().get(rule) else {
        return Vec::new();
    };
    active
        .entries()
        .map(|entry| TraitorSummary {
            name: station
                .crew_member(entry.entity)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            mind: entry.mind,
            allegiance: entry.allegiance,
            briefing: station
                .mind(entry.mind)
                .and_then(|m| m.roles.last())
                .map(|r| r.briefing.clone())
                .unwrap_or_default(),
            cohorts: system
                .registry()
                .cohorts_alive_and_connected(entry.mind, station),
        })
        .collect()
}
