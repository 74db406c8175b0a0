//! Making a participant a traitor.
//!
//! [`try_assign`] runs the whole sequence for one participant. Every step
//! that can fail (identity, duplicate check, carrier, uplink) runs before
//! anything visible changes, so an aborted assignment leaves factions,
//! roster, role metadata and notifications untouched. Once the uplink is
//! installed the remaining steps run in a fixed order: deliver the
//! briefing, record the roster entry, attach the role, and re-faction last.

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info, warn};

use covert_types::{Allegiance, EntityId, FactionTag, MindId, RoleBriefing, RosterEntry};

use crate::briefing::compose_briefing;
use crate::error::AssignError;
use crate::localization::{self, Localizer};
use crate::rule::TraitorRule;
use crate::services::{
    FactionGraph, IdentityResolver, Notifier, RoleRegistry, RoundServices,
};
use crate::uplink::{ProvisionRequest, ProvisionedUplink, provision};

/// The outcome of a successful assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The roster entry that was recorded.
    pub entry: RosterEntry,
    /// The briefing delivered to the traitor.
    pub briefing: String,
    /// The organization named in the greeting.
    pub sponsor: Option<String>,
    /// The installed uplink, when one was granted.
    pub uplink: Option<ProvisionedUplink>,
}

/// Flip the unweighted coin that picks a traitor's allegiance.
pub fn roll_allegiance<R: Rng + ?Sized>(rng: &mut R) -> Allegiance {
    if rng.random_bool(0.5) {
        Allegiance::Syndicate
    } else {
        Allegiance::Corporate
    }
}

/// Resolve the participant's mind.
///
/// # Errors
///
/// Returns [`AssignError::NoIdentity`] if the participant has none.
pub fn resolve_identity<S: IdentityResolver + ?Sized>(
    services: &S,
    entity: EntityId,
) -> Result<MindId, AssignError> {
    services
        .try_get_mind(entity)
        .ok_or(AssignError::NoIdentity(entity))
}

/// Send the briefing to the traitor.
pub fn deliver<S: Notifier + ?Sized>(
    services: &mut S,
    entity: EntityId,
    briefing: &str,
    sound: Option<&str>,
) {
    services.notify(entity, briefing, sound);
}

/// Add a roster entry to the rule and return it.
pub fn record(
    rule: &mut TraitorRule,
    entity: EntityId,
    mind: MindId,
    allegiance: Allegiance,
) -> RosterEntry {
    let entry = RosterEntry {
        rule: rule.id(),
        entity,
        mind,
        allegiance,
        assigned_at: Utc::now(),
    };
    rule.record(entry.clone());
    entry
}

/// Attach the traitor role to the mind, sending `notice` to its owner.
pub fn attach_role<S: RoleRegistry + ?Sized>(
    services: &mut S,
    mind: MindId,
    briefing: String,
    notice: &str,
) {
    let role = RoleBriefing {
        briefing,
        antagonist: true,
    };
    if !services.attach_role(mind, role, Some(notice)) {
        warn!(mind = %mind, "traitor role could not be attached");
    }
}

/// Move the participant out of the default and opposing factions and into
/// the allegiance's faction.
pub fn refaction<S: FactionGraph + ?Sized>(
    services: &mut S,
    entity: EntityId,
    default_faction: &FactionTag,
    opposing_faction: &FactionTag,
    faction: FactionTag,
) {
    services.remove_faction(entity, default_faction);
    services.remove_faction(entity, opposing_faction);
    if !services.add_faction(entity, faction) {
        warn!(entity = %entity, "allegiance faction could not be added");
    }
}

/// Make `entity` a traitor of `allegiance` under `rule`.
///
/// With `grant_uplink` unset no carrier is looked up and no uplink is
/// installed; the assignment then succeeds whenever the identity resolves.
///
/// # Errors
///
/// Returns [`AssignError`] when the assignment is aborted. Nothing has
/// changed in that case apart from codewords the rule drew for itself.
pub fn try_assign<S, L, R>(
    rule: &mut TraitorRule,
    services: &mut S,
    localizer: &L,
    rng: &mut R,
    entity: EntityId,
    allegiance: Allegiance,
    grant_uplink: bool,
) -> Result<Assignment, AssignError>
where
    S: RoundServices + ?Sized,
    L: Localizer + ?Sized,
    R: Rng + ?Sized,
{
    let mind = resolve_identity(services, entity)?;
    if rule.is_assigned(mind) {
        return Err(AssignError::AlreadyAssigned {
            mind,
            rule: rule.id(),
        });
    }

    let codewords = rule.ensure_codewords(allegiance, rng).to_vec();
    let sponsor = rule.pick_sponsor(rng).map(str::to_owned);

    let uplink = if grant_uplink {
        let request = ProvisionRequest {
            entity,
            mind,
            allegiance,
            base_balance: rule.starting_balance(),
            code_length: rule.uplink_code_length(),
            codewords: &codewords,
        };
        Some(provision(services, &request, rng)?)
    } else {
        None
    };

    let briefing = compose_briefing(
        localizer,
        sponsor.as_deref(),
        &codewords,
        uplink.as_ref().map(|u| &u.code),
    );

    deliver(services, entity, &briefing, rule.greet_sound());
    let entry = record(rule, entity, mind, allegiance);
    let notice = localizer.get_string(localization::ROLE_CHANGED, &[]);
    attach_role(services, mind, briefing.clone(), &notice);
    refaction(
        services,
        entity,
        rule.default_faction(),
        &rule.variant(allegiance.opposite()).faction,
        rule.variant(allegiance).faction.clone(),
    );

    info!(
        rule = %rule.id(),
        entity = %entity,
        mind = %mind,
        allegiance = %allegiance,
        uplink = uplink.is_some(),
        "traitor assigned"
    );

    Ok(Assignment {
        entry,
        briefing,
        sponsor,
        uplink,
    })
}

/// [`try_assign`], reporting only whether the participant became a traitor.
pub fn assign<S, L, R>(
    rule: &mut TraitorRule,
    services: &mut S,
    localizer: &L,
    rng: &mut R,
    entity: EntityId,
    allegiance: Allegiance,
    grant_uplink: bool,
) -> bool
where
    S: RoundServices + ?Sized,
    L: Localizer + ?Sized,
    R: Rng + ?Sized,
{
    match try_assign(rule, services, localizer, rng, entity, allegiance, grant_uplink) {
        Ok(_) => true,
        Err(e @ AssignError::AlreadyAssigned { .. }) => {
            debug!(entity = %entity, error = %e, "traitor assignment skipped");
            false
        }
        Err(e) => {
            warn!(entity = %entity, allegiance = %allegiance, error = %e, "traitor assignment aborted");
            false
        }
    }
}
