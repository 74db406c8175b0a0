//! Crew members (live bodies) and the minds that control them.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use covert_types::{CarrierKind, DeviceId, EmploymentRole, EntityId, FactionTag, MindId, RoleBriefing};

/// A live body on the station.
#[derive(Debug, Clone, Serialize)]
pub struct CrewMember {
    /// Entity identifier.
    pub id: EntityId,
    /// Character name.
    pub name: String,
    /// The mind controlling this body, if a player is attached.
    pub mind: Option<MindId>,
    /// NPC factions the body belongs to.
    pub factions: BTreeSet<FactionTag>,
    /// Devices currently worn, one per slot.
    pub worn: BTreeMap<CarrierKind, DeviceId>,
    /// Whether the body is alive.
    pub alive: bool,
}

impl CrewMember {
    /// Whether the body belongs to the given faction.
    pub fn is_member_of(&self, faction: &FactionTag) -> bool {
        self.factions.contains(faction)
    }
}

/// A persistent player identity.
#[derive(Debug, Clone, Serialize)]
pub struct Mind {
    /// Mind identifier.
    pub id: MindId,
    /// The body this mind currently controls.
    pub entity: Option<EntityId>,
    /// Current job, if the player joined with one.
    pub job: Option<EmploymentRole>,
    /// Role metadata attached over the round, in attachment order.
    pub roles: Vec<RoleBriefing>,
    /// Whether the owning player is connected.
    pub connected: bool,
}

impl Mind {
    /// Whether any attached role counts as an antagonist.
    pub fn is_antagonist(&self) -> bool {
        self.roles.iter().any(|r| r.antagonist)
    }
}
