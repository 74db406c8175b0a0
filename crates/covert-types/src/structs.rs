//! Core record types shared by the station model and the traitor rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Allegiance, Note};
use crate::ids::{EntityId, MindId, RuleId};

// ---------------------------------------------------------------------------
// Factions
// ---------------------------------------------------------------------------

/// Name of an NPC faction an entity can belong to (e.g. `NanoTrasen`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FactionTag(pub String);

impl FactionTag {
    /// Create a faction tag from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The faction name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for FactionTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FactionTag {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// The employment role a mind currently holds on the station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmploymentRole {
    /// Job prototype name (e.g. `Captain`).
    pub name: String,
    /// Uplink balance withheld from traitors holding this job. Jobs with
    /// privileged access start with less.
    pub antag_advantage: u32,
}

// ---------------------------------------------------------------------------
// Uplink codes
// ---------------------------------------------------------------------------

/// The ringtone that unlocks a hidden uplink. Generated once per device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UplinkCode {
    /// The notes, in the order they must be played.
    pub notes: Vec<Note>,
}

impl UplinkCode {
    /// Wrap a note sequence.
    pub const fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Number of notes in the code.
    pub const fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the code has no notes.
    pub const fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Roles and roster
// ---------------------------------------------------------------------------

/// Role metadata attached to a mind when it becomes a traitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoleBriefing {
    /// The briefing text shown in the character menu.
    pub briefing: String,
    /// Whether the role counts as an antagonist for round-end accounting.
    pub antagonist: bool,
}

/// A single traitor assignment recorded by a rule instance.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RosterEntry {
    /// The rule instance that made the assignment.
    pub rule: RuleId,
    /// The body the mind controlled when assigned.
    pub entity: EntityId,
    /// The assigned persistent identity.
    pub mind: MindId,
    /// Which side the traitor works for.
    pub allegiance: Allegiance,
    /// Real-world timestamp of the assignment.
    pub assigned_at: DateTime<Utc>,
}

/// Another traitor returned by a cohort query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CohortMember {
    /// The body recorded at assignment time.
    pub entity: EntityId,
    /// The cohort member's persistent identity.
    pub mind: MindId,
}

impl From<&RosterEntry> for CohortMember {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            entity: entry.entity,
            mind: entry.mind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faction_tag_display() {
        let tag = FactionTag::new("NanoTrasen");
        assert_eq!(tag.to_string(), "NanoTrasen");
        assert_eq!(tag, FactionTag::from("NanoTrasen"));
    }

    #[test]
    fn cohort_member_from_roster_entry() {
        let entry = RosterEntry {
            rule: RuleId::new(),
            entity: EntityId::new(),
            mind: MindId::new(),
            allegiance: Allegiance::Syndicate,
            assigned_at: Utc::now(),
        };
        let member = CohortMember::from(&entry);
        assert_eq!(member.entity, entry.entity);
        assert_eq!(member.mind, entry.mind);
    }

    #[test]
    fn uplink_code_length() {
        let code = UplinkCode::new(vec![Note::A, Note::Csharp, Note::G]);
        assert_eq!(code.len(), 3);
        assert!(!code.is_empty());
        assert!(UplinkCode::new(Vec::new()).is_empty());
    }
}
