//! Shared type definitions for the Covert traitor rule.
//!
//! This crate is the single source of truth for identifiers and records
//! exchanged between the station model (`covert-station`) and the rule
//! engine (`covert-rules`). Types flow to `TypeScript` via `ts-rs` for
//! round-end tooling.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entities, minds, devices, rules
//! - [`enums`] -- Allegiances, carrier kinds, currencies, notes
//! - [`structs`] -- Factions, jobs, uplink codes, role briefings, roster entries

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Allegiance, CarrierKind, Currency, Note};
pub use ids::{DeviceId, EntityId, MindId, RuleId};
pub use structs::{
    CohortMember, EmploymentRole, FactionTag, RoleBriefing, RosterEntry, UplinkCode,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Writes the `.ts` files into `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EntityId::export_all();
        let _ = crate::ids::MindId::export_all();
        let _ = crate::ids::DeviceId::export_all();
        let _ = crate::ids::RuleId::export_all();
        let _ = crate::enums::Allegiance::export_all();
        let _ = crate::enums::CarrierKind::export_all();
        let _ = crate::enums::Currency::export_all();
        let _ = crate::enums::Note::export_all();
        let _ = crate::structs::RosterEntry::export_all();
        let _ = crate::structs::CohortMember::export_all();
        let _ = crate::structs::RoleBriefing::export_all();
    }
}
