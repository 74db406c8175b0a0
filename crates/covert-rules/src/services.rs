//! Collaborator interfaces the traitor rule depends on.
//!
//! The rule never owns minds, devices or factions. It reaches them through
//! the narrow traits below, each of which reports failure as `None` or
//! `false` so the rule can abort cleanly. [`RoundServices`] bundles them
//! for call sites that need everything.
//!
//! [`Station`] implements every trait; station-level errors are logged
//! here and folded into the trait's failure value.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::warn;

use covert_station::Station;
use covert_types::{
    CarrierKind, Currency, DeviceId, EmploymentRole, EntityId, FactionTag, MindId, RoleBriefing,
    UplinkCode,
};

/// Resolves a live participant to its persistent identity.
pub trait IdentityResolver {
    /// The mind controlling `entity`, if any.
    fn try_get_mind(&self, entity: EntityId) -> Option<MindId>;
}

/// Looks up the job a mind holds.
pub trait JobLookup {
    /// The mind's current job, if it has one.
    fn mind_job(&self, mind: MindId) -> Option<EmploymentRole>;
}

/// Finds a device able to carry an uplink.
pub trait CarrierDiscovery {
    /// The device of `kind` worn by `entity`, if any.
    fn find_carrier(&self, entity: EntityId, kind: CarrierKind) -> Option<DeviceId>;
}

/// Installs hidden components on carrier devices.
pub trait UplinkInstaller {
    /// Install an uplink store. Returns `false` if the device rejects it.
    fn install_uplink(
        &mut self,
        entity: EntityId,
        device: DeviceId,
        currency: Currency,
        balance: u32,
    ) -> bool;

    /// The device's unlock code, generated on first request and stable
    /// thereafter.
    fn ensure_unlock_code<R: Rng + ?Sized>(
        &mut self,
        device: DeviceId,
        length: usize,
        rng: &mut R,
    ) -> Option<UplinkCode>;

    /// Attach a codeword listener. Returns `false` if the device cannot
    /// host one.
    fn install_listener(&mut self, device: DeviceId, codewords: Vec<String>) -> bool;
}

/// Entity faction membership.
pub trait FactionGraph {
    /// Current factions of `entity` (empty for unknown entities).
    fn factions(&self, entity: EntityId) -> BTreeSet<FactionTag>;

    /// Remove `entity` from `faction`. Returns whether it was a member.
    fn remove_faction(&mut self, entity: EntityId, faction: &FactionTag) -> bool;

    /// Add `entity` to `faction`. Returns `false` for unknown entities.
    fn add_faction(&mut self, entity: EntityId, faction: FactionTag) -> bool;
}

/// Attaches role metadata to minds.
pub trait RoleRegistry {
    /// Attach `role` to `mind`, sending `owner_notice` to the mind's body
    /// when given. Returns `false` for unknown minds.
    fn attach_role(
        &mut self,
        mind: MindId,
        role: RoleBriefing,
        owner_notice: Option<&str>,
    ) -> bool;
}

/// Delivers chat messages to participants.
pub trait Notifier {
    /// Send `text` to `entity`, optionally with a sound.
    fn notify(&mut self, entity: EntityId, text: &str, sound: Option<&str>);
}

/// Reports whether a mind is still in play.
pub trait PresenceLookup {
    /// Whether the mind's body is alive and its player connected.
    fn is_alive_and_connected(&self, mind: MindId) -> bool;
}

/// Every collaborator an assignment touches.
pub trait RoundServices:
    IdentityResolver
    + JobLookup
    + CarrierDiscovery
    + UplinkInstaller
    + FactionGraph
    + RoleRegistry
    + Notifier
    + PresenceLookup
{
}

impl<T> RoundServices for T where
    T: IdentityResolver
        + JobLookup
        + CarrierDiscovery
        + UplinkInstaller
        + FactionGraph
        + RoleRegistry
        + Notifier
        + PresenceLookup
{
}

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

impl IdentityResolver for Station {
    fn try_get_mind(&self, entity: EntityId) -> Option<MindId> {
        self.mind_of(entity)
    }
}

impl JobLookup for Station {
    fn mind_job(&self, mind: MindId) -> Option<EmploymentRole> {
        self.job_of(mind).cloned()
    }
}

impl CarrierDiscovery for Station {
    fn find_carrier(&self, entity: EntityId, kind: CarrierKind) -> Option<DeviceId> {
        self.worn_device(entity, kind)
    }
}

impl UplinkInstaller for Station {
    fn install_uplink(
        &mut self,
        entity: EntityId,
        device: DeviceId,
        currency: Currency,
        balance: u32,
    ) -> bool {
        match Self::install_uplink(self, entity, device, currency, balance) {
            Ok(()) => true,
            Err(e) => {
                warn!(entity = %entity, device = %device, error = %e, "uplink rejected");
                false
            }
        }
    }

    fn ensure_unlock_code<R: Rng + ?Sized>(
        &mut self,
        device: DeviceId,
        length: usize,
        rng: &mut R,
    ) -> Option<UplinkCode> {
        self.ensure_ringer_code(device, length, rng)
            .inspect_err(|e| warn!(device = %device, error = %e, "unlock code unavailable"))
            .ok()
    }

    fn install_listener(&mut self, device: DeviceId, codewords: Vec<String>) -> bool {
        match Self::install_listener(self, device, codewords) {
            Ok(()) => true,
            Err(e) => {
                warn!(device = %device, error = %e, "codeword listener rejected");
                false
            }
        }
    }
}

impl FactionGraph for Station {
    fn factions(&self, entity: EntityId) -> BTreeSet<FactionTag> {
        Self::factions(self, entity).cloned().unwrap_or_default()
    }

    fn remove_faction(&mut self, entity: EntityId, faction: &FactionTag) -> bool {
        Self::remove_faction(self, entity, faction).unwrap_or(false)
    }

    fn add_faction(&mut self, entity: EntityId, faction: FactionTag) -> bool {
        Self::add_faction(self, entity, faction).is_ok()
    }
}

impl RoleRegistry for Station {
    fn attach_role(
        &mut self,
        mind: MindId,
        role: RoleBriefing,
        owner_notice: Option<&str>,
    ) -> bool {
        match Self::attach_role(self, mind, role, owner_notice) {
            Ok(()) => true,
            Err(e) => {
                warn!(mind = %mind, error = %e, "role attachment failed");
                false
            }
        }
    }
}

impl Notifier for Station {
    fn notify(&mut self, entity: EntityId, text: &str, sound: Option<&str>) {
        Self::notify(self, entity, text, sound);
    }
}

impl PresenceLookup for Station {
    fn is_alive_and_connected(&self, mind: MindId) -> bool {
        Self::is_alive_and_connected(self, mind)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn as_services<S: RoundServices>(services: &mut S) -> &mut S {
        services
    }

    #[test]
    fn station_resolves_identity_and_carrier() {
        let mut station = Station::new();
        let (entity, mind) = station.spawn_crew("Alice", None, []);
        let pda = station.equip(entity, CarrierKind::Pda).unwrap();
        let services = as_services(&mut station);

        assert_eq!(services.try_get_mind(entity), Some(mind));
        assert_eq!(services.find_carrier(entity, CarrierKind::Pda), Some(pda));
        assert_eq!(services.find_carrier(entity, CarrierKind::Headset), None);
    }

    #[test]
    fn station_folds_install_errors_into_false() {
        let mut station = Station::new();
        let (entity, _) = station.spawn_crew("Alice", None, []);
        let pda = station.equip(entity, CarrierKind::Pda).unwrap();

        assert!(UplinkInstaller::install_uplink(&mut station, entity, pda, Currency::Telecrystal, 20));
        assert!(!UplinkInstaller::install_uplink(&mut station, entity, pda, Currency::Telecrystal, 20));
        assert!(!UplinkInstaller::install_listener(&mut station, pda, Vec::new()));
    }

    #[test]
    fn unknown_device_has_no_unlock_code() {
        let mut station = Station::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(
            UplinkInstaller::ensure_unlock_code(&mut station, DeviceId::new(), 6, &mut rng)
                .is_none()
        );
    }

    #[test]
    fn unknown_entity_has_no_factions() {
        let mut station = Station::new();
        let stranger = EntityId::new();
        assert!(FactionGraph::factions(&station, stranger).is_empty());
        assert!(!FactionGraph::add_faction(&mut station, stranger, FactionTag::new("Syndicate")));
        assert!(!FactionGraph::remove_faction(&mut station, stranger, &FactionTag::new("Syndicate")));
    }

    #[test]
    fn notifier_records_sound() {
        let mut station = Station::new();
        let (entity, _) = station.spawn_crew("Alice", None, []);
        Notifier::notify(&mut station, entity, "hello", Some("/Audio/ping.ogg"));
        let delivered = station.notifications_for(entity);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered.first().and_then(|n| n.sound.as_deref()), Some("/Audio/ping.ogg"));
    }
}
