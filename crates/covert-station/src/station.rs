//! The station: every crew member, mind and device in the round.
//!
//! [`Station`] owns all collaborator-side state the traitor rule reads and
//! mutates: identity lookup, jobs, worn devices and their hidden
//! components, faction sets, role attachments and delivered notifications.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::{debug, info};

use covert_types::{
    CarrierKind, Currency, DeviceId, EmploymentRole, EntityId, FactionTag, MindId, Note,
    RoleBriefing, UplinkCode,
};

use crate::crew::{CrewMember, Mind};
use crate::device::{CodewordListener, Device, UplinkStore};
use crate::error::StationError;

/// A chat notification delivered to a crew member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Recipient.
    pub entity: EntityId,
    /// Message text.
    pub text: String,
    /// Sound played alongside the message.
    pub sound: Option<String>,
}

/// In-memory model of the station.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Station {
    crew: BTreeMap<EntityId, CrewMember>,
    spawn_order: Vec<EntityId>,
    minds: BTreeMap<MindId, Mind>,
    devices: BTreeMap<DeviceId, Device>,
    notifications: Vec<Notification>,
}

impl Station {
    /// Create an empty station.
    pub const fn new() -> Self {
        Self {
            crew: BTreeMap::new(),
            spawn_order: Vec::new(),
            minds: BTreeMap::new(),
            devices: BTreeMap::new(),
            notifications: Vec::new(),
        }
    }

    // -------------------------------------------------------------------
    // Crew and minds
    // -------------------------------------------------------------------

    /// Spawn a player-controlled crew member with a fresh, connected mind.
    pub fn spawn_crew(
        &mut self,
        name: impl Into<String>,
        job: Option<EmploymentRole>,
        factions: impl IntoIterator<Item = FactionTag>,
    ) -> (EntityId, MindId) {
        let entity = self.spawn_body(name.into(), factions);
        let mind = MindId::new();
        self.minds.insert(
            mind,
            Mind {
                id: mind,
                entity: Some(entity),
                job,
                roles: Vec::new(),
                connected: true,
            },
        );
        if let Some(member) = self.crew.get_mut(&entity) {
            member.mind = Some(mind);
        }
        (entity, mind)
    }

    /// Spawn a body with no player attached (e.g. a monkey).
    pub fn spawn_mindless(
        &mut self,
        name: impl Into<String>,
        factions: impl IntoIterator<Item = FactionTag>,
    ) -> EntityId {
        self.spawn_body(name.into(), factions)
    }

    fn spawn_body(
        &mut self,
        name: String,
        factions: impl IntoIterator<Item = FactionTag>,
    ) -> EntityId {
        let id = EntityId::new();
        debug!(entity = %id, name = %name, "crew member spawned");
        self.crew.insert(
            id,
            CrewMember {
                id,
                name,
                mind: None,
                factions: factions.into_iter().collect(),
                worn: BTreeMap::new(),
                alive: true,
            },
        );
        self.spawn_order.push(id);
        id
    }

    /// Look up a crew member.
    pub fn crew_member(&self, entity: EntityId) -> Option<&CrewMember> {
        self.crew.get(&entity)
    }

    /// All crew entity IDs, in spawn order.
    pub fn crew_ids(&self) -> Vec<EntityId> {
        self.spawn_order.clone()
    }

    /// The mind controlling an entity, if any.
    pub fn mind_of(&self, entity: EntityId) -> Option<MindId> {
        self.crew.get(&entity).and_then(|c| c.mind)
    }

    /// Look up a mind.
    pub fn mind(&self, id: MindId) -> Option<&Mind> {
        self.minds.get(&id)
    }

    /// The job currently held by a mind.
    pub fn job_of(&self, mind: MindId) -> Option<&EmploymentRole> {
        self.minds.get(&mind).and_then(|m| m.job.as_ref())
    }

    /// Mark a mind's player as connected or disconnected.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::MindNotFound`] for an unknown mind.
    pub fn set_connected(&mut self, mind: MindId, connected: bool) -> Result<(), StationError> {
        let entry = self.minds.get_mut(&mind).ok_or(StationError::MindNotFound(mind))?;
        entry.connected = connected;
        Ok(())
    }

    /// Kill a crew member.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::EntityNotFound`] for an unknown entity.
    pub fn kill(&mut self, entity: EntityId) -> Result<(), StationError> {
        let member = self.crew.get_mut(&entity).ok_or(StationError::EntityNotFound(entity))?;
        member.alive = false;
        info!(entity = %entity, "crew member died");
        Ok(())
    }

    /// Whether the mind's body is alive and its player connected.
    pub fn is_alive_and_connected(&self, mind: MindId) -> bool {
        let Some(entry) = self.minds.get(&mind) else {
            return false;
        };
        entry.connected
            && entry
                .entity
                .and_then(|e| self.crew.get(&e))
                .is_some_and(|c| c.alive)
    }

    /// Attach role metadata to a mind.
    ///
    /// When `owner_notice` is given and the mind controls a body, the owner
    /// receives it as a notification.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::MindNotFound`] for an unknown mind.
    pub fn attach_role(
        &mut self,
        mind: MindId,
        role: RoleBriefing,
        owner_notice: Option<&str>,
    ) -> Result<(), StationError> {
        let entry = self.minds.get_mut(&mind).ok_or(StationError::MindNotFound(mind))?;
        entry.roles.push(role);
        if let (Some(entity), Some(text)) = (entry.entity, owner_notice) {
            self.notify(entity, text, None);
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Factions
    // -------------------------------------------------------------------

    /// The factions an entity belongs to.
    pub fn factions(&self, entity: EntityId) -> Option<&BTreeSet<FactionTag>> {
        self.crew.get(&entity).map(|c| &c.factions)
    }

    /// Add an entity to a faction.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::EntityNotFound`] for an unknown entity.
    pub fn add_faction(&mut self, entity: EntityId, faction: FactionTag) -> Result<(), StationError> {
        let member = self.crew.get_mut(&entity).ok_or(StationError::EntityNotFound(entity))?;
        member.factions.insert(faction);
        Ok(())
    }

    /// Remove an entity from a faction. Returns whether it was a member.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::EntityNotFound`] for an unknown entity.
    pub fn remove_faction(
        &mut self,
        entity: EntityId,
        faction: &FactionTag,
    ) -> Result<bool, StationError> {
        let member = self.crew.get_mut(&entity).ok_or(StationError::EntityNotFound(entity))?;
        Ok(member.factions.remove(faction))
    }

    // -------------------------------------------------------------------
    // Devices
    // -------------------------------------------------------------------

    /// Create a device and put it on the entity.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::EntityNotFound`] for an unknown entity, or
    /// [`StationError::SlotOccupied`] if the slot already holds a device.
    pub fn equip(&mut self, entity: EntityId, kind: CarrierKind) -> Result<DeviceId, StationError> {
        let member = self.crew.get_mut(&entity).ok_or(StationError::EntityNotFound(entity))?;
        if member.worn.contains_key(&kind) {
            return Err(StationError::SlotOccupied { entity, kind });
        }
        let mut device = Device::new(kind);
        device.wearer = Some(entity);
        let id = device.id;
        member.worn.insert(kind, id);
        self.devices.insert(id, device);
        Ok(id)
    }

    /// The device worn by an entity in the given slot.
    pub fn worn_device(&self, entity: EntityId, kind: CarrierKind) -> Option<DeviceId> {
        self.crew.get(&entity).and_then(|c| c.worn.get(&kind).copied())
    }

    /// Look up a device.
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Install an uplink store on a device worn by `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::DeviceNotFound`], [`StationError::NotWornBy`]
    /// if someone else wears it, or [`StationError::AlreadyProvisioned`] if
    /// the device already hosts an uplink.
    pub fn install_uplink(
        &mut self,
        entity: EntityId,
        device: DeviceId,
        currency: Currency,
        balance: u32,
    ) -> Result<(), StationError> {
        let target = self.devices.get_mut(&device).ok_or(StationError::DeviceNotFound(device))?;
        if target.wearer != Some(entity) {
            return Err(StationError::NotWornBy { device, entity });
        }
        if target.is_provisioned() {
            return Err(StationError::AlreadyProvisioned(device));
        }
        target.uplink = Some(UplinkStore { currency, balance });
        info!(
            entity = %entity,
            device = %device,
            kind = %target.kind,
            currency = %currency,
            balance,
            "uplink installed"
        );
        Ok(())
    }

    /// Return the device's ringer code, generating one on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::DeviceNotFound`] for an unknown device.
    pub fn ensure_ringer_code<R: Rng + ?Sized>(
        &mut self,
        device: DeviceId,
        length: usize,
        rng: &mut R,
    ) -> Result<UplinkCode, StationError> {
        let target = self.devices.get_mut(&device).ok_or(StationError::DeviceNotFound(device))?;
        if let Some(code) = &target.ringer_code {
            return Ok(code.clone());
        }
        let notes: Vec<Note> = (0..length)
            .filter_map(|_| Note::ALL.choose(rng).copied())
            .collect();
        let code = UplinkCode::new(notes);
        target.ringer_code = Some(code.clone());
        debug!(device = %device, length, "ringer code generated");
        Ok(code)
    }

    /// Install a codeword listener on a headset, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::DeviceNotFound`] for an unknown device, or
    /// [`StationError::IncompatibleDevice`] if it is not a headset.
    pub fn install_listener(
        &mut self,
        device: DeviceId,
        codewords: Vec<String>,
    ) -> Result<(), StationError> {
        let target = self.devices.get_mut(&device).ok_or(StationError::DeviceNotFound(device))?;
        if target.kind != CarrierKind::Headset {
            return Err(StationError::IncompatibleDevice {
                device,
                kind: target.kind,
            });
        }
        target.listener = Some(CodewordListener { codewords });
        Ok(())
    }

    // -------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------

    /// Deliver a chat notification.
    pub fn notify(&mut self, entity: EntityId, text: impl Into<String>, sound: Option<&str>) {
        self.notifications.push(Notification {
            entity,
            text: text.into(),
            sound: sound.map(str::to_owned),
        });
    }

    /// Every notification delivered so far.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Notifications delivered to one entity.
    pub fn notifications_for(&self, entity: EntityId) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.entity == entity)
            .collect()
    }
}
