//! Error types for the `covert-station` crate.

use covert_types::{CarrierKind, DeviceId, EntityId, MindId};

/// Errors that can occur while mutating the station model.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// No crew member with the given entity ID exists.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// No mind with the given ID exists.
    #[error("mind not found: {0}")]
    MindNotFound(MindId),

    /// No device with the given ID exists.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// The entity already wears a device in that slot.
    #[error("entity {entity} already wears a {kind}")]
    SlotOccupied {
        /// The wearer.
        entity: EntityId,
        /// The occupied slot.
        kind: CarrierKind,
    },

    /// The device is not worn by the entity the operation targets.
    #[error("device {device} is not worn by entity {entity}")]
    NotWornBy {
        /// The device.
        device: DeviceId,
        /// The entity that was expected to wear it.
        entity: EntityId,
    },

    /// The device already hosts an uplink store.
    #[error("device {0} already hosts an uplink")]
    AlreadyProvisioned(DeviceId),

    /// The operation does not apply to this kind of device.
    #[error("device {device} is a {kind} and cannot host this component")]
    IncompatibleDevice {
        /// The device.
        device: DeviceId,
        /// Its kind.
        kind: CarrierKind,
    },
}
