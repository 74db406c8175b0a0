//! Wearable devices and the hidden components an uplink installs on them.

use serde::Serialize;

use covert_types::{CarrierKind, Currency, DeviceId, EntityId, UplinkCode};

/// The hidden purchasing capability installed on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UplinkStore {
    /// The currency the store sells in.
    pub currency: Currency,
    /// Remaining balance.
    pub balance: u32,
}

/// Listens on a headset for the codewords of its owner's cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodewordListener {
    /// Codewords highlighted when heard over the radio.
    pub codewords: Vec<String>,
}

/// An item able to carry an uplink.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    /// Device identifier.
    pub id: DeviceId,
    /// PDA or headset.
    pub kind: CarrierKind,
    /// Entity currently wearing the device.
    pub wearer: Option<EntityId>,
    /// Installed uplink store. At most one per device.
    pub uplink: Option<UplinkStore>,
    /// Ringtone unlocking the uplink. Immutable once generated.
    pub ringer_code: Option<UplinkCode>,
    /// Installed codeword listener (headsets only).
    pub listener: Option<CodewordListener>,
}

impl Device {
    /// Create an unworn, unprovisioned device.
    pub fn new(kind: CarrierKind) -> Self {
        Self {
            id: DeviceId::new(),
            kind,
            wearer: None,
            uplink: None,
            ringer_code: None,
            listener: None,
        }
    }

    /// Whether an uplink store is installed.
    pub const fn is_provisioned(&self) -> bool {
        self.uplink.is_some()
    }
}
